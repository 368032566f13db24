//! Parsing, validation, and molar masses for plain chemical formulae like `Ca(NO3)2`

pub mod atoms;
pub mod errors;
pub mod molecule;
pub mod parsers;
pub mod validators;

// External Crate Imports
use rust_decimal::Decimal;

// FIXME: Work on what's publicly exported / part of the API! — maybe create a prelude?
pub use atoms::element_table::ElementTable;
pub use errors::{FormulaError, FormulaErrorKind, FormulaReport, Result};
pub use parsers::{groups::resolve_groups, tokenizer::tokenize};
pub use validators::validate;

// NOTE: For the types in this module, 'a lifetimes indicate references to the ElementTable

/// A formula that has passed every check, along with its (already computed) molar mass
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Molecule<'a> {
    structure: Structure<'a>,
    mass: Mass,
}

/// The pieces recovered from a formula: flat atoms, parenthesized groups, and the coefficient applied to all of them
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Structure<'a> {
    coefficient: Count,
    atoms: Vec<Atom<'a>>,
    groups: Vec<Group<'a>>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Group<'a> {
    atoms: Vec<Atom<'a>>,
    subscript: Count,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Atom<'a> {
    element: Element<'a>,
    count: Count,
}

// ---------------------------------------------------------------------------------------------------------------------

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Element<'a> {
    symbol: &'a str,
    mass: &'a Mass,
}

// NOTE: Unlike the counts of most chemistry libraries, this one can be zero: `(H2O)0` is a perfectly legal formula
// here, it just weighs nothing
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Count(u32);

#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Default,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
)]
pub struct Mass(Decimal);

// =====================================================================================================================

pub trait Massive {
    fn mass(&self) -> Mass;
}

// Blanket impls

macro_rules! massive_ref_impls {
    ($($ref_type:ty),+ $(,)?) => {
        $(
            impl<T: Massive> Massive for $ref_type {
                fn mass(&self) -> Mass {
                    (**self).mass()
                }
            }
        )+
    };
}

massive_ref_impls!(&T, &mut T, Box<T>);
