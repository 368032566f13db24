// External Crate Imports
use ahash::HashMap;
use miette::Diagnostic;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

// Local Crate Imports
use crate::{Element, Mass};

// Public API ==========================================================================================================

/// A read-only mapping from element symbols to standard atomic weights
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ElementTable {
    masses: HashMap<String, Mass>,
}

impl ElementTable {
    /// Builds a custom table, checking that every symbol is well-formed and every mass is positive
    pub fn new<S: Into<String>>(
        entries: impl IntoIterator<Item = (S, Decimal)>,
    ) -> Result<Self, InvalidElementError> {
        let masses = entries
            .into_iter()
            .map(|(symbol, mass)| {
                let symbol = symbol.into();
                validate_symbol(&symbol)?;
                if mass <= Decimal::ZERO {
                    return Err(InvalidElementError::Mass(symbol, mass));
                }
                Ok((symbol, Mass(mass)))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { masses })
    }

    pub fn get(&self, symbol: impl AsRef<str>) -> Option<Element<'_>> {
        self.masses
            .get_key_value(symbol.as_ref())
            .map(|(symbol, mass)| Element { symbol, mass })
    }

    pub fn contains(&self, symbol: impl AsRef<str>) -> bool {
        self.masses.contains_key(symbol.as_ref())
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        let masses = IUPAC_ATOMIC_WEIGHTS
            .iter()
            .map(|&(symbol, mass)| (symbol.to_owned(), Mass(mass)))
            .collect();
        Self { masses }
    }
}

// Element Symbol Validation ===========================================================================================

#[derive(Clone, Eq, PartialEq, Debug, Diagnostic, Error)]
pub enum InvalidElementError {
    #[diagnostic(help("element symbols are an uppercase ASCII letter optionally followed by a lowercase one"))]
    #[error("expected a single uppercase ASCII letter optionally followed by a lowercase ASCII letter, got {0:?}")]
    Symbol(String),

    #[error("the element {0:?} must have a positive mass, got {1}")]
    Mass(String, Decimal),
}

fn validate_symbol(symbol: &str) -> Result<(), InvalidElementError> {
    let chrs: Vec<_> = symbol.chars().collect();
    match chrs[..] {
        [f] if f.is_ascii_uppercase() => Ok(()),
        [f, l] if f.is_ascii_uppercase() && l.is_ascii_lowercase() => Ok(()),
        _ => Err(InvalidElementError::Symbol(symbol.to_owned())),
    }
}

// Standard Atomic Weights =============================================================================================

// NOTE: Abridged standard atomic weights from the IUPAC periodic table (iupac.org/what-we-do/periodic-table-of-elements).
// Elements without stable isotopes are given the mass number of their longest-lived isotope
const IUPAC_ATOMIC_WEIGHTS: [(&str, Decimal); 118] = [
    ("H", dec!(1.0080)),
    ("He", dec!(4.0026)),
    ("Li", dec!(6.94)),
    ("Be", dec!(9.0122)),
    ("B", dec!(10.81)),
    ("C", dec!(12.011)),
    ("N", dec!(14.007)),
    ("O", dec!(15.999)),
    ("F", dec!(18.998)),
    ("Ne", dec!(20.180)),
    ("Na", dec!(22.990)),
    ("Mg", dec!(24.305)),
    ("Al", dec!(26.982)),
    ("Si", dec!(28.085)),
    ("P", dec!(30.974)),
    ("S", dec!(32.06)),
    ("Cl", dec!(35.45)),
    ("Ar", dec!(39.95)),
    ("K", dec!(39.098)),
    ("Ca", dec!(40.078)),
    ("Sc", dec!(44.956)),
    ("Ti", dec!(47.867)),
    ("V", dec!(50.942)),
    ("Cr", dec!(51.996)),
    ("Mn", dec!(54.938)),
    ("Fe", dec!(55.845)),
    ("Co", dec!(58.933)),
    ("Ni", dec!(58.693)),
    ("Cu", dec!(63.546)),
    ("Zn", dec!(65.38)),
    ("Ga", dec!(69.723)),
    ("Ge", dec!(72.630)),
    ("As", dec!(74.922)),
    ("Se", dec!(78.971)),
    ("Br", dec!(79.904)),
    ("Kr", dec!(83.798)),
    ("Rb", dec!(85.468)),
    ("Sr", dec!(87.62)),
    ("Y", dec!(88.906)),
    ("Zr", dec!(91.224)),
    ("Nb", dec!(92.906)),
    ("Mo", dec!(95.95)),
    ("Tc", dec!(97)),
    ("Ru", dec!(101.07)),
    ("Rh", dec!(102.91)),
    ("Pd", dec!(106.42)),
    ("Ag", dec!(107.87)),
    ("Cd", dec!(112.41)),
    ("In", dec!(114.82)),
    ("Sn", dec!(118.71)),
    ("Sb", dec!(121.76)),
    ("Te", dec!(127.60)),
    ("I", dec!(126.90)),
    ("Xe", dec!(131.29)),
    ("Cs", dec!(132.91)),
    ("Ba", dec!(137.33)),
    ("La", dec!(138.91)),
    ("Ce", dec!(140.12)),
    ("Pr", dec!(140.91)),
    ("Nd", dec!(144.24)),
    ("Pm", dec!(145)),
    ("Sm", dec!(150.36)),
    ("Eu", dec!(151.96)),
    ("Gd", dec!(157.25)),
    ("Tb", dec!(158.93)),
    ("Dy", dec!(162.50)),
    ("Ho", dec!(164.93)),
    ("Er", dec!(167.26)),
    ("Tm", dec!(168.93)),
    ("Yb", dec!(173.05)),
    ("Lu", dec!(174.97)),
    ("Hf", dec!(178.49)),
    ("Ta", dec!(180.95)),
    ("W", dec!(183.84)),
    ("Re", dec!(186.21)),
    ("Os", dec!(190.23)),
    ("Ir", dec!(192.22)),
    ("Pt", dec!(195.08)),
    ("Au", dec!(196.97)),
    ("Hg", dec!(200.59)),
    ("Tl", dec!(204.38)),
    ("Pb", dec!(207.2)),
    ("Bi", dec!(208.98)),
    ("Po", dec!(209)),
    ("At", dec!(210)),
    ("Rn", dec!(222)),
    ("Fr", dec!(223)),
    ("Ra", dec!(226)),
    ("Ac", dec!(227)),
    ("Th", dec!(232.04)),
    ("Pa", dec!(231.04)),
    ("U", dec!(238.03)),
    ("Np", dec!(237)),
    ("Pu", dec!(244)),
    ("Am", dec!(243)),
    ("Cm", dec!(247)),
    ("Bk", dec!(247)),
    ("Cf", dec!(251)),
    ("Es", dec!(252)),
    ("Fm", dec!(257)),
    ("Md", dec!(258)),
    ("No", dec!(259)),
    ("Lr", dec!(262)),
    ("Rf", dec!(267)),
    ("Db", dec!(268)),
    ("Sg", dec!(269)),
    ("Bh", dec!(270)),
    ("Hs", dec!(269)),
    ("Mt", dec!(277)),
    ("Ds", dec!(281)),
    ("Rg", dec!(281)),
    ("Cn", dec!(285)),
    ("Nh", dec!(286)),
    ("Fl", dec!(290)),
    ("Mc", dec!(290)),
    ("Lv", dec!(293)),
    ("Ts", dec!(294)),
    ("Og", dec!(294)),
];

// Module Tests ========================================================================================================
