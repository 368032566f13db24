// External Crate Imports
use nom::{
    combinator::{opt, recognize},
    sequence::pair,
};
use tracing::debug;

// Local Crate Imports
use super::{
    find_all,
    primitives::{ParseResult, digits, lowercase, uppercase},
    working_formula::WorkingFormula,
};
use crate::{Atom, ElementTable, FormulaError, FormulaErrorKind};

// Public API ==========================================================================================================

/// The atoms that could be looked up, and errors for those that couldn't
pub type Tokens<'a> = (Vec<Atom<'a>>, Vec<FormulaError>);

/// Splits a parenthesis-free formula into its atoms
///
/// Anything that doesn't look like an element symbol followed by an optional count is skipped over here, so it's up to
/// [`validate`](crate::validate) to point out stray characters. Symbols that look right, but aren't in `db`, produce
/// an error and contribute nothing to the formula.
pub fn tokenize<'a>(db: &'a ElementTable, formula: &str) -> Tokens<'a> {
    tokenize_working(db, &WorkingFormula::new(formula))
}

// Crate-Internal API ==================================================================================================

pub(crate) fn tokenize_working<'a>(db: &'a ElementTable, working: &WorkingFormula) -> Tokens<'a> {
    let mut atoms = Vec::new();
    let mut errors = Vec::new();

    for (range, (symbol, _)) in find_all(working.text(), atomic_offset) {
        let symbol_span = working.span(range.start..range.start + symbol.len());
        let count = working.count(range.start + symbol.len()..range.end, &mut errors);

        if let Some(element) = db.get(symbol) {
            debug!(%element, count = count.get(), "tokenized atom");
            atoms.push(Atom::new(element, count));
        } else {
            debug!(symbol, "unknown element symbol");
            let kind = FormulaErrorKind::UnknownElement(symbol.to_owned());
            errors.push(FormulaError::new(kind, [symbol_span]));
        }
    }

    (atoms, errors)
}

// Private Sub-Parsers =================================================================================================

/// Atomic Offset = Element Symbol , Digits ;
fn atomic_offset(i: &str) -> ParseResult<(&str, &str)> {
    pair(element_symbol, digits)(i)
}

// NOTE: Greedy, so "Xy" is always taken as a single (non-existent) element, never as X followed by a stray y
/// Element Symbol = uppercase , [ lowercase ] ;
fn element_symbol(i: &str) -> ParseResult<&str> {
    recognize(pair(uppercase, opt(lowercase)))(i)
}

// Module Tests ========================================================================================================
