// Standard Library Imports
use std::sync::LazyLock;

// External Crate Imports
use nom::{
    bytes::complete::take_till,
    character::complete::char,
    sequence::{delimited, pair},
};
use regex::Regex;
use tracing::debug;

// Local Crate Imports
use super::{
    find_all,
    primitives::{ParseResult, digits},
    tokenizer::tokenize_working,
    working_formula::WorkingFormula,
};
use crate::{Count, ElementTable, FormulaError, FormulaErrorKind, Group, Structure};

// SAFETY: Both of these are hard-coded and known to be valid regular expressions
static NESTED_PARENTHESES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(+\w*\(").unwrap());
static COEFFICIENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\((.+)\)$").unwrap());

// Public API ==========================================================================================================

/// Resolves a formula containing parenthesized groups into its atoms, groups, and overall coefficient
///
/// Nested parentheses are never resolved. If any are found, that's the only error returned, and the structure is
/// left empty. Otherwise, a leading coefficient like the 2 in `2(H2O)` is stripped, then innermost groups are
/// repeatedly cut out (by position) until none are left, and whatever remains is tokenized as plain atoms.
pub fn resolve_groups<'a>(db: &'a ElementTable, formula: &str) -> (Structure<'a>, Vec<FormulaError>) {
    if let Some(nested) = NESTED_PARENTHESES.find(formula) {
        debug!(at = nested.start(), "found nested parentheses");
        let error = FormulaError::new(FormulaErrorKind::NestedParentheses, [nested.range().into()]);
        return (Structure::default(), vec![error]);
    }

    let mut errors = Vec::new();
    let (coefficient, mut working) = if let Some(captures) = COEFFICIENT.captures(formula) {
        // SAFETY: Both capture groups are mandatory parts of `COEFFICIENT`, so they're present in every match
        let (digits, inner) = (captures.get(1).unwrap(), captures.get(2).unwrap());
        let coefficient = WorkingFormula::new(formula).count(digits.range(), &mut errors);
        debug!(coefficient = coefficient.get(), "found a whole-formula coefficient");
        (coefficient, WorkingFormula::slice(formula, inner.range()))
    } else {
        (Count::default(), WorkingFormula::new(formula))
    };

    let mut groups = Vec::new();
    loop {
        let found = find_all(working.text(), group);
        if found.is_empty() {
            break;
        }

        for (range, (contents, subscript)) in &found {
            // NOTE: The contents start just after the opening '(', and the subscript makes up the tail of the match
            let contents = range.start + 1..range.start + 1 + contents.len();
            let subscript = working.count(range.end - subscript.len()..range.end, &mut errors);

            let (atoms, tokenizer_errors) = tokenize_working(db, &working.sub(contents));
            debug!(atoms = atoms.len(), subscript = subscript.get(), "resolved a group");
            groups.push(Group { atoms, subscript });
            errors.extend(tokenizer_errors);
        }

        let cuts: Vec<_> = found.into_iter().map(|(range, _)| range).collect();
        working = working.without(&cuts);
    }

    let (atoms, tokenizer_errors) = tokenize_working(db, &working);
    errors.extend(tokenizer_errors);

    let structure = Structure {
        coefficient,
        atoms,
        groups,
    };
    (structure, errors)
}

// Private Sub-Parsers =================================================================================================

/// Group = "(" , { any character - "(" - ")" } , ")" , Digits ;
fn group(i: &str) -> ParseResult<(&str, &str)> {
    let contents = take_till(|c: char| c == '(' || c == ')');
    pair(delimited(char('('), contents, char(')')), digits)(i)
}

// Module Tests ========================================================================================================
