//! Structural checks run against the raw text of a formula
//!
//! None of these look at the parsed structure of a formula, and none depend on one another, so every check is always
//! run and each can be tested in isolation. What the parsers silently skip over, these are expected to catch.

// Standard Library Imports
use std::sync::LazyLock;

// External Crate Imports
use miette::SourceSpan;
use regex::Regex;
use tracing::trace;

// Local Crate Imports
use crate::{FormulaError, FormulaErrorKind};

// SAFETY: All of these are hard-coded and known to be valid regular expressions
static INVALID_CHARACTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9()]").unwrap());
static DIGITS_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static BARE_COEFFICIENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+[A-Z]").unwrap());
static LEADING_ZERO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z][a-z]?0\d*").unwrap());
static PARENTHESES_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[()]+$").unwrap());
static ELEMENT_AFTER_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\)\d*[A-Z]").unwrap());

// Public API ==========================================================================================================

pub type Validator = fn(&str) -> Option<FormulaError>;

/// Every check, in the order that their errors are reported
pub const PIPELINE: [Validator; 8] = [
    orphaned_lowercase,
    invalid_characters,
    digits_only,
    bare_coefficient,
    leading_zeros,
    lone_parentheses,
    unbalanced_parentheses,
    misordered_group,
];

pub fn validate(formula: &str) -> Vec<FormulaError> {
    PIPELINE
        .iter()
        .filter_map(|check| check(formula))
        .inspect(|error| trace!(%error, "failed validation"))
        .collect()
}

/// Flags lowercase letters that don't directly follow an uppercase one, like both letters in `h2o`
pub fn orphaned_lowercase(formula: &str) -> Option<FormulaError> {
    let mut previous = None;
    let orphans: Vec<_> = formula
        .char_indices()
        .filter(|&(_, c)| {
            let orphaned = c.is_ascii_lowercase() && !previous.is_some_and(|p: char| p.is_ascii_uppercase());
            previous = Some(c);
            orphaned
        })
        .collect();

    if orphans.is_empty() {
        return None;
    }
    let (spans, chars): (Vec<_>, _) = orphans
        .into_iter()
        .map(|(i, c)| (SourceSpan::from(i..i + c.len_utf8()), c))
        .unzip();
    Some(FormulaError::new(FormulaErrorKind::OrphanedLowercase(chars), spans))
}

/// Flags anything other than ASCII letters, digits, and parentheses, including whitespace
pub fn invalid_characters(formula: &str) -> Option<FormulaError> {
    let invalid: Vec<_> = INVALID_CHARACTER.find_iter(formula).collect();
    if invalid.is_empty() {
        return None;
    }
    let chars = invalid.iter().flat_map(|m| m.as_str().chars()).collect();
    let spans = invalid.iter().map(|m| SourceSpan::from(m.range()));
    Some(FormulaError::new(FormulaErrorKind::InvalidCharacters(chars), spans))
}

pub fn digits_only(formula: &str) -> Option<FormulaError> {
    DIGITS_ONLY
        .find(formula)
        .map(|m| FormulaError::new(FormulaErrorKind::NoElements, [m.range().into()]))
}

/// Flags a coefficient that isn't followed by parentheses, like the 2 in `2H2O`
pub fn bare_coefficient(formula: &str) -> Option<FormulaError> {
    BARE_COEFFICIENT
        .find(formula)
        .map(|m| FormulaError::new(FormulaErrorKind::MissingParentheses, [m.range().into()]))
}

/// Flags subscripts starting with a zero, like `H02`, reporting every occurrence under a single error
pub fn leading_zeros(formula: &str) -> Option<FormulaError> {
    let spans: Vec<SourceSpan> = LEADING_ZERO.find_iter(formula).map(|m| m.range().into()).collect();
    (!spans.is_empty()).then(|| FormulaError::new(FormulaErrorKind::LeadingZero, spans))
}

pub fn lone_parentheses(formula: &str) -> Option<FormulaError> {
    PARENTHESES_ONLY.find(formula).map(|m| {
        let kind = FormulaErrorKind::LoneParentheses(m.as_str().to_owned());
        FormulaError::new(kind, [m.range().into()])
    })
}

/// Flags the first `)` without a matching `(`, or otherwise any `(` that's left unclosed
///
/// The position reported for an unmatched `)` counts characters, starting from one, so it's meaningful to a person
/// reading the formula. The attached span is still a byte offset, like every other span.
pub fn unbalanced_parentheses(formula: &str) -> Option<FormulaError> {
    let mut open = Vec::new();
    for (position, (i, c)) in formula.char_indices().enumerate() {
        match c {
            '(' => open.push(i),
            ')' if open.pop().is_none() => {
                let kind = FormulaErrorKind::UnmatchedClosing(position + 1);
                return Some(FormulaError::new(kind, [(i..i + 1).into()]));
            }
            _ => (),
        }
    }

    if open.is_empty() {
        return None;
    }
    let unclosed = open.into_iter().map(|i| SourceSpan::from(i..i + 1));
    Some(FormulaError::new(FormulaErrorKind::MissingClosing, unclosed))
}

/// Flags groups that are followed by more elements, like `(OH)2Ca`, since groups must come last
pub fn misordered_group(formula: &str) -> Option<FormulaError> {
    let spans: Vec<SourceSpan> = ELEMENT_AFTER_GROUP
        .find_iter(formula)
        .map(|m| m.range().into())
        .collect();
    (!spans.is_empty()).then(|| FormulaError::new(FormulaErrorKind::MisorderedGroup, spans))
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use itertools::Itertools;

    use super::*;

    fn messages(formula: &str) -> String {
        validate(formula).iter().join("\n")
    }

    fn spans(error: Option<FormulaError>) -> Vec<SourceSpan> {
        error.map(|e| e.spans().to_vec()).unwrap_or_default()
    }

    #[test]
    fn test_orphaned_lowercase() {
        // Valid Formulae
        for formula in ["H2O", "NaCl", "Ca(NO3)2", "", "123"] {
            assert_eq!(orphaned_lowercase(formula), None);
        }
        // Invalid Formulae
        let error = orphaned_lowercase("h2o").unwrap();
        assert_eq!(error.to_string(), "'h, o' are not valid elements.");
        assert_eq!(error.spans(), [SourceSpan::from(0..1), SourceSpan::from(2..3)]);
        let error = orphaned_lowercase("Naa").unwrap();
        assert_eq!(error.to_string(), "'a' is not a valid element.");
        assert_eq!(error.spans(), [SourceSpan::from(2..3)]);
        assert_eq!(spans(orphaned_lowercase("(o)")), [SourceSpan::from(1..2)]);
        assert_eq!(spans(orphaned_lowercase("H2 o")), [SourceSpan::from(3..4)]);
        // Only ASCII uppercase letters count as preceding an element symbol
        assert_eq!(spans(orphaned_lowercase("Éa")), [SourceSpan::from(2..3)]);
        // And only ASCII lowercase letters can be orphaned
        assert_eq!(orphaned_lowercase("Hé"), None);
    }

    #[test]
    fn test_invalid_characters() {
        // Valid Formulae
        for formula in ["H2O", "(NH4)2SO4", "h2o", ""] {
            assert_eq!(invalid_characters(formula), None);
        }
        // Invalid Formulae
        let error = invalid_characters("H2O!").unwrap();
        assert_eq!(error.to_string(), "'!' is not a valid input.");
        assert_eq!(error.spans(), [SourceSpan::from(3..4)]);
        let error = invalid_characters("H2 + O2").unwrap();
        assert_eq!(error.to_string(), "' , +,  ' are not valid inputs.");
        assert_eq!(error.spans().len(), 3);
        let error = invalid_characters("H₂O").unwrap();
        assert_eq!(error.to_string(), "'₂' is not a valid input.");
        assert_eq!(error.spans(), [SourceSpan::from(1..4)]);
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("H2O"), None);
        assert_eq!(digits_only("2H"), None);
        assert_eq!(digits_only(""), None);
        let error = digits_only("123").unwrap();
        assert_eq!(error.to_string(), "Molecule must contain elements.");
        assert_eq!(error.spans(), [SourceSpan::from(0..3)]);
    }

    #[test]
    fn test_bare_coefficient() {
        assert_eq!(bare_coefficient("2(H2O)"), None);
        assert_eq!(bare_coefficient("H2O"), None);
        assert_eq!(bare_coefficient("2h2o"), None);
        let error = bare_coefficient("2H2O").unwrap();
        assert_eq!(error.to_string(), "Missing parentheses.");
        assert_eq!(error.spans(), [SourceSpan::from(0..2)]);
        assert_eq!(spans(bare_coefficient("12NaCl")), [SourceSpan::from(0..3)]);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(leading_zeros("H2O"), None);
        assert_eq!(leading_zeros("H10"), None);
        assert_eq!(leading_zeros("(OH)02"), None);
        let error = leading_zeros("NH02").unwrap();
        assert_eq!(error.to_string(), "Leading zeros are invalid.");
        assert_eq!(error.spans(), [SourceSpan::from(1..4)]);
        // Every occurrence is labelled, but only one error is reported
        assert_eq!(
            spans(leading_zeros("H0O01Na0")),
            [SourceSpan::from(0..2), SourceSpan::from(2..5), SourceSpan::from(5..8)]
        );
    }

    #[test]
    fn test_lone_parentheses() {
        assert_eq!(lone_parentheses("(H2O)"), None);
        assert_eq!(lone_parentheses(""), None);
        let error = lone_parentheses("()").unwrap();
        assert_eq!(error.to_string(), "'()' is not a valid input.");
        assert_eq!(error.spans(), [SourceSpan::from(0..2)]);
        assert_eq!(
            lone_parentheses(")(((").map(|e| e.to_string()).as_deref(),
            Some("')(((' is not a valid input.")
        );
    }

    #[test]
    fn test_unbalanced_parentheses() {
        // Balanced Formulae
        for formula in ["H2O", "Ca(NO3)2", "(H2(O))", "()()", ""] {
            assert_eq!(unbalanced_parentheses(formula), None);
        }
        // Unmatched Closing Parentheses
        let error = unbalanced_parentheses("H2O)").unwrap();
        assert_eq!(error.to_string(), "Unmatched closing parentheses at position 4.");
        assert_eq!(error.spans(), [SourceSpan::from(3..4)]);
        let error = unbalanced_parentheses(")(").unwrap();
        assert_eq!(error.to_string(), "Unmatched closing parentheses at position 1.");
        // Positions count characters, but spans count bytes
        let error = unbalanced_parentheses("é)").unwrap();
        assert_eq!(error.to_string(), "Unmatched closing parentheses at position 2.");
        assert_eq!(error.spans(), [SourceSpan::from(2..3)]);
        // Missing Closing Parentheses
        let error = unbalanced_parentheses("(H2O").unwrap();
        assert_eq!(error.to_string(), "Missing closing parentheses.");
        assert_eq!(error.spans(), [SourceSpan::from(0..1)]);
        assert_eq!(
            spans(unbalanced_parentheses("((H)(O")),
            [SourceSpan::from(0..1), SourceSpan::from(4..5)]
        );
    }

    #[test]
    fn test_misordered_group() {
        assert_eq!(misordered_group("Ca(NO3)2"), None);
        assert_eq!(misordered_group("(H2O)(H2O)"), None);
        let error = misordered_group("(OH)2Ca").unwrap();
        assert_eq!(
            error.to_string(),
            "Molecules inside of parentheses must be placed last."
        );
        assert_eq!(error.spans(), [SourceSpan::from(3..6)]);
        assert_eq!(
            spans(misordered_group("(H)O(H)12Na")),
            [SourceSpan::from(2..4), SourceSpan::from(6..10)]
        );
    }

    #[test]
    fn valid_formulae_pass_every_check() {
        for formula in ["H2O", "CO2", "Ca(NO3)2", "2(H2O)", "Al2(SO4)3", "C6H12O6", "(H2(O))"] {
            assert!(validate(formula).is_empty(), "{formula} failed validation");
        }
    }

    #[test]
    fn errors_are_reported_in_pipeline_order() {
        assert_snapshot!(messages("2H02O!)"), @r"
        '!' is not a valid input.
        Missing parentheses.
        Leading zeros are invalid.
        Unmatched closing parentheses at position 7.
        ");
        assert_snapshot!(messages("h2o"), @"'h, o' are not valid elements.");
        assert_snapshot!(messages("123"), @"Molecule must contain elements.");
        assert_snapshot!(messages("(H2O"), @"Missing closing parentheses.");
        assert_snapshot!(messages("(OH)2Ca)"), @r"
        Unmatched closing parentheses at position 8.
        Molecules inside of parentheses must be placed last.
        ");
    }

    #[test]
    fn validation_is_deterministic() {
        for formula in ["h2o", "2H02O!)", "((", "Xy2O", "", " "] {
            assert_eq!(validate(formula), validate(formula));
        }
    }
}
