use std::fmt;

use itertools::Itertools;
use miette::{Diagnostic, LabeledSpan, SourceSpan};
use thiserror::Error;

pub type Result<T, E = Box<FormulaReport>> = std::result::Result<T, E>;

/// Every problem found in a single formula. If there are any, no mass is reported for it
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("{formula:?} is not a valid chemical formula")]
pub struct FormulaReport {
    formula: String,
    errors: Vec<FormulaError>,
}

#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("{kind}")]
pub struct FormulaError {
    kind: FormulaErrorKind,
    spans: Vec<SourceSpan>,
}

// NOTE: The messages here are full sentences, since they double as the plain-text output of the calculator
#[derive(Clone, Eq, PartialEq, Debug, Diagnostic, Error)]
pub enum FormulaErrorKind {
    #[diagnostic(help("double-check for typos, since element symbols are case-sensitive, like Co and CO"))]
    #[error("'{0}' is not a valid element.")]
    UnknownElement(String),

    #[diagnostic(help(
        "element symbols start with an uppercase letter, so lowercase letters can only follow one, like the a in Na"
    ))]
    #[error("'{}' {}", .0.iter().join(", "), plural(.0, "is not a valid element.", "are not valid elements."))]
    OrphanedLowercase(Vec<char>),

    #[diagnostic(help("formulae can only contain ASCII letters, digits, and parentheses"))]
    #[error("'{}' {}", .0.iter().join(", "), plural(.0, "is not a valid input.", "are not valid inputs."))]
    InvalidCharacters(Vec<char>),

    #[diagnostic(help("a formula needs at least one element symbol, like H or Na"))]
    #[error("Molecule must contain elements.")]
    NoElements,

    #[diagnostic(help("wrap the rest of the formula in parentheses to apply a coefficient, like 2(H2O)"))]
    #[error("Missing parentheses.")]
    MissingParentheses,

    #[diagnostic(help("if you've mistakenly included a leading zero, like NH02, try just NH2 instead"))]
    #[error("Leading zeros are invalid.")]
    LeadingZero,

    #[error("'{0}' is not a valid input.")]
    LoneParentheses(String),

    #[diagnostic(help("remove the extra ')' or add a matching '(' before it"))]
    #[error("Unmatched closing parentheses at position {0}.")]
    UnmatchedClosing(usize),

    #[diagnostic(help("you've probably forgotten to close an earlier '(' bracket"))]
    #[error("Missing closing parentheses.")]
    MissingClosing,

    #[diagnostic(help("only one level of parentheses is allowed, try expanding the inner group by hand"))]
    #[error("Nested parentheses are not supported. Simplify your formula.")]
    NestedParentheses,

    #[diagnostic(help("move any parenthesized groups to the end of the formula, like Ca(NO3)2"))]
    #[error("Molecules inside of parentheses must be placed last.")]
    MisorderedGroup,

    #[diagnostic(help("counts can be at most 4294967295"))]
    #[error("'{0}' is too large a count.")]
    CountTooLarge(String),

    #[diagnostic(help("masses can't exceed about 7.9 × 10²⁸, so try a smaller formula"))]
    #[error("Molecule is too large to compute a mass for.")]
    MassOverflow,
}

// Public API ==========================================================================================================

impl FormulaReport {
    pub(crate) fn new(formula: impl Into<String>, errors: Vec<FormulaError>) -> Self {
        let formula = formula.into();

        Self { formula, errors }
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn errors(&self) -> &[FormulaError] {
        &self.errors
    }

    /// One line per error, in the order they were found
    pub fn messages(&self) -> impl Iterator<Item = String> + '_ {
        self.errors.iter().map(ToString::to_string)
    }
}

impl FormulaError {
    pub(crate) fn new(kind: FormulaErrorKind, spans: impl IntoIterator<Item = SourceSpan>) -> Self {
        let spans = spans.into_iter().collect();

        Self { kind, spans }
    }

    pub const fn kind(&self) -> &FormulaErrorKind {
        &self.kind
    }

    pub fn spans(&self) -> &[SourceSpan] {
        &self.spans
    }
}

impl FormulaErrorKind {
    fn label(&self) -> &'static str {
        match self {
            Self::UnknownElement(_) => "element not found",
            Self::OrphanedLowercase(_) => "no uppercase letter before this",
            Self::InvalidCharacters(_) => "invalid character",
            Self::NoElements => "no elements here",
            Self::MissingParentheses => "coefficient without parentheses",
            Self::LeadingZero => "leading zero",
            Self::LoneParentheses(_) => "only parentheses",
            Self::UnmatchedClosing(_) => "unmatched ')'",
            Self::MissingClosing => "never closed",
            Self::NestedParentheses => "nested '('",
            Self::MisorderedGroup => "group followed by an element",
            Self::CountTooLarge(_) => "count too large",
            Self::MassOverflow => "this formula",
        }
    }
}

// Diagnostic Trait Implementations ====================================================================================

impl Diagnostic for FormulaReport {
    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.formula)
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        Some(Box::new(self.errors.iter().map(|e| e as &dyn Diagnostic)))
    }
}

// NOTE: This is manually implemented because the labels are dynamic — one per span, but sharing the text of `self.kind`
impl Diagnostic for FormulaError {
    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind.help()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = self.kind.label();
        Some(Box::new(
            self.spans
                .iter()
                .map(move |&span| LabeledSpan::new_with_span(Some(label.to_owned()), span)),
        ))
    }
}

// Private Helper Functions ============================================================================================

fn plural<'m, T>(items: &[T], one: &'m str, many: &'m str) -> &'m str {
    if items.len() == 1 { one } else { many }
}

// Module Tests ========================================================================================================
