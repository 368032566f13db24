use std::ops::Range;

use miette::SourceSpan;

use crate::{Count, FormulaError, FormulaErrorKind};

/// The text left to parse once some spans of a formula have been consumed, remembering where each byte came from
///
/// Groups are cut out of a formula by position, never by searching for their text, so identical groups at different
/// positions can't be confused for one another. Keeping the original offsets around also means that errors found in
/// what's left can still point at the right place in the formula the user actually typed.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) struct WorkingFormula {
    text: String,
    // NOTE: Has one more entry than `text` has bytes, for the offset just past its end
    origins: Vec<usize>,
}

impl WorkingFormula {
    pub(crate) fn new(formula: &str) -> Self {
        Self::slice(formula, 0..formula.len())
    }

    /// A view of just the given byte `range` of `formula`
    pub(crate) fn slice(formula: &str, range: Range<usize>) -> Self {
        let text = formula[range.clone()].to_owned();
        let origins = (range.start..=range.end).collect();
        Self { text, origins }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// A view of the given byte `range` of this working formula
    pub(crate) fn sub(&self, range: Range<usize>) -> Self {
        let text = self.text[range.clone()].to_owned();
        let origins = self.origins[range.start..=range.end].to_vec();
        Self { text, origins }
    }

    /// Removes every (sorted and non-overlapping) range in `cuts`, keeping everything else
    pub(crate) fn without(&self, cuts: &[Range<usize>]) -> Self {
        let mut text = String::with_capacity(self.text.len());
        let mut origins = Vec::with_capacity(self.origins.len());
        let mut cuts = cuts.iter().peekable();
        for (i, c) in self.text.char_indices() {
            while cuts.next_if(|cut| cut.end <= i).is_some() {}
            if cuts.peek().is_some_and(|cut| cut.contains(&i)) {
                continue;
            }
            text.push(c);
            origins.extend_from_slice(&self.origins[i..i + c.len_utf8()]);
        }
        origins.push(self.origins[self.text.len()]);
        Self { text, origins }
    }

    // NOTE: Counts that don't fit are reported, then treated as implicit ones so that parsing can carry on
    /// Reads the digits in `range` as a count, pushing an error onto `errors` if they overflow
    pub(crate) fn count(&self, range: Range<usize>, errors: &mut Vec<FormulaError>) -> Count {
        let digits = &self.text[range.clone()];
        Count::from_digits(digits).unwrap_or_else(|_| {
            let kind = FormulaErrorKind::CountTooLarge(digits.to_owned());
            errors.push(FormulaError::new(kind, [self.span(range)]));
            Count::default()
        })
    }

    /// Maps a byte `range` of this working formula back onto the formula it was cut from
    pub(crate) fn span(&self, range: Range<usize>) -> SourceSpan {
        let start = self.origins[range.start];
        let end = if range.is_empty() {
            start
        } else {
            self.origins[range.end - 1] + 1
        };
        SourceSpan::from(start..end)
    }
}
