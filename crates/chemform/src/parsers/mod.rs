pub mod groups;
pub mod primitives;
pub mod tokenizer;
mod working_formula;

use std::ops::Range;

use primitives::ParseResult;

// NOTE: This mirrors the "findall" style of matching: parsers are attempted at every position, skipping a single
// character whenever nothing matches. Unparsable text is simply stepped over, since reporting it is the job of the
// validators, not the parsers
/// Collects every non-overlapping, non-empty match of `parser` in `input`, alongside its byte range
pub(crate) fn find_all<'s, O>(
    input: &'s str,
    mut parser: impl FnMut(&'s str) -> ParseResult<'s, O>,
) -> Vec<(Range<usize>, O)> {
    let offset = |rest: &str| input.len() - rest.len();

    let mut matches = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        match parser(rest) {
            Ok((remaining, output)) if remaining.len() < rest.len() => {
                matches.push((offset(rest)..offset(remaining), output));
                rest = remaining;
            }
            _ => {
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str();
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use nom::{character::complete::digit1, sequence::preceded};

    use super::*;
    use primitives::uppercase;

    #[test]
    fn find_all_matches() {
        let numbers = |i| digit1(i);
        assert!(find_all("", numbers).is_empty());
        assert_eq!(find_all("H2O", numbers), [(1..2, "2")]);
        assert_eq!(
            find_all("C6H12O6", numbers),
            [(1..2, "6"), (3..5, "12"), (6..7, "6")]
        );
        // Skipped characters may be multi-byte
        assert_eq!(find_all("é1ü22", numbers), [(2..3, "1"), (5..7, "22")]);
        // Matches never overlap
        let numbered_element = |i| preceded(uppercase, digit1)(i);
        assert_eq!(find_all("H2H3", numbered_element), [(0..2, "2"), (2..4, "3")]);
        assert_eq!(find_all("HH2", numbered_element), [(1..3, "2")]);
    }
}
