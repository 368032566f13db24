use nom::{
    IResult,
    character::complete::{digit0, satisfy},
};

pub type ParseResult<'a, O> = IResult<&'a str, O>;

/// uppercase
///   = "A" | "B" | "C" | "D" | "E" | "F" | "G"
///   | "H" | "I" | "J" | "K" | "L" | "M" | "N"
///   | "O" | "P" | "Q" | "R" | "S" | "T" | "U"
///   | "V" | "W" | "X" | "Y" | "Z"
///   ;
pub fn uppercase(i: &str) -> ParseResult<char> {
    satisfy(|c| c.is_ascii_uppercase())(i)
}

/// lowercase
///   = "a" | "b" | "c" | "d" | "e" | "f" | "g"
///   | "h" | "i" | "j" | "k" | "l" | "m" | "n"
///   | "o" | "p" | "q" | "r" | "s" | "t" | "u"
///   | "v" | "w" | "x" | "y" | "z"
///   ;
pub fn lowercase(i: &str) -> ParseResult<char> {
    satisfy(|c| c.is_ascii_lowercase())(i)
}

// NOTE: Unlike a `Count`, this doesn't reject leading zeros or overflowing values. Those are reported separately, so
// that every problem in a formula can be listed at once
/// Digits = { digit } ;
pub fn digits(i: &str) -> ParseResult<&str> {
    digit0(i)
}
