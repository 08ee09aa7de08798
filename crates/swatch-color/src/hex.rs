// SPDX-License-Identifier: MIT
//
// Strict `#RRGGBB` parsing.
//
// Palette hex strings arrive from people typing into a swatch editor and
// from image-extraction replies. Both are held to the same rule: exactly six
// hex digits, either case, one optional leading `#`. No shorthand, no
// alpha, no trimming. Anything else is rejected rather than guessed at.

use std::fmt;

/// Why a string is not a `#RRGGBB` color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorFormatError {
    /// Nothing after the optional `#`.
    Empty,
    /// Wrong number of digits (the count is the number of characters seen).
    InvalidLength(usize),
    /// A character that is not a hex digit.
    InvalidDigit(char),
}

impl fmt::Display for ColorFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty color string"),
            Self::InvalidLength(n) => write!(f, "expected 6 hex digits, found {n} characters"),
            Self::InvalidDigit(ch) => write!(f, "invalid hex digit {ch:?}"),
        }
    }
}

impl std::error::Error for ColorFormatError {}

/// Parse a `#RRGGBB` / `RRGGBB` string into its three channels.
///
/// # Errors
///
/// Returns [`ColorFormatError`] for empty input, a digit count other than
/// six, or any non-hex character.
pub fn parse(s: &str) -> Result<[u8; 3], ColorFormatError> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.is_empty() {
        return Err(ColorFormatError::Empty);
    }

    let count = digits.chars().count();
    if count != 6 {
        return Err(ColorFormatError::InvalidLength(count));
    }

    let mut nibbles = [0u8; 6];
    for (slot, ch) in nibbles.iter_mut().zip(digits.chars()) {
        *slot = ch.to_digit(16).ok_or(ColorFormatError::InvalidDigit(ch))? as u8;
    }

    Ok([
        nibbles[0] << 4 | nibbles[1],
        nibbles[2] << 4 | nibbles[3],
        nibbles[4] << 4 | nibbles[5],
    ])
}

/// Format channels as canonical upper-case `#RRGGBB`.
#[must_use]
pub fn format([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Parse and re-format: the canonical spelling of a hex color.
///
/// # Errors
///
/// Same as [`parse`].
pub fn normalize(s: &str) -> Result<String, ColorFormatError> {
    parse(s).map(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_hash() {
        assert_eq!(parse("#1982C4"), Ok([0x19, 0x82, 0xC4]));
    }

    #[test]
    fn parses_without_hash() {
        assert_eq!(parse("ff595e"), Ok([0xFF, 0x59, 0x5E]));
    }

    #[test]
    fn mixed_case_is_accepted() {
        assert_eq!(parse("#fFcA3a"), Ok([0xFF, 0xCA, 0x3A]));
    }

    #[test]
    fn normalize_uppercases_and_adds_hash() {
        assert_eq!(normalize("8ac926").as_deref(), Ok("#8AC926"));
        assert_eq!(normalize("#6a4c93").as_deref(), Ok("#6A4C93"));
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(parse(""), Err(ColorFormatError::Empty));
        assert_eq!(parse("#"), Err(ColorFormatError::Empty));
    }

    #[test]
    fn shorthand_is_rejected() {
        assert_eq!(parse("#fff"), Err(ColorFormatError::InvalidLength(3)));
    }

    #[test]
    fn alpha_is_rejected() {
        assert_eq!(parse("#ffffff80"), Err(ColorFormatError::InvalidLength(8)));
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        assert_eq!(parse(" #ffffff"), Err(ColorFormatError::InvalidLength(8)));
    }

    #[test]
    fn double_hash_is_rejected() {
        assert_eq!(parse("##12345"), Err(ColorFormatError::InvalidDigit('#')));
    }

    #[test]
    fn bad_digit_is_reported() {
        assert_eq!(parse("#12g456"), Err(ColorFormatError::InvalidDigit('g')));
    }

    #[test]
    fn multibyte_chars_count_as_characters() {
        assert_eq!(parse("#ééé"), Err(ColorFormatError::InvalidLength(3)));
        assert_eq!(parse("#ab€def"), Err(ColorFormatError::InvalidDigit('€')));
    }

    #[test]
    fn error_messages() {
        assert_eq!(ColorFormatError::Empty.to_string(), "empty color string");
        assert_eq!(
            ColorFormatError::InvalidLength(4).to_string(),
            "expected 6 hex digits, found 4 characters"
        );
        assert_eq!(ColorFormatError::InvalidDigit('z').to_string(), "invalid hex digit 'z'");
    }
}
