//! Lower-case base36 codec for unsigned integers.
//!
//! Digits are `0-9` followed by `a-z`. Decoding is strict: upper-case
//! letters, whitespace, and the empty string are rejected so every value has
//! exactly one textual form.

use thiserror::Error;

const RADIX: u32 = 36;

/// Errors raised while decoding base36 text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base36Error {
    /// The input contained no digits.
    #[error("base36 value must not be empty")]
    Empty,
    /// The input contained a character outside `0-9a-z`.
    #[error("invalid base36 character {character:?} at position {position}")]
    InvalidCharacter {
        /// Offending character.
        character: char,
        /// Zero-based character index of the offending character.
        position: usize,
    },
    /// The decoded value does not fit in a `u64`.
    #[error("base36 value exceeds the supported range")]
    Overflow,
}

/// Encode `value` as lower-case base36.
///
/// # Examples
/// ```
/// use pagination::base36::encode;
///
/// assert_eq!(encode(0), "0");
/// assert_eq!(encode(35), "z");
/// assert_eq!(encode(36), "10");
/// ```
#[must_use]
pub fn encode(value: u64) -> String {
    if value == 0 {
        return "0".to_owned();
    }

    let mut digits = Vec::new();
    let mut remaining = value;
    while remaining > 0 {
        let digit = u32::try_from(remaining % u64::from(RADIX)).unwrap_or_default();
        digits.push(char::from_digit(digit, RADIX).unwrap_or('0'));
        remaining /= u64::from(RADIX);
    }
    digits.iter().rev().collect()
}

/// Decode lower-case base36 text into a `u64`.
///
/// # Errors
/// Returns [`Base36Error`] when the text is empty, contains characters
/// outside `0-9a-z`, or overflows `u64`.
///
/// # Examples
/// ```
/// use pagination::base36::{Base36Error, decode};
///
/// assert_eq!(decode("10"), Ok(36));
/// assert_eq!(decode(""), Err(Base36Error::Empty));
/// assert!(decode("A").is_err());
/// ```
pub fn decode(text: &str) -> Result<u64, Base36Error> {
    if text.is_empty() {
        return Err(Base36Error::Empty);
    }

    text.chars()
        .enumerate()
        .try_fold(0_u64, |acc, (position, character)| {
            let digit = digit_value(character)
                .ok_or(Base36Error::InvalidCharacter { character, position })?;
            acc.checked_mul(u64::from(RADIX))
                .and_then(|shifted| shifted.checked_add(u64::from(digit)))
                .ok_or(Base36Error::Overflow)
        })
}

fn digit_value(character: char) -> Option<u32> {
    if character.is_ascii_digit() || character.is_ascii_lowercase() {
        character.to_digit(RADIX)
    } else {
        None
    }
}
