//! Decoding of four-digit `\uXXXX` escapes.
//!
//! [`UnicodeEscapeBuffer`] accumulates ASCII hexadecimal digits into a UTF-16
//! code unit as they arrive, so an escape may be split across any number of
//! `process` calls. Pairing surrogates is left to the lexer, which knows
//! whether a high surrogate is waiting for its partner.

use crate::error::SyntaxError;

pub(crate) const HIGH_SURROGATES: core::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
pub(crate) const LOW_SURROGATES: core::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

#[derive(Debug)]
/// Accumulates up to four hexadecimal digits into one UTF-16 code unit.
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    /// Creates a new, empty `UnicodeEscapeBuffer`.
    pub fn new() -> Self {
        Self { acc: 0, len: 0 }
    }

    /// Clears any accumulated digits.
    pub fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    /// Feeds a single ASCII hexadecimal digit (`0-9`, `A-F`, `a-f`).
    ///
    /// - Returns `Ok(None)` while fewer than four digits have been provided.
    /// - Returns `Ok(Some(unit))` on the fourth digit and resets itself.
    /// - Returns `Err(InvalidEscape)` if `c` is not a hex digit.
    pub fn feed(&mut self, c: char) -> Result<Option<u16>, SyntaxError> {
        #[allow(clippy::cast_possible_truncation)]
        let d = c.to_digit(16).ok_or(SyntaxError::InvalidEscape(c))? as u16;

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.reset();
        Ok(Some(unit))
    }
}

/// Combines a high and a low surrogate into the code point they encode.
pub(crate) fn combine_surrogates(high: u16, low: u16) -> Option<char> {
    if !HIGH_SURROGATES.contains(&high) || !LOW_SURROGATES.contains(&low) {
        return None;
    }
    let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code)
}

/// Maps the character after a backslash to the character it stands for.
/// `u` is handled separately by the lexer.
pub(crate) fn short_escape(c: char) -> Option<char> {
    Some(match c {
        '"' => '"',
        '\\' => '\\',
        '/' => '/',
        'b' => '\u{0008}',
        'f' => '\u{000C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        _ => return None,
    })
}
