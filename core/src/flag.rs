//! Country code <-> regional-indicator flag transform.
//!
//! A flag emoji is two regional-indicator symbols, one per letter of an
//! ISO 3166-1 alpha-2 code. The mapping is arithmetic: no table is consulted.
//!
//! Full list of country codes: <https://en.wikipedia.org/wiki/ISO_3166-1_alpha-2>

use crate::error::{Error, Result};

/// First regional-indicator symbol, `REGIONAL INDICATOR SYMBOL LETTER A`.
pub const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// Last regional-indicator symbol, letter Z.
pub const REGIONAL_INDICATOR_Z: u32 = 0x1F1FF;

const FLAG_OFFSET: u32 = REGIONAL_INDICATOR_A - 'a' as u32;

/// Stateless codec between two-letter codes and flag sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagCodec;

impl FlagCodec {
    /// Build the flag sequence for a two-letter country code.
    ///
    /// The code is case-folded first, so `"TR"` and `"tr"` give the same flag.
    /// Only the shape is checked; `"zz"` still yields a (meaningless) pair.
    ///
    /// # Example
    /// ```
    /// use libemoji_core::FlagCodec;
    ///
    /// assert_eq!(FlagCodec::encode("us").unwrap(), "\u{1F1FA}\u{1F1F8}");
    /// assert!(FlagCodec::encode("tur").is_err());
    /// ```
    pub fn encode(code: &str) -> Result<String> {
        let mut letters = code.chars();
        let (Some(first), Some(second), None) = (letters.next(), letters.next(), letters.next())
        else {
            return Err(Error::InvalidCountryCode(code.to_string()));
        };

        let mut flag = String::with_capacity(8);
        for letter in [first, second] {
            if !letter.is_ascii_alphabetic() {
                return Err(Error::InvalidCountryCode(code.to_string()));
            }
            let shifted = letter.to_ascii_lowercase() as u32 + FLAG_OFFSET;
            match char::from_u32(shifted) {
                Some(ri) => flag.push(ri),
                None => return Err(Error::InvalidCountryCode(code.to_string())),
            }
        }
        Ok(flag)
    }

    /// Recover the lowercase country code from a regional-indicator pair.
    ///
    /// Returns `None` unless `sequence` is exactly two regional indicators.
    pub fn decode(sequence: &str) -> Option<String> {
        let mut chars = sequence.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) if is_regional_indicator(a) && is_regional_indicator(b) => {
                [a, b]
                    .iter()
                    .map(|&ri| char::from_u32(ri as u32 - FLAG_OFFSET))
                    .collect()
            }
            _ => None,
        }
    }
}

/// True for the 26 regional-indicator symbols.
pub fn is_regional_indicator(ch: char) -> bool {
    (REGIONAL_INDICATOR_A..=REGIONAL_INDICATOR_Z).contains(&(ch as u32))
}

/// Shorthand for [`FlagCodec::encode`].
pub fn country_flag(code: &str) -> Result<String> {
    FlagCodec::encode(code)
}
