//! VIN parsing, check digit and model year
//!
//! # Layout
//!
//! | Positions | Segment |
//! |---|---|
//! | 1-3 | WMI (World Manufacturer Identifier) |
//! | 4-8 | VDS (Vehicle Descriptor Section) |
//! | 9 | Check digit |
//! | 10 | Model-year code |
//! | 11 | Plant code |
//! | 12-17 | Serial (Vehicle Identifier Section) |

mod checksum;
mod decoder;
mod model_year;
mod segments;

pub use checksum::{compute_check_digit, is_check_digit_valid, transliterate};
pub use decoder::{decode, VinDecoder};
pub use model_year::{cycle_offset, is_model_year_code, resolve_model_year, YearCycle};
pub use segments::{validate_format, VinSegments};

use crate::constants::vin::FORBIDDEN_CHARS;

/// Whether `c` may appear in a VIN: uppercase ASCII letter or digit, not I/O/Q
pub fn is_allowed_char(c: char) -> bool {
    (c.is_ascii_uppercase() || c.is_ascii_digit()) && !FORBIDDEN_CHARS.contains(&c)
}

/// Clean up hand-typed or scanned input before decoding.
///
/// Trims, drops `-` and space separators, and uppercases. Does not
/// substitute look-alike characters, so an `O` typed for `0` still fails.
pub fn normalize_vin(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_chars() {
        assert!(is_allowed_char('A'));
        assert!(is_allowed_char('Z'));
        assert!(is_allowed_char('0'));
        assert!(!is_allowed_char('I'));
        assert!(!is_allowed_char('O'));
        assert!(!is_allowed_char('Q'));
        assert!(!is_allowed_char('a'));
        assert!(!is_allowed_char('-'));
    }

    #[test]
    fn test_normalize_vin() {
        assert_eq!(normalize_vin("  1hgbh41j-xmn 109186\n"), "1HGBH41JXMN109186");
        assert!(decode(&normalize_vin("1hgbh41jxmn109186")).is_ok());
    }

    #[test]
    fn test_normalize_keeps_lookalikes() {
        assert_eq!(normalize_vin("1hgbh41jxmno09186"), "1HGBH41JXMNO09186");
        assert!(decode(&normalize_vin("1hgbh41jxmno09186")).is_err());
    }
}
