//! ISO 3779 check digit

use vf_error::VinDecodeError;

use super::segments::validate_format;
use crate::constants::vin;

/// Numeric value of a VIN character for the weighted sum.
///
/// Returns `None` for characters that never appear in a VIN.
pub fn transliterate(c: char) -> Option<u32> {
    let value = match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A' | 'J' => 1,
        'B' | 'K' | 'S' => 2,
        'C' | 'L' | 'T' => 3,
        'D' | 'M' | 'U' => 4,
        'E' | 'N' | 'V' => 5,
        'F' | 'W' => 6,
        'G' | 'P' | 'X' => 7,
        'H' | 'Y' => 8,
        'R' | 'Z' => 9,
        _ => return None,
    };
    Some(value)
}

/// Expected check digit for an already validated VIN
pub(crate) fn expected_check_digit(chars: &[char; vin::LENGTH]) -> char {
    let sum: u32 = chars
        .iter()
        .zip(vin::CHECK_DIGIT_WEIGHTS.iter())
        .map(|(c, w)| transliterate(*c).unwrap_or(0) * w)
        .sum();

    match sum % vin::CHECK_DIGIT_MODULUS {
        10 => vin::CHECK_DIGIT_TEN,
        // remainder is 0..=9 here
        r => char::from_digit(r, 10).unwrap_or('0'),
    }
}

/// Compute the check digit a VIN should carry at position 9.
///
/// The character currently at position 9 has weight 0 and does not affect
/// the result.
pub fn compute_check_digit(vin: &str) -> Result<char, VinDecodeError> {
    let chars = validate_format(vin)?;
    Ok(expected_check_digit(&chars))
}

/// Whether the VIN's position 9 equals its computed check digit
pub fn is_check_digit_valid(vin: &str) -> Result<bool, VinDecodeError> {
    let chars = validate_format(vin)?;
    Ok(chars[vin::CHECK_DIGIT_INDEX] == expected_check_digit(&chars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliteration_table() {
        assert_eq!(transliterate('7'), Some(7));
        assert_eq!(transliterate('A'), Some(1));
        assert_eq!(transliterate('H'), Some(8));
        assert_eq!(transliterate('J'), Some(1));
        assert_eq!(transliterate('N'), Some(5));
        assert_eq!(transliterate('P'), Some(7));
        assert_eq!(transliterate('R'), Some(9));
        assert_eq!(transliterate('S'), Some(2));
        assert_eq!(transliterate('Z'), Some(9));
        assert_eq!(transliterate('I'), None);
        assert_eq!(transliterate('O'), None);
        assert_eq!(transliterate('Q'), None);
    }

    #[test]
    fn test_check_digit_ten_is_x() {
        assert_eq!(compute_check_digit("1HGBH41JXMN109186").unwrap(), 'X');
    }

    #[test]
    fn test_check_digit_numeric() {
        // weights sum to 89, 89 mod 11 = 1
        assert_eq!(compute_check_digit("11111111111111111").unwrap(), '1');
        assert!(is_check_digit_valid("11111111111111111").unwrap());
    }

    #[test]
    fn test_check_position_ignored() {
        let a = compute_check_digit("1HGBH41J0MN109186").unwrap();
        let b = compute_check_digit("1HGBH41J7MN109186").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_format_propagates() {
        assert!(compute_check_digit("SHORT").is_err());
    }
}
