//! Format validation and fixed-width segment split

use serde::Serialize;
use vf_error::VinDecodeError;

use super::is_allowed_char;
use super::model_year::is_model_year_code;
use crate::constants::vin;

/// Read-only decomposition of a validated VIN
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VinSegments {
    raw: String,
    wmi: String,
    vds: String,
    check_digit: char,
    model_year_code: char,
    plant_code: char,
    serial: String,
}

impl VinSegments {
    /// Validate `vin` and split it into segments.
    ///
    /// The split itself cannot fail; every error comes from format validation.
    pub fn parse(vin: &str) -> Result<Self, VinDecodeError> {
        let chars = validate_format(vin)?;
        Ok(Self::from_validated(&chars))
    }

    pub(crate) fn from_validated(chars: &[char; vin::LENGTH]) -> Self {
        let slice = |range: std::ops::Range<usize>| chars[range].iter().collect::<String>();

        Self {
            raw: chars.iter().collect(),
            wmi: slice(vin::WMI_RANGE),
            vds: slice(vin::VDS_RANGE),
            check_digit: chars[vin::CHECK_DIGIT_INDEX],
            model_year_code: chars[vin::MODEL_YEAR_INDEX],
            plant_code: chars[vin::PLANT_CODE_INDEX],
            serial: slice(vin::SERIAL_RANGE),
        }
    }

    /// The full 17-character VIN
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Characters 1-3
    pub fn wmi(&self) -> &str {
        &self.wmi
    }

    /// Characters 4-8
    pub fn vds(&self) -> &str {
        &self.vds
    }

    /// Character 9
    pub fn check_digit(&self) -> char {
        self.check_digit
    }

    /// Character 10
    pub fn model_year_code(&self) -> char {
        self.model_year_code
    }

    /// Character 11
    pub fn plant_code(&self) -> char {
        self.plant_code
    }

    /// Characters 12-17
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Character 7, which selects the model-year cycle
    pub fn cycle_selector(&self) -> char {
        // VDS covers 0-based indices 3..8
        self.vds
            .chars()
            .nth(vin::CYCLE_SELECTOR_INDEX - vin::VDS_RANGE.start)
            .unwrap_or('0')
    }
}

/// Check length and alphabet, returning the characters on success.
///
/// Length is checked first and counted in characters. Then each position is
/// checked in order and the first violation is reported with its 1-based
/// position. Position 10 additionally has to be a model-year symbol.
pub fn validate_format(vin: &str) -> Result<[char; vin::LENGTH], VinDecodeError> {
    let count = vin.chars().count();
    if count != vin::LENGTH {
        return Err(VinDecodeError::invalid_length(count));
    }

    let mut chars = ['0'; vin::LENGTH];
    for (idx, c) in vin.chars().enumerate() {
        let allowed = if idx == vin::MODEL_YEAR_INDEX {
            is_model_year_code(c)
        } else {
            is_allowed_char(c)
        };
        if !allowed {
            return Err(VinDecodeError::invalid_character(idx + 1, c));
        }
        chars[idx] = c;
    }
    Ok(chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_offsets() {
        let seg = VinSegments::parse("1HGBH41JXMN109186").unwrap();
        assert_eq!(seg.wmi(), "1HG");
        assert_eq!(seg.vds(), "BH41J");
        assert_eq!(seg.check_digit(), 'X');
        assert_eq!(seg.model_year_code(), 'M');
        assert_eq!(seg.plant_code(), 'N');
        assert_eq!(seg.serial(), "109186");
        assert_eq!(seg.cycle_selector(), '1');
        assert_eq!(seg.as_str(), "1HGBH41JXMN109186");
    }

    #[test]
    fn test_length_checked_before_characters() {
        // too short and containing a forbidden character
        let err = validate_format("IHGBH41JXMN10918").unwrap_err();
        assert_eq!(err, VinDecodeError::invalid_length(16));
    }

    #[test]
    fn test_first_offending_position_reported() {
        let err = validate_format("1HGBH41JXMN1O9Q86").unwrap_err();
        assert_eq!(err, VinDecodeError::invalid_character(13, 'O'));
    }

    #[test]
    fn test_lowercase_rejected() {
        let err = validate_format("1hGBH41JXMN109186").unwrap_err();
        assert_eq!(err.position(), Some(2));
        assert_eq!(err.character(), Some('h'));
    }

    #[test]
    fn test_multibyte_counts_as_one_character() {
        let err = validate_format("1HGBH41JXMN10918É").unwrap_err();
        assert_eq!(err, VinDecodeError::invalid_character(17, 'É'));
    }

    #[test]
    fn test_non_year_symbol_rejected_at_position_ten() {
        for bad in ['U', 'Z', '0'] {
            let vin = format!("1HGBH41JX{}N109186", bad);
            let err = validate_format(&vin).unwrap_err();
            assert_eq!(err, VinDecodeError::invalid_character(10, bad));
            assert!(err.to_string().contains("not a model-year code"), "{}", err);
        }
    }

    #[test]
    fn test_u_z_zero_allowed_elsewhere() {
        assert!(validate_format("1U0BZ41JXMN109186").is_ok());
    }
}
