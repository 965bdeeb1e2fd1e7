//! Core data types for vinfit
//!
//! Defines the values that flow in and out of the decoder and the matcher.
//! Everything here is plain data: no storage, no display logic.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{confidence, scoring};
use crate::wmi::ManufacturerLookup;

// ============================================================================
// Decoded VIN
// ============================================================================

/// Continent a VIN was assigned in, from its first character (ISO 3780)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Africa,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
    Unknown,
}

impl Region {
    /// Region for the first character of a VIN
    pub fn from_first_char(c: char) -> Self {
        match c {
            'A'..='H' => Region::Africa,
            'J'..='R' => Region::Asia,
            'S'..='Z' => Region::Europe,
            '1'..='5' => Region::NorthAmerica,
            '6' | '7' => Region::Oceania,
            '8' | '9' => Region::SouthAmerica,
            _ => Region::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::Oceania => "Oceania",
            Region::SouthAmerica => "South America",
            Region::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of decoding a VIN
///
/// Only the decoder builds these, so the fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DecodedVehicle {
    manufacturer: String,
    country: String,
    region: Region,
    model_year: u16,
    model_year_code: char,
    wmi: String,
    vds_raw: String,
    plant_code: char,
    serial: String,
    check_digit_valid: bool,
}

/// Field set handed from the decoder to `DecodedVehicle`
pub(crate) struct DecodedFields {
    pub manufacturer: String,
    pub country: String,
    pub region: Region,
    pub model_year: u16,
    pub model_year_code: char,
    pub wmi: String,
    pub vds_raw: String,
    pub plant_code: char,
    pub serial: String,
    pub check_digit_valid: bool,
}

impl DecodedVehicle {
    pub(crate) fn from_fields(fields: DecodedFields) -> Self {
        Self {
            manufacturer: fields.manufacturer,
            country: fields.country,
            region: fields.region,
            model_year: fields.model_year,
            model_year_code: fields.model_year_code,
            wmi: fields.wmi,
            vds_raw: fields.vds_raw,
            plant_code: fields.plant_code,
            serial: fields.serial,
            check_digit_valid: fields.check_digit_valid,
        }
    }

    /// Manufacturer name, or "Unknown" for an unregistered WMI
    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Country of manufacture, or "Unknown" for an unregistered WMI
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Four-digit model year
    pub fn model_year(&self) -> u16 {
        self.model_year
    }

    /// Raw 10th character
    pub fn model_year_code(&self) -> char {
        self.model_year_code
    }

    pub fn wmi(&self) -> &str {
        &self.wmi
    }

    /// Characters 4-8
    pub fn vds_raw(&self) -> &str {
        &self.vds_raw
    }

    pub fn plant_code(&self) -> char {
        self.plant_code
    }

    /// Characters 12-17
    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn check_digit_valid(&self) -> bool {
        self.check_digit_valid
    }

    /// True when the WMI was found in the registry
    pub fn is_manufacturer_known(&self) -> bool {
        self.manufacturer != crate::wmi::UNKNOWN
    }
}

// ============================================================================
// Fitment Inputs
// ============================================================================

/// Normalized vehicle attributes used for matching
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleDescriptor {
    pub make: String,
    pub model: String,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
}

impl VehicleDescriptor {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: u16) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            engine_type: None,
            trim: None,
            body_type: None,
        }
    }

    /// Build a descriptor from a decoded VIN.
    ///
    /// The make comes from the built-in registry's manufacturer-to-make
    /// mapping, falling back to the decoded manufacturer name. The model is
    /// not encoded portably in a VIN, so the caller supplies it.
    pub fn from_decoded(decoded: &DecodedVehicle, model: impl Into<String>) -> Self {
        Self::from_decoded_with(crate::wmi::builtin(), decoded, model)
    }

    /// Like `from_decoded`, taking the make from `lookup`
    pub fn from_decoded_with<L: ManufacturerLookup>(
        lookup: L,
        decoded: &DecodedVehicle,
        model: impl Into<String>,
    ) -> Self {
        let make = lookup
            .lookup_wmi(decoded.wmi())
            .map(|entry| entry.make)
            .unwrap_or_else(|| decoded.manufacturer().to_string());
        Self::new(make, model, decoded.model_year())
    }

    #[must_use]
    pub fn with_engine_type(mut self, engine_type: impl Into<String>) -> Self {
        self.engine_type = Some(engine_type.into());
        self
    }

    #[must_use]
    pub fn with_trim(mut self, trim: impl Into<String>) -> Self {
        self.trim = Some(trim.into());
        self
    }

    #[must_use]
    pub fn with_body_type(mut self, body_type: impl Into<String>) -> Self {
        self.body_type = Some(body_type.into());
        self
    }
}

/// What a part fits, as declared by the parts catalog
///
/// Year bounds are inclusive; a missing bound is unbounded. `"*"` in
/// `model`, `engine_type` or `trim` means any.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompatibilityRule {
    pub make: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_from: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_to: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
}

impl CompatibilityRule {
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year_from: None,
            year_to: None,
            engine_type: None,
            trim: None,
        }
    }

    /// Set both year bounds; `None` leaves that side unbounded
    #[must_use]
    pub fn years(mut self, from: Option<u16>, to: Option<u16>) -> Self {
        self.year_from = from;
        self.year_to = to;
        self
    }

    #[must_use]
    pub fn with_engine_type(mut self, engine_type: impl Into<String>) -> Self {
        self.engine_type = Some(engine_type.into());
        self
    }

    #[must_use]
    pub fn with_trim(mut self, trim: impl Into<String>) -> Self {
        self.trim = Some(trim.into());
        self
    }

    /// Whether the rule accepts any model
    pub fn is_any_model(&self) -> bool {
        self.model.trim() == scoring::WILDCARD
    }
}

/// A part and the rules declaring what it fits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartCandidate {
    pub part_id: String,
    #[serde(default)]
    pub rules: Vec<CompatibilityRule>,
}

impl PartCandidate {
    pub fn new(part_id: impl Into<String>, rules: Vec<CompatibilityRule>) -> Self {
        Self {
            part_id: part_id.into(),
            rules,
        }
    }
}

impl<S: Into<String>> From<(S, Vec<CompatibilityRule>)> for PartCandidate {
    fn from((part_id, rules): (S, Vec<CompatibilityRule>)) -> Self {
        Self::new(part_id, rules)
    }
}

// ============================================================================
// Fitment Output
// ============================================================================

/// Ranked fitment of one part against one vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitmentResult {
    pub part_id: String,
    /// 0 means no rule matched at all
    pub score: u8,
    pub matched_rule: Option<CompatibilityRule>,
    /// Ordered trail of matched, partial and disqualifying criteria
    pub reasons: Vec<String>,
}

impl FitmentResult {
    pub fn confidence(&self) -> FitmentConfidence {
        FitmentConfidence::from_score(self.score)
    }

    pub fn is_match(&self) -> bool {
        self.score > 0
    }
}

/// Coarse band over a fitment score, for filtering and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitmentConfidence {
    None,
    Low,
    Medium,
    High,
    Exact,
}

impl FitmentConfidence {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => FitmentConfidence::None,
            s if s >= scoring::MAX_SCORE => FitmentConfidence::Exact,
            s if s >= confidence::HIGH => FitmentConfidence::High,
            s if s >= confidence::MEDIUM => FitmentConfidence::Medium,
            _ => FitmentConfidence::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FitmentConfidence::None => "none",
            FitmentConfidence::Low => "low",
            FitmentConfidence::Medium => "medium",
            FitmentConfidence::High => "high",
            FitmentConfidence::Exact => "exact",
        }
    }
}

impl fmt::Display for FitmentConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_first_char() {
        assert_eq!(Region::from_first_char('1'), Region::NorthAmerica);
        assert_eq!(Region::from_first_char('5'), Region::NorthAmerica);
        assert_eq!(Region::from_first_char('J'), Region::Asia);
        assert_eq!(Region::from_first_char('W'), Region::Europe);
        assert_eq!(Region::from_first_char('6'), Region::Oceania);
        assert_eq!(Region::from_first_char('9'), Region::SouthAmerica);
        assert_eq!(Region::from_first_char('A'), Region::Africa);
        assert_eq!(Region::from_first_char('0'), Region::Unknown);
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(FitmentConfidence::from_score(0), FitmentConfidence::None);
        assert_eq!(FitmentConfidence::from_score(30), FitmentConfidence::Low);
        assert_eq!(FitmentConfidence::from_score(50), FitmentConfidence::Medium);
        assert_eq!(FitmentConfidence::from_score(80), FitmentConfidence::High);
        assert_eq!(FitmentConfidence::from_score(100), FitmentConfidence::Exact);
        assert!(FitmentConfidence::High > FitmentConfidence::Medium);
    }

    #[test]
    fn test_rule_deserializes_with_missing_optionals() {
        let rule: CompatibilityRule =
            serde_json::from_str(r#"{"make":"Honda","model":"Civic","year_from":2016}"#).unwrap();
        assert_eq!(rule.year_from, Some(2016));
        assert_eq!(rule.year_to, None);
        assert_eq!(rule.engine_type, None);
        assert!(!rule.is_any_model());
    }

    #[test]
    fn test_candidate_from_tuple() {
        let candidate: PartCandidate = ("P1", vec![CompatibilityRule::new("Honda", "*")]).into();
        assert_eq!(candidate.part_id, "P1");
        assert!(candidate.rules[0].is_any_model());
    }
}
