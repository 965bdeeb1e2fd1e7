//! Input validation for catalog data and configuration
//!
//! The matcher never fails on odd input; these checks are for the edges
//! where catalog rows, vehicle records and settings enter the system.
//!
//! - **Catalog rows**: part ids, rule attributes and year bounds
//! - **Configuration**: scoring weights, WMI overrides, settings file size

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::{limits, scoring};
use crate::data::{CompatibilityRule, PartCandidate, VehicleDescriptor};
use crate::error::{Result, VinfitError};
use crate::fitment::ScoringWeights;
use crate::vin::is_allowed_char;

lazy_static! {
    static ref PART_ID_PATTERN: Option<Regex> =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/\-]*$").ok();
}

/// Validates a part id: 1-64 characters, alphanumeric first, then `._/-`
pub fn validate_part_id(part_id: &str) -> Result<()> {
    let reason = if part_id.is_empty() {
        Some("part id cannot be empty".to_string())
    } else if part_id.len() > limits::MAX_PART_ID_LEN {
        Some(format!(
            "part id exceeds maximum length of {} characters",
            limits::MAX_PART_ID_LEN
        ))
    } else if !PART_ID_PATTERN.as_ref().is_some_and(|re| re.is_match(part_id)) {
        Some("part id may only contain letters, digits and . _ / -".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(VinfitError::InvalidPartId {
            part_id: part_id.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Validates and uppercases a WMI key for the registry
pub fn validate_wmi_key(wmi: &str) -> Result<String> {
    let key = wmi.trim().to_ascii_uppercase();
    let invalid = |reason: &str| VinfitError::InvalidWmi {
        wmi: wmi.to_string(),
        reason: reason.to_string(),
    };

    if key.chars().count() != 3 {
        return Err(invalid("must be exactly 3 characters"));
    }
    if !key.chars().all(is_allowed_char) {
        return Err(invalid("contains a character not allowed in a VIN"));
    }
    Ok(key)
}

/// Validates a make/model/engine/trim value
fn validate_attribute(field: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(VinfitError::invalid_rule(format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > limits::MAX_ATTRIBUTE_LEN {
        return Err(VinfitError::invalid_rule(format!(
            "{} exceeds maximum length of {} characters",
            field,
            limits::MAX_ATTRIBUTE_LEN
        )));
    }
    Ok(())
}

fn validate_year(field: &str, year: u16) -> Result<()> {
    if !(limits::MIN_YEAR..=limits::MAX_YEAR).contains(&year) {
        return Err(VinfitError::invalid_rule(format!(
            "{} {} outside {}-{}",
            field,
            year,
            limits::MIN_YEAR,
            limits::MAX_YEAR
        )));
    }
    Ok(())
}

/// Validates a compatibility rule from the parts catalog
pub fn validate_rule(rule: &CompatibilityRule) -> Result<()> {
    validate_attribute("make", &rule.make)?;
    if rule.make.trim() == scoring::WILDCARD {
        return Err(VinfitError::invalid_rule("make cannot be a wildcard"));
    }
    validate_attribute("model", &rule.model)?;

    if let Some(from) = rule.year_from {
        validate_year("year_from", from)?;
    }
    if let Some(to) = rule.year_to {
        validate_year("year_to", to)?;
    }
    if let (Some(from), Some(to)) = (rule.year_from, rule.year_to) {
        if from > to {
            return Err(VinfitError::invalid_rule(format!(
                "year_from {} is after year_to {}",
                from, to
            )));
        }
    }

    if let Some(engine) = &rule.engine_type {
        validate_attribute("engine_type", engine)?;
    }
    if let Some(trim) = &rule.trim {
        validate_attribute("trim", trim)?;
    }
    Ok(())
}

/// Validates every part id and rule of a catalog
pub fn validate_catalog(candidates: &[PartCandidate]) -> Result<()> {
    for candidate in candidates {
        validate_part_id(&candidate.part_id)?;
        for (idx, rule) in candidate.rules.iter().enumerate() {
            validate_rule(rule).map_err(|e| {
                VinfitError::invalid_rule(format!(
                    "part {} rule {}: {}",
                    candidate.part_id,
                    idx + 1,
                    rule_message(e)
                ))
            })?;
        }
    }
    Ok(())
}

/// Validates a vehicle descriptor supplied by a caller
pub fn validate_descriptor(vehicle: &VehicleDescriptor) -> Result<()> {
    validate_attribute("make", &vehicle.make)
        .and_then(|_| validate_attribute("model", &vehicle.model))
        .and_then(|_| validate_year("year", vehicle.year))
        .map_err(|e| VinfitError::invalid_config("vehicle", rule_message(e)))
}

/// Message of an attribute error without its variant prefix
fn rule_message(err: VinfitError) -> String {
    match err {
        VinfitError::InvalidRule(msg) => msg,
        other => other.to_string(),
    }
}

/// Validates scoring weights.
///
/// Partial credit may not exceed exact credit, the base must outweigh the
/// engine penalty so a make-and-model match never scores 0, and an all-exact
/// rule may not exceed the maximum score before trim fill.
pub fn validate_weights(weights: &ScoringWeights) -> Result<()> {
    let max = scoring::MAX_SCORE;
    let fields = [
        ("base", weights.base),
        ("model_exact", weights.model_exact),
        ("model_any", weights.model_any),
        ("year_in_range", weights.year_in_range),
        ("year_near_range", weights.year_near_range),
        ("engine_exact", weights.engine_exact),
        ("engine_any", weights.engine_any),
        ("engine_mismatch_penalty", weights.engine_mismatch_penalty),
    ];
    for (name, value) in fields {
        if value > max {
            return Err(VinfitError::InvalidWeights(format!(
                "{} is {} (must be 0-{})",
                name, value, max
            )));
        }
    }

    if weights.model_any > weights.model_exact {
        return Err(VinfitError::InvalidWeights(
            "model_any cannot exceed model_exact".to_string(),
        ));
    }
    if weights.year_near_range > weights.year_in_range {
        return Err(VinfitError::InvalidWeights(
            "year_near_range cannot exceed year_in_range".to_string(),
        ));
    }
    if weights.engine_any > weights.engine_exact {
        return Err(VinfitError::InvalidWeights(
            "engine_any cannot exceed engine_exact".to_string(),
        ));
    }
    if weights.base <= weights.engine_mismatch_penalty {
        return Err(VinfitError::InvalidWeights(
            "base must be greater than engine_mismatch_penalty".to_string(),
        ));
    }
    if weights.exact_total() > u16::from(max) {
        return Err(VinfitError::InvalidWeights(format!(
            "base + model_exact + year_in_range + engine_exact is {} (max {})",
            weights.exact_total(),
            max
        )));
    }
    if weights.year_tolerance > limits::MAX_YEAR_TOLERANCE {
        return Err(VinfitError::invalid_config(
            "year_tolerance",
            format!("must be at most {}", limits::MAX_YEAR_TOLERANCE),
        ));
    }
    Ok(())
}

/// Validates settings file size
pub fn validate_file_size(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| VinfitError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > limits::MAX_SETTINGS_SIZE {
        return Err(VinfitError::config(format!(
            "settings file exceeds maximum size of {} bytes",
            limits::MAX_SETTINGS_SIZE
        )));
    }

    Ok(())
}
