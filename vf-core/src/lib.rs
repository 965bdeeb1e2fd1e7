//! vinfit Core Library
//!
//! VIN decoding and parts fitment matching for parts counters and workshops.
//!
//! # Features
//!
//! - **VIN Decoding**: ISO 3779 structure, check digit and model year
//! - **WMI Registry**: Manufacturer, make and country lookup with site overrides
//! - **Fitment Matching**: Deterministic rule-and-score ranking of parts per vehicle
//! - **Configuration**: Persistent scoring weights and WMI overrides
//!
//! # Module Structure
//!
//! - `vin/` - VIN segments, check digit, model year, decoder
//! - `wmi/` - World Manufacturer Identifier registry
//! - `fitment/` - Scoring weights and matcher
//! - `data/` - Data types and validation
//!
//! # Example
//!
//! ```
//! use vf_core::{decode, match_parts, CompatibilityRule, PartCandidate, VehicleDescriptor};
//!
//! let decoded = decode("1HGBH41JXMN109186").unwrap();
//! assert!(decoded.check_digit_valid());
//!
//! let vehicle = VehicleDescriptor::from_decoded(&decoded, "Accord");
//! let parts = vec![PartCandidate::new(
//!     "OIL-FILTER-1",
//!     vec![CompatibilityRule::new("Honda", "*")],
//! )];
//! let ranked = match_parts(&vehicle, &parts);
//! assert!(ranked[0].score > 0);
//! ```

// Grouped modules
pub mod data;
pub mod fitment;
pub mod vin;
pub mod wmi;

// Standalone modules
pub mod constants;
pub mod error;
pub mod settings;

// Re-export primary types from data/
pub use data::{
    CompatibilityRule, DecodedVehicle, FitmentConfidence, FitmentResult, PartCandidate, Region,
    VehicleDescriptor,
};

// Re-export validation functions from data/
pub use data::{
    validate_catalog, validate_descriptor, validate_file_size, validate_part_id, validate_rule,
    validate_weights, validate_wmi_key,
};

// Re-export error types
pub use error::{Result, VinDecodeError, VinfitError};

// Re-export VIN functions
pub use vin::{
    compute_check_digit, decode, is_check_digit_valid, normalize_vin, resolve_model_year,
    validate_format, VinDecoder, VinSegments, YearCycle,
};

// Re-export registry types
pub use wmi::{ManufacturerLookup, WmiEntry, WmiOverride, WmiRegistry};

// Re-export fitment types
pub use fitment::{match_parts, rank, FitmentMatcher, RuleScore, ScoringWeights};

// Re-export settings functions
pub use settings::{
    get_cached_settings, get_settings_path, invalidate_settings_cache, load_settings,
    load_settings_from, save_settings, save_settings_to, EngineSettings,
};
