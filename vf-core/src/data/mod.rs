//! Data types and validation modules
//!
//! Contains the decoded-vehicle, catalog and fitment-result structures plus
//! the checks applied where catalog data and settings enter the system.

mod types;
mod validation;

pub(crate) use types::DecodedFields;
pub use types::{
    CompatibilityRule, DecodedVehicle, FitmentConfidence, FitmentResult, PartCandidate, Region,
    VehicleDescriptor,
};
pub use validation::{
    validate_catalog, validate_descriptor, validate_file_size, validate_part_id, validate_rule,
    validate_weights, validate_wmi_key,
};
