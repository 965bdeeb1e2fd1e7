//! Error types re-exported from vf-error

pub use vf_error::{Result, VinDecodeError, VinfitError};
