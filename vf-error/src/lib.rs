//! Unified error handling for vinfit
//!
//! This crate provides the error types used across all vinfit components.
//! `VinDecodeError` is the only error a VIN decode can produce; `VinfitError`
//! wraps it together with everything the configuration, catalog and batch
//! layers can fail with.

use std::io;
use std::path::PathBuf;

/// Result type alias using VinfitError
pub type Result<T> = std::result::Result<T, VinfitError>;

/// Reasons a VIN string is rejected before any field is decoded.
///
/// A length violation carries no position. A character violation carries the
/// first offending 1-based position and the character found there.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VinDecodeError {
    #[error("Invalid VIN format: {}", describe_format_violation(.length, .position, .character))]
    InvalidFormat {
        /// Character count of the rejected input
        length: usize,
        /// 1-based position of the first offending character
        position: Option<usize>,
        /// The offending character
        character: Option<char>,
    },
}

impl VinDecodeError {
    /// Input is not exactly 17 characters long
    pub fn invalid_length(length: usize) -> Self {
        Self::InvalidFormat {
            length,
            position: None,
            character: None,
        }
    }

    /// Input has a disallowed character at the given 1-based position
    pub fn invalid_character(position: usize, character: char) -> Self {
        Self::InvalidFormat {
            length: crate::VIN_LENGTH,
            position: Some(position),
            character: Some(character),
        }
    }

    /// 1-based position of the first offending character, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::InvalidFormat { position, .. } => *position,
        }
    }

    /// The offending character, if any
    pub fn character(&self) -> Option<char> {
        match self {
            Self::InvalidFormat { character, .. } => *character,
        }
    }
}

/// Length every VIN must have
pub const VIN_LENGTH: usize = 17;

/// 1-based position of the model-year code
pub const MODEL_YEAR_POSITION: usize = 10;

/// VIN characters that never appear as a model-year code
const NON_YEAR_CODES: [char; 3] = ['U', 'Z', '0'];

fn describe_format_violation(
    length: &usize,
    position: &Option<usize>,
    character: &Option<char>,
) -> String {
    match (position, character) {
        (Some(pos), Some(c)) if *pos == MODEL_YEAR_POSITION && NON_YEAR_CODES.contains(c) => {
            format!("character {:?} at position {} is not a model-year code", c, pos)
        }
        (Some(pos), Some(c)) => format!("character {:?} not allowed at position {}", c, pos),
        _ => format!("expected {} characters, got {}", VIN_LENGTH, length),
    }
}

/// Unified error type for all vinfit operations
#[derive(thiserror::Error, Debug)]
pub enum VinfitError {
    // ============================================================================
    // Decode Errors
    // ============================================================================
    #[error(transparent)]
    Decode(#[from] VinDecodeError),

    // ============================================================================
    // I/O and File System Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: io::Error,
    },

    // ============================================================================
    // Configuration and Settings Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },

    #[error("Invalid scoring weights: {0}")]
    InvalidWeights(String),

    // ============================================================================
    // Catalog Validation Errors
    // ============================================================================
    #[error("Invalid compatibility rule: {0}")]
    InvalidRule(String),

    #[error("Invalid part id {part_id:?}: {reason}")]
    InvalidPartId {
        part_id: String,
        reason: String,
    },

    #[error("Invalid WMI code {wmi:?}: {reason}")]
    InvalidWmi {
        wmi: String,
        reason: String,
    },

    // ============================================================================
    // Batch Protocol Errors
    // ============================================================================
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Message too large: {size} bytes (max {max_size} bytes)")]
    MessageTooLarge {
        size: usize,
        max_size: usize,
    },
}

impl VinfitError {
    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid rule error from a string
    pub fn invalid_rule(msg: impl Into<String>) -> Self {
        Self::InvalidRule(msg.into())
    }

    /// Create an invalid request error from a string
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}
