//! Constants and configuration values for vinfit
//!
//! Centralizes the VIN tables, default scoring weights, limits and paths.
//! Other modules read their magic numbers from here.

/// Configuration paths
pub mod paths {
    /// Directory name under the user's config dir
    pub const CONFIG_DIR_NAME: &str = "vinfit";

    /// Settings file name
    pub const SETTINGS_FILE: &str = "settings.json";

    /// Event log file name under the user's data dir
    pub const EVENT_LOG_FILE: &str = "events.json";

    /// Environment variable that overrides the settings path
    pub const CONFIG_ENV_VAR: &str = "VINFIT_CONFIG";

    /// Get the vinfit config directory.
    ///
    /// `$XDG_CONFIG_HOME/vinfit`, else `$HOME/.config/vinfit`, else the
    /// platform config dir from `dirs`.
    pub fn user_config_dir() -> Option<std::path::PathBuf> {
        let config_base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            Some(std::path::PathBuf::from(xdg))
        } else if let Ok(home) = std::env::var("HOME") {
            Some(std::path::PathBuf::from(home).join(".config"))
        } else {
            dirs::config_dir()
        };

        config_base.map(|base| base.join(CONFIG_DIR_NAME))
    }

    /// Get the vinfit data directory (event log lives here)
    pub fn user_data_dir() -> Option<std::path::PathBuf> {
        dirs::data_dir().map(|base| base.join(CONFIG_DIR_NAME))
    }
}

/// VIN layout and ISO 3779 check-digit tables
pub mod vin {
    /// Length of every VIN
    pub const LENGTH: usize = vf_error::VIN_LENGTH;

    /// Characters never used in a VIN (confusable with 1 and 0)
    pub const FORBIDDEN_CHARS: [char; 3] = ['I', 'O', 'Q'];

    /// Segment boundaries as 0-based half-open ranges
    pub const WMI_RANGE: std::ops::Range<usize> = 0..3;
    pub const VDS_RANGE: std::ops::Range<usize> = 3..8;
    pub const CHECK_DIGIT_INDEX: usize = 8;
    pub const MODEL_YEAR_INDEX: usize = 9;
    pub const PLANT_CODE_INDEX: usize = 10;
    pub const SERIAL_RANGE: std::ops::Range<usize> = 11..17;

    /// Position 7 (0-based index 6) selects the model-year cycle
    pub const CYCLE_SELECTOR_INDEX: usize = 6;

    /// Positional weights for the check-digit sum; index 8 is the check digit itself
    pub const CHECK_DIGIT_WEIGHTS: [u32; LENGTH] =
        [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

    /// Modulus of the check-digit sum
    pub const CHECK_DIGIT_MODULUS: u32 = 11;

    /// Check-digit character used for a remainder of 10
    pub const CHECK_DIGIT_TEN: char = 'X';
}

/// Model-year cycle table
pub mod model_year {
    /// The 30 symbols of the model-year cycle, in year order
    pub const CYCLE: [char; 30] = [
        'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'R',
        'S', 'T', 'V', 'W', 'X', 'Y', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    ];

    /// First year of the cycle used when position 7 is numeric
    pub const LEGACY_CYCLE_START: u16 = 1980;

    /// First year of the cycle used when position 7 is alphabetic
    pub const CURRENT_CYCLE_START: u16 = 2010;

    /// Length of one cycle in years
    pub const CYCLE_YEARS: u16 = 30;
}

/// Default fitment scoring weights
pub mod scoring {
    /// Awarded once the make matches
    pub const BASE: u8 = 40;

    /// Exact model match
    pub const MODEL_EXACT: u8 = 30;

    /// Wildcard model rule
    pub const MODEL_ANY: u8 = 10;

    /// Vehicle year inside the rule's range
    pub const YEAR_IN_RANGE: u8 = 20;

    /// Vehicle year within the tolerance outside the range
    pub const YEAR_NEAR_RANGE: u8 = 10;

    /// Exact engine match
    pub const ENGINE_EXACT: u8 = 10;

    /// Engine wildcard or unknown on either side
    pub const ENGINE_ANY: u8 = 5;

    /// Subtracted on an explicit engine mismatch
    pub const ENGINE_MISMATCH_PENALTY: u8 = 10;

    /// Years outside a rule's range that still earn partial credit
    pub const YEAR_TOLERANCE: u16 = 1;

    /// Highest possible score
    pub const MAX_SCORE: u8 = 100;

    /// Wildcard marker in compatibility rules
    pub const WILDCARD: &str = "*";
}

/// Confidence bands over fitment scores
pub mod confidence {
    /// Minimum score for the high band
    pub const HIGH: u8 = 80;

    /// Minimum score for the medium band
    pub const MEDIUM: u8 = 50;
}

/// Size and sanity limits
pub mod limits {
    /// Maximum settings file size (1MB)
    pub const MAX_SETTINGS_SIZE: u64 = 1024 * 1024;

    /// Maximum part id length
    pub const MAX_PART_ID_LEN: usize = 64;

    /// Maximum make/model/engine/trim length
    pub const MAX_ATTRIBUTE_LEN: usize = 64;

    /// Earliest year a rule or descriptor may name
    pub const MIN_YEAR: u16 = 1900;

    /// Latest year a rule or descriptor may name
    pub const MAX_YEAR: u16 = 2100;

    /// Largest accepted year tolerance
    pub const MAX_YEAR_TOLERANCE: u16 = 5;

    /// Maximum number of WMI overrides in settings
    pub const MAX_WMI_OVERRIDES: usize = 1024;
}
