//! Engine Settings
//!
//! Persistent settings stored as JSON in ~/.config/vinfit/settings.json, or
//! wherever `$VINFIT_CONFIG` points.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::constants::{limits, paths};
use crate::data::{validate_file_size, validate_weights, validate_wmi_key};
use crate::error::{Result, VinfitError};
use crate::fitment::{FitmentMatcher, ScoringWeights};
use crate::wmi::{self, WmiOverride, WmiRegistry};

// ============================================================================
// Cached Settings
// ============================================================================

/// Settings loaded from disk, filled on first access
static SETTINGS_CACHE: OnceLock<RwLock<Option<EngineSettings>>> = OnceLock::new();

fn get_cache() -> &'static RwLock<Option<EngineSettings>> {
    SETTINGS_CACHE.get_or_init(|| RwLock::new(None))
}

/// Get cached settings, loading from disk on a cache miss.
///
/// A missing or broken settings file yields defaults and a warning.
pub fn get_cached_settings() -> EngineSettings {
    if let Some(settings) = get_cache().read().as_ref() {
        return settings.clone();
    }

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, "Falling back to default engine settings");
            EngineSettings::default()
        }
    };
    *get_cache().write() = Some(settings.clone());
    settings
}

/// Invalidate the settings cache (next access reloads from disk)
pub fn invalidate_settings_cache() {
    *get_cache().write() = None;
}

fn update_cache(settings: &EngineSettings) {
    *get_cache().write() = Some(settings.clone());
}

// ============================================================================
// Settings
// ============================================================================

/// Engine settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Fitment scoring weights and year tolerance
    pub scoring: ScoringWeights,

    /// Site-specific WMI entries layered over the built-in registry
    pub wmi_overrides: Vec<WmiOverride>,
}

impl EngineSettings {
    /// Check weights and overrides
    pub fn validate(&self) -> Result<()> {
        validate_weights(&self.scoring)?;

        if self.wmi_overrides.len() > limits::MAX_WMI_OVERRIDES {
            return Err(VinfitError::invalid_config(
                "wmi_overrides",
                format!("at most {} entries allowed", limits::MAX_WMI_OVERRIDES),
            ));
        }
        for ov in &self.wmi_overrides {
            validate_wmi_key(&ov.wmi)?;
        }
        Ok(())
    }

    /// Registry with this site's overrides applied
    pub fn registry(&self) -> Result<WmiRegistry> {
        wmi::builtin().with_overrides(&self.wmi_overrides)
    }

    /// Matcher using these scoring weights
    pub fn matcher(&self) -> FitmentMatcher {
        FitmentMatcher::new(self.scoring)
    }
}

/// Get the settings file path
///
/// `$VINFIT_CONFIG` wins; otherwise `settings.json` under the user config dir.
pub fn get_settings_path() -> Result<PathBuf> {
    if let Ok(custom) = std::env::var(paths::CONFIG_ENV_VAR) {
        if !custom.trim().is_empty() {
            return Ok(PathBuf::from(custom));
        }
    }

    let config_dir = paths::user_config_dir()
        .ok_or_else(|| VinfitError::config("Could not determine config directory"))?;
    Ok(config_dir.join(paths::SETTINGS_FILE))
}

/// Load settings from the default path
pub fn load_settings() -> Result<EngineSettings> {
    load_settings_from(&get_settings_path()?)
}

/// Load settings from a JSON file. A missing file yields defaults.
pub fn load_settings_from(path: &Path) -> Result<EngineSettings> {
    if !path.exists() {
        debug!(path = %path.display(), "No settings file, using defaults");
        return Ok(EngineSettings::default());
    }

    validate_file_size(path)?;

    let content = fs::read_to_string(path).map_err(|e| VinfitError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let settings: EngineSettings = serde_json::from_str(&content).map_err(|e| {
        VinfitError::config(format!(
            "Failed to parse settings JSON {}: {}",
            path.display(),
            e
        ))
    })?;

    settings.validate()?;
    Ok(settings)
}

/// Save settings to the default path and refresh the cache
pub fn save_settings(settings: &EngineSettings) -> Result<()> {
    save_settings_to(settings, &get_settings_path()?)?;
    update_cache(settings);
    Ok(())
}

/// Save settings as pretty JSON.
/// Writes a temp file and renames it over the target.
pub fn save_settings_to(settings: &EngineSettings, path: &Path) -> Result<()> {
    settings.validate()?;

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                VinfitError::config(format!("Failed to create config directory: {}", e))
            })?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;

    let temp_path = path.with_extension("json.tmp");
    let write_err = |e: std::io::Error| VinfitError::FileWrite {
        path: temp_path.clone(),
        source: e,
    };

    let mut file = fs::File::create(&temp_path).map_err(write_err)?;
    file.write_all(json.as_bytes()).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| VinfitError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), "Saved engine settings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::VehicleDescriptor;

    #[test]
    fn test_default_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.scoring, ScoringWeights::default());
        assert!(settings.wmi_overrides.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = EngineSettings::default();
        settings.scoring.year_tolerance = 2;
        settings.wmi_overrides.push(WmiOverride {
            wmi: "ZZZ".to_string(),
            manufacturer: "Local Coachbuilder".to_string(),
            make: None,
            country: "Italy".to_string(),
        });

        save_settings_to(&settings, &path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(
            loaded.registry().unwrap().lookup("ZZZ").unwrap().country,
            "Italy"
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"scoring": {"engine_mismatch_penalty": 20}}"#).unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded.scoring.engine_mismatch_penalty, 20);
        assert_eq!(loaded.scoring.base, 40);
        assert!(loaded.wmi_overrides.is_empty());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_settings_from(&path).is_err());
    }

    #[test]
    fn test_invalid_weights_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"scoring": {"model_exact": 90}}"#).unwrap();
        assert!(matches!(
            load_settings_from(&path),
            Err(VinfitError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_invalid_override_rejected_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = EngineSettings {
            wmi_overrides: vec![WmiOverride {
                wmi: "TOOLONG".to_string(),
                manufacturer: "X".to_string(),
                make: None,
                country: "Y".to_string(),
            }],
            ..EngineSettings::default()
        };
        assert!(save_settings_to(&settings, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_matcher_uses_configured_weights() {
        let mut settings = EngineSettings::default();
        settings.scoring.engine_mismatch_penalty = 20;

        let vehicle = VehicleDescriptor::new("Honda", "Civic", 2021).with_engine_type("1.5T");
        let rule = crate::data::CompatibilityRule::new("Honda", "Civic")
            .years(Some(2016), Some(2021))
            .with_engine_type("2.0");
        assert_eq!(settings.matcher().score_rule(&vehicle, &rule).score, 70);
    }
}
