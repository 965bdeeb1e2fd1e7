//! World Manufacturer Identifier registry
//!
//! Maps the first three VIN characters to a manufacturer, marketing make and
//! country. The built-in table is built once per process and never changes;
//! site-specific entries are layered on by building a new registry.

mod table;

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::validate_wmi_key;
use crate::error::Result;

/// Value reported for manufacturer and country when a WMI is not registered
pub const UNKNOWN: &str = "Unknown";

lazy_static! {
    static ref BUILTIN_REGISTRY: WmiRegistry = WmiRegistry::builtin_table();
}

/// One registry row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WmiEntry {
    pub manufacturer: String,
    /// Marketing make used for fitment, e.g. "Honda" for "Honda of America Mfg."
    pub make: String,
    pub country: String,
}

/// Site-specific registry entry loaded from settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WmiOverride {
    pub wmi: String,
    pub manufacturer: String,
    /// Defaults to the manufacturer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    pub country: String,
}

/// Source of manufacturer data for the decoder
pub trait ManufacturerLookup {
    /// Entry for an uppercase 3-character WMI, `None` when unregistered
    fn lookup_wmi(&self, wmi: &str) -> Option<WmiEntry>;
}

/// Immutable WMI lookup table
#[derive(Debug, Clone, Default)]
pub struct WmiRegistry {
    entries: HashMap<String, WmiEntry>,
}

impl WmiRegistry {
    /// Registry holding the built-in dataset
    fn builtin_table() -> Self {
        let entries = table::BUILTIN
            .iter()
            .map(|(wmi, manufacturer, make, country)| {
                (
                    (*wmi).to_string(),
                    WmiEntry {
                        manufacturer: (*manufacturer).to_string(),
                        make: (*make).to_string(),
                        country: (*country).to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Build a registry from explicit rows. Keys are uppercased.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, WmiEntry)>,
        K: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_ascii_uppercase(), v))
                .collect(),
        }
    }

    /// New registry with `overrides` layered over this one.
    ///
    /// Fails on the first override whose key is not three valid VIN characters.
    pub fn with_overrides(&self, overrides: &[WmiOverride]) -> Result<Self> {
        let mut entries = self.entries.clone();
        for ov in overrides {
            let key = validate_wmi_key(&ov.wmi)?;
            let entry = WmiEntry {
                manufacturer: ov.manufacturer.clone(),
                make: ov.make.clone().unwrap_or_else(|| ov.manufacturer.clone()),
                country: ov.country.clone(),
            };
            if entries.insert(key.clone(), entry).is_some() {
                debug!(wmi = %key, "WMI override replaces built-in entry");
            }
        }
        Ok(Self { entries })
    }

    /// Look up an uppercase 3-character WMI
    pub fn lookup(&self, wmi: &str) -> Option<&WmiEntry> {
        self.entries.get(wmi)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All rows, sorted by WMI
    pub fn iter_sorted(&self) -> Vec<(&str, &WmiEntry)> {
        let mut rows: Vec<_> = self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }
}

impl ManufacturerLookup for WmiRegistry {
    fn lookup_wmi(&self, wmi: &str) -> Option<WmiEntry> {
        self.lookup(wmi).cloned()
    }
}

impl<L: ManufacturerLookup + ?Sized> ManufacturerLookup for &L {
    fn lookup_wmi(&self, wmi: &str) -> Option<WmiEntry> {
        (**self).lookup_wmi(wmi)
    }
}

/// The process-wide built-in registry
pub fn builtin() -> &'static WmiRegistry {
    &BUILTIN_REGISTRY
}

/// Look up a WMI in the built-in registry
pub fn lookup(wmi: &str) -> Option<&'static WmiEntry> {
    BUILTIN_REGISTRY.lookup(wmi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_known() {
        let entry = lookup("1HG").unwrap();
        assert_eq!(entry.make, "Honda");
        assert_eq!(entry.country, "United States");
    }

    #[test]
    fn test_builtin_lookup_unknown_is_none() {
        assert!(lookup("ZZZ").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_builtin_keys_are_valid_wmis() {
        for (wmi, _) in builtin().iter_sorted() {
            assert!(validate_wmi_key(wmi).is_ok(), "bad built-in key {}", wmi);
        }
    }

    #[test]
    fn test_overrides_replace_and_extend() {
        let overrides = vec![
            WmiOverride {
                wmi: "1hg".to_string(),
                manufacturer: "Honda Ohio Plant".to_string(),
                make: Some("Honda".to_string()),
                country: "United States".to_string(),
            },
            WmiOverride {
                wmi: "ZZZ".to_string(),
                manufacturer: "Local Coachbuilder".to_string(),
                make: None,
                country: "Italy".to_string(),
            },
        ];
        let registry = builtin().with_overrides(&overrides).unwrap();
        assert_eq!(registry.lookup("1HG").unwrap().manufacturer, "Honda Ohio Plant");
        assert_eq!(registry.lookup("ZZZ").unwrap().make, "Local Coachbuilder");
        assert_eq!(registry.len(), builtin().len() + 1);
        // the built-in registry is untouched
        assert_eq!(lookup("1HG").unwrap().manufacturer, "Honda of America Mfg.");
    }

    #[test]
    fn test_override_with_bad_key_fails() {
        let overrides = vec![WmiOverride {
            wmi: "1HI".to_string(),
            manufacturer: "Nope".to_string(),
            make: None,
            country: "Nowhere".to_string(),
        }];
        assert!(builtin().with_overrides(&overrides).is_err());
    }

    #[test]
    fn test_from_entries_uppercases_keys() {
        let registry = WmiRegistry::from_entries(vec![(
            "abc",
            WmiEntry {
                manufacturer: "A".to_string(),
                make: "A".to_string(),
                country: "B".to_string(),
            },
        )]);
        assert!(registry.lookup("ABC").is_some());
        assert_eq!(registry.lookup_wmi("ABC").unwrap().country, "B");
    }
}
