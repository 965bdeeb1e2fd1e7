/*
 * This file is part of vinfit.
 *
 * Copyright (C) 2025 vinfit contributors
 *
 * vinfit is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * vinfit is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with vinfit. If not, see <https://www.gnu.org/licenses/>.
 */

//! Vehicle and parts-catalog files for the `match` command
//!
//! A vehicle file holds one `VehicleDescriptor` object; a catalog file holds
//! an array of parts, each with its compatibility rules. Both are validated
//! on load so a broken row is reported with its part id instead of silently
//! scoring 0.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;
use vf_core::{validate_catalog, validate_descriptor, PartCandidate, VehicleDescriptor};
use vf_error::{Result, VinfitError};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| VinfitError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}

pub fn load_vehicle(path: &Path) -> Result<VehicleDescriptor> {
    let vehicle: VehicleDescriptor = read_json(path)?;
    validate_descriptor(&vehicle)?;
    Ok(vehicle)
}

pub fn load_catalog(path: &Path) -> Result<Vec<PartCandidate>> {
    let parts: Vec<PartCandidate> = read_json(path)?;
    validate_catalog(&parts)?;
    debug!(path = %path.display(), parts = parts.len(), "Catalog loaded");
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_vehicle() {
        let file = write_temp(r#"{"make":"Honda","model":"Civic","year":2021,"engine_type":"1.5T"}"#);
        let vehicle = load_vehicle(file.path()).unwrap();
        assert_eq!(vehicle.engine_type.as_deref(), Some("1.5T"));
        assert!(vehicle.trim.is_none());
    }

    #[test]
    fn test_load_vehicle_rejects_blank_make() {
        let file = write_temp(r#"{"make":"","model":"Civic","year":2021}"#);
        assert!(load_vehicle(file.path()).is_err());
    }

    #[test]
    fn test_load_catalog() {
        let file = write_temp(
            r#"[
                {"part_id":"P1","rules":[{"make":"Honda","model":"Civic","year_from":2016,"year_to":2021}]},
                {"part_id":"P2"}
            ]"#,
        );
        let parts = load_catalog(file.path()).unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[1].rules.is_empty());
    }

    #[test]
    fn test_load_catalog_reports_bad_rule() {
        let file = write_temp(
            r#"[{"part_id":"P9","rules":[{"make":"Honda","model":"Civic","year_from":2021,"year_to":2016}]}]"#,
        );
        let err = load_catalog(file.path()).unwrap_err().to_string();
        assert!(err.contains("P9"), "{}", err);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, VinfitError::FileRead { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let file = write_temp("[{");
        assert!(matches!(load_catalog(file.path()), Err(VinfitError::JsonParse(_))));
    }
}
