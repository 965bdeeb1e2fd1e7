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

//! Conversions between engine types and batch wire types

use vf_core::{
    CompatibilityRule, DecodedVehicle, FitmentResult, PartCandidate, VehicleDescriptor, WmiEntry,
};
use vf_protocol::{DecodedVin, Fitment, Part, Rule, Vehicle, WmiInfo};

pub fn vehicle_from_wire(vehicle: Vehicle) -> VehicleDescriptor {
    VehicleDescriptor {
        make: vehicle.make,
        model: vehicle.model,
        year: vehicle.year,
        engine_type: vehicle.engine_type,
        trim: vehicle.trim,
        body_type: vehicle.body_type,
    }
}

pub fn vehicle_to_wire(vehicle: &VehicleDescriptor) -> Vehicle {
    Vehicle {
        make: vehicle.make.clone(),
        model: vehicle.model.clone(),
        year: vehicle.year,
        engine_type: vehicle.engine_type.clone(),
        trim: vehicle.trim.clone(),
        body_type: vehicle.body_type.clone(),
    }
}

pub fn rule_from_wire(rule: Rule) -> CompatibilityRule {
    CompatibilityRule {
        make: rule.make,
        model: rule.model,
        year_from: rule.year_from,
        year_to: rule.year_to,
        engine_type: rule.engine_type,
        trim: rule.trim,
    }
}

pub fn rule_to_wire(rule: &CompatibilityRule) -> Rule {
    Rule {
        make: rule.make.clone(),
        model: rule.model.clone(),
        year_from: rule.year_from,
        year_to: rule.year_to,
        engine_type: rule.engine_type.clone(),
        trim: rule.trim.clone(),
    }
}

pub fn parts_from_wire(parts: Vec<Part>) -> Vec<PartCandidate> {
    parts
        .into_iter()
        .map(|p| PartCandidate::new(p.part_id, p.rules.into_iter().map(rule_from_wire).collect()))
        .collect()
}

pub fn decoded_to_wire(vin: &str, decoded: &DecodedVehicle) -> DecodedVin {
    DecodedVin {
        vin: vin.to_string(),
        manufacturer: decoded.manufacturer().to_string(),
        country: decoded.country().to_string(),
        region: decoded.region().to_string(),
        model_year: decoded.model_year(),
        model_year_code: decoded.model_year_code().to_string(),
        wmi: decoded.wmi().to_string(),
        vds: decoded.vds_raw().to_string(),
        plant_code: decoded.plant_code().to_string(),
        serial: decoded.serial().to_string(),
        check_digit_valid: decoded.check_digit_valid(),
    }
}

pub fn fitment_to_wire(result: &FitmentResult) -> Fitment {
    Fitment {
        part_id: result.part_id.clone(),
        score: result.score,
        confidence: result.confidence().as_str().to_string(),
        matched_rule: result.matched_rule.as_ref().map(rule_to_wire),
        reasons: result.reasons.clone(),
    }
}

pub fn wmi_to_wire(wmi: &str, entry: &WmiEntry) -> WmiInfo {
    WmiInfo {
        wmi: wmi.to_string(),
        manufacturer: entry.manufacturer.clone(),
        make: entry.make.clone(),
        country: entry.country.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_to_wire() {
        let decoded = vf_core::decode("1HGBH41JXMN109186").unwrap();
        let wire = decoded_to_wire("1HGBH41JXMN109186", &decoded);
        assert_eq!(wire.wmi, "1HG");
        assert_eq!(wire.vds, "BH41J");
        assert_eq!(wire.model_year, 1991);
        assert_eq!(wire.model_year_code, "M");
        assert_eq!(wire.plant_code, "N");
        assert_eq!(wire.region, "North America");
        assert!(wire.check_digit_valid);
    }

    #[test]
    fn test_vehicle_round_trip_keeps_optional_fields() {
        let vehicle = VehicleDescriptor::new("Honda", "Civic", 2021)
            .with_engine_type("1.5T")
            .with_body_type("Sedan");
        assert_eq!(vehicle_from_wire(vehicle_to_wire(&vehicle)), vehicle);
    }

    #[test]
    fn test_fitment_to_wire_reports_band() {
        let result = FitmentResult {
            part_id: "P1".to_string(),
            score: 80,
            matched_rule: Some(CompatibilityRule::new("Honda", "Civic")),
            reasons: vec!["make matched: Honda".to_string()],
        };
        let wire = fitment_to_wire(&result);
        assert_eq!(wire.confidence, "high");
        assert_eq!(wire.matched_rule.unwrap().model, "Civic");
    }
}
