//! VIN decoder
//!
//! Only format validation can fail a decode. An unregistered WMI or a wrong
//! check digit still produce a complete `DecodedVehicle`; the caller decides
//! how much to trust it.

use tracing::debug;
use vf_error::VinDecodeError;

use super::checksum::expected_check_digit;
use super::model_year::resolve_model_year;
use super::segments::{validate_format, VinSegments};
use crate::constants::{model_year, vin};
use crate::data::{DecodedFields, DecodedVehicle, Region};
use crate::wmi::{self, ManufacturerLookup, WmiRegistry};

/// Decoder bound to a manufacturer lookup
#[derive(Debug, Clone)]
pub struct VinDecoder<L> {
    lookup: L,
}

impl VinDecoder<&'static WmiRegistry> {
    /// Decoder over the built-in registry
    pub fn builtin() -> Self {
        Self::new(wmi::builtin())
    }
}

impl<L: ManufacturerLookup> VinDecoder<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Decode a 17-character VIN
    pub fn decode(&self, vin: &str) -> Result<DecodedVehicle, VinDecodeError> {
        let chars = validate_format(vin).map_err(|e| {
            debug!(error = %e, "VIN rejected");
            e
        })?;
        let segments = VinSegments::from_validated(&chars);

        let check_digit_valid = segments.check_digit() == expected_check_digit(&chars);

        let (manufacturer, country) = match self.lookup.lookup_wmi(segments.wmi()) {
            Some(entry) => (entry.manufacturer, entry.country),
            None => (wmi::UNKNOWN.to_string(), wmi::UNKNOWN.to_string()),
        };

        // validate_format already restricted position 10 to cycle symbols
        let model_year = resolve_model_year(segments.model_year_code(), segments.cycle_selector())
            .unwrap_or(model_year::LEGACY_CYCLE_START);

        let decoded = DecodedVehicle::from_fields(DecodedFields {
            manufacturer,
            country,
            region: Region::from_first_char(chars[0]),
            model_year,
            model_year_code: segments.model_year_code(),
            wmi: segments.wmi().to_string(),
            vds_raw: segments.vds().to_string(),
            plant_code: segments.plant_code(),
            serial: segments.serial().to_string(),
            check_digit_valid,
        });

        debug!(
            wmi = decoded.wmi(),
            manufacturer = decoded.manufacturer(),
            model_year = decoded.model_year(),
            check_digit_valid,
            "VIN decoded"
        );
        if !check_digit_valid {
            debug!(
                found = %chars[vin::CHECK_DIGIT_INDEX],
                expected = %expected_check_digit(&chars),
                "VIN check digit mismatch"
            );
        }

        Ok(decoded)
    }
}

/// Decode a VIN against the built-in registry
pub fn decode(vin: &str) -> Result<DecodedVehicle, VinDecodeError> {
    VinDecoder::builtin().decode(vin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wmi::WmiEntry;

    #[test]
    fn test_decode_reference_vin() {
        let v = decode("1HGBH41JXMN109186").unwrap();
        assert_eq!(v.manufacturer(), "Honda of America Mfg.");
        assert_eq!(v.country(), "United States");
        assert_eq!(v.region(), Region::NorthAmerica);
        // position 7 is '1', so 'M' resolves in the 1980-2009 cycle
        assert_eq!(v.model_year(), 1991);
        assert_eq!(v.model_year_code(), 'M');
        assert_eq!(v.wmi(), "1HG");
        assert_eq!(v.vds_raw(), "BH41J");
        assert_eq!(v.plant_code(), 'N');
        assert_eq!(v.serial(), "109186");
        assert!(v.check_digit_valid());
        assert!(v.is_manufacturer_known());
    }

    #[test]
    fn test_alphabetic_position_seven_selects_current_cycle() {
        let v = decode("5YJ3E1EA7MF000001").unwrap();
        assert_eq!(v.manufacturer(), "Tesla");
        assert_eq!(v.model_year(), 2021);
    }

    #[test]
    fn test_corrupted_check_digit_keeps_other_fields() {
        let good = decode("1HGBH41JXMN109186").unwrap();
        let bad = decode("1HGBH41J5MN109186").unwrap();
        assert!(!bad.check_digit_valid());
        assert_eq!(good.manufacturer(), bad.manufacturer());
        assert_eq!(good.country(), bad.country());
        assert_eq!(good.model_year(), bad.model_year());
        assert_eq!(good.vds_raw(), bad.vds_raw());
        assert_eq!(good.serial(), bad.serial());
        assert_eq!(good.plant_code(), bad.plant_code());
    }

    #[test]
    fn test_unknown_wmi_is_not_an_error() {
        let v = decode("ZZZBH41JXMN109186").unwrap();
        assert_eq!(v.manufacturer(), "Unknown");
        assert_eq!(v.country(), "Unknown");
        assert!(!v.is_manufacturer_known());
        assert_eq!(v.region(), Region::Europe);
    }

    #[test]
    fn test_short_vin_rejected() {
        let err = decode("1HGBH41JXMN10918").unwrap_err();
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_custom_registry() {
        let registry = WmiRegistry::from_entries(vec![(
            "1HG",
            WmiEntry {
                manufacturer: "Test Motors".to_string(),
                make: "Test".to_string(),
                country: "Testland".to_string(),
            },
        )]);
        let v = VinDecoder::new(&registry).decode("1HGBH41JXMN109186").unwrap();
        assert_eq!(v.manufacturer(), "Test Motors");
        assert_eq!(v.country(), "Testland");
    }

    #[test]
    fn test_decode_is_deterministic() {
        let a = decode("JHMCM56557C404453").unwrap();
        let b = decode("JHMCM56557C404453").unwrap();
        assert_eq!(a, b);
    }
}
