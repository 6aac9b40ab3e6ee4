use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A vehicle record, keyed by its VIN.
///
/// The same shape serves as the JSON wire representation and the stored
/// document; storage-side extras such as `_id` are ignored on read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub manufacturer: String,
    pub model: String,
    pub vin: String,
    pub regno: String,
}

/// The VIN is the unique business key; it must be non-blank.
pub fn validate_vin(vin: &str) -> Result<(), ModelError> {
    if vin.trim().is_empty() {
        return Err(ModelError::Validation("vin must not be empty".into()));
    }
    Ok(())
}

impl Vehicle {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_vin(&self.vin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_vin() {
        assert!(validate_vin("").is_err());
        assert!(validate_vin("   ").is_err());
        assert!(validate_vin("1FAFP34P06W102341").is_ok());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let vehicle = Vehicle {
            manufacturer: "Ford".into(),
            model: "Focus".into(),
            vin: "1FAFP34P06W102341".into(),
            regno: "AB12CDE".into(),
        };
        let json = serde_json::to_value(&vehicle).expect("serialize");
        assert_eq!(json["manufacturer"], "Ford");
        assert_eq!(json["vin"], "1FAFP34P06W102341");
        assert_eq!(json["regno"], "AB12CDE");
    }

    #[test]
    fn ignores_unknown_fields_on_read() {
        let vehicle: Vehicle = serde_json::from_value(serde_json::json!({
            "_id": "652f0c7e9b1e8a0001a2b3c4",
            "manufacturer": "Ford",
            "model": "Focus",
            "vin": "1FAFP34P06W102341",
            "regno": "AB12CDE"
        }))
        .expect("deserialize");
        assert_eq!(vehicle.model, "Focus");
    }
}
