//! Input range checks
//!
//! Out-of-range values become field-keyed messages and are dropped, so only
//! the results that depend on them go missing.

use serde::{Deserialize, Serialize};

use super::enteral::MAX_DAILY_VOLUME_ML;
use crate::models::PatientInput;

pub const AGE_RANGE: (i32, i32) = (0, 129);
pub const HEIGHT_RANGE: (f64, f64) = (30.0, 249.9);
pub const WEIGHT_RANGE: (f64, f64) = (0.5, 299.9);
pub const CREATININE_RANGE: (f64, f64) = (0.01, 30.0);
pub const ENTERAL_VOLUME_RANGE: (i64, i64) = (1, MAX_DAILY_VOLUME_ML);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatedField {
    Age,
    Height,
    Weight,
    SerumCreatinine,
    /// Daily enteral volume, typed or derived from the energy value
    EnteralVolume,
}

impl ValidatedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatedField::Age => "age",
            ValidatedField::Height => "height",
            ValidatedField::Weight => "weight",
            ValidatedField::SerumCreatinine => "serum_creatinine",
            ValidatedField::EnteralVolume => "enteral_volume",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: ValidatedField,
    pub message: String,
}

/// Patient measurements that passed their range checks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValidatedPatient {
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub serum_creatinine: Option<f64>,
}

pub fn validate(patient: &PatientInput) -> (ValidatedPatient, Vec<ValidationError>) {
    let mut errors = Vec::new();

    let age = match patient.age {
        Some(a) if (AGE_RANGE.0..=AGE_RANGE.1).contains(&a) => Some(a as u32),
        Some(_) => {
            errors.push(error(
                ValidatedField::Age,
                format!("Age must be between {} and {} years", AGE_RANGE.0, AGE_RANGE.1),
            ));
            None
        }
        None => None,
    };

    let height = check_range(
        patient.height,
        HEIGHT_RANGE,
        ValidatedField::Height,
        "Height",
        "cm",
        &mut errors,
    );
    let weight = check_range(
        patient.weight,
        WEIGHT_RANGE,
        ValidatedField::Weight,
        "Weight",
        "kg",
        &mut errors,
    );
    let serum_creatinine = check_range(
        patient.serum_creatinine,
        CREATININE_RANGE,
        ValidatedField::SerumCreatinine,
        "Serum creatinine",
        "mg/dL",
        &mut errors,
    );

    for e in &errors {
        tracing::warn!("Validation failed for {}: {}", e.field.as_str(), e.message);
    }

    (
        ValidatedPatient {
            age,
            height,
            weight,
            serum_creatinine,
        },
        errors,
    )
}

/// Range check for an enteral dose before it is split into packages
pub fn check_enteral_volume(volume_ml: i64) -> Result<i64, ValidationError> {
    if (ENTERAL_VOLUME_RANGE.0..=ENTERAL_VOLUME_RANGE.1).contains(&volume_ml) {
        return Ok(volume_ml);
    }
    let e = error(
        ValidatedField::EnteralVolume,
        format!(
            "Enteral volume must be between {} and {} mL/day, got {}",
            ENTERAL_VOLUME_RANGE.0, ENTERAL_VOLUME_RANGE.1, volume_ml
        ),
    );
    tracing::warn!("Validation failed for {}: {}", e.field.as_str(), e.message);
    Err(e)
}

fn check_range(
    value: Option<f64>,
    (min, max): (f64, f64),
    field: ValidatedField,
    label: &str,
    unit: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<f64> {
    let v = value?;
    if v.is_finite() && v >= min && v <= max {
        Some(v)
    } else {
        errors.push(error(
            field,
            format!("{} must be between {} and {} {}", label, min, max, unit),
        ));
        None
    }
}

fn error(field: ValidatedField, message: String) -> ValidationError {
    ValidationError { field, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(age: Option<i32>, height: Option<f64>, weight: Option<f64>) -> PatientInput {
        PatientInput {
            age,
            height,
            weight,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_input_passes() {
        let (v, errors) = validate(&patient(Some(30), Some(170.0), Some(60.0)));
        assert!(errors.is_empty());
        assert_eq!(v.age, Some(30));
        assert_eq!(v.height, Some(170.0));
        assert_eq!(v.weight, Some(60.0));
        assert_eq!(v.serum_creatinine, None);
    }

    #[test]
    fn test_bounds_inclusive() {
        let (v, errors) = validate(&patient(Some(129), Some(30.0), Some(299.9)));
        assert!(errors.is_empty());
        assert_eq!(v.age, Some(129));

        let (v, errors) = validate(&patient(Some(0), Some(249.9), Some(0.5)));
        assert!(errors.is_empty());
        assert_eq!(v.age, Some(0));
    }

    #[test]
    fn test_out_of_range_dropped_with_field_error() {
        let (v, errors) = validate(&patient(Some(130), Some(250.0), Some(60.0)));
        assert_eq!(v.age, None);
        assert_eq!(v.height, None);
        assert_eq!(v.weight, Some(60.0));
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![ValidatedField::Age, ValidatedField::Height]);
    }

    #[test]
    fn test_creatinine_range() {
        let mut p = patient(Some(70), Some(160.0), Some(50.0));
        p.serum_creatinine = Some(0.0);
        let (v, errors) = validate(&p);
        assert_eq!(v.serum_creatinine, None);
        assert_eq!(errors[0].field, ValidatedField::SerumCreatinine);
    }

    #[test]
    fn test_enteral_volume_range() {
        assert_eq!(check_enteral_volume(1), Ok(1));
        assert_eq!(check_enteral_volume(MAX_DAILY_VOLUME_ML), Ok(MAX_DAILY_VOLUME_ML));
        for bad in [0, -200, MAX_DAILY_VOLUME_ML + 1, 5_000_000_000] {
            let e = check_enteral_volume(bad).unwrap_err();
            assert_eq!(e.field, ValidatedField::EnteralVolume);
        }
    }

    #[test]
    fn test_missing_values_are_not_errors() {
        let (v, errors) = validate(&PatientInput::default());
        assert!(errors.is_empty());
        assert_eq!(v, ValidatedPatient::default());
    }
}
