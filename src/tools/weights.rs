//! Dosing Weight MCP Tool
//!
//! Which body weight feeds a given calculation, without a full
//! recalculation.

use serde::Serialize;

use crate::models::{PatientInput, WeightBasis};
use crate::nutrition::weight_selector::{self, WeightCandidates};
use crate::nutrition::{body_index, corrected_weight, validation, WeightUsage};

/// Response for dosing_weight
#[derive(Debug, Serialize)]
pub struct DosingWeightResponse {
    pub usage: &'static str,
    pub weight_kg: f64,
    pub actual_kg: f64,
    pub corrected_kg: f64,
    pub standard_kg: f64,
    pub corrected_basis: WeightBasis,
    pub corrected_basis_label: &'static str,
}

pub fn dosing_weight(usage: &str, patient: &PatientInput) -> Result<DosingWeightResponse, String> {
    let usage = WeightUsage::parse(usage).map_err(|e| e.to_string())?;

    let (measured, errors) = validation::validate(patient);
    if let Some(e) = errors.first() {
        return Err(e.message.clone());
    }
    let (Some(age), Some(height), Some(actual)) = (measured.age, measured.height, measured.weight)
    else {
        return Err("age, height and weight are required".to_string());
    };

    let bi = body_index::calculate(age, height, actual, patient.sex);
    let corrected = corrected_weight::calculate(age, bi.obesity_degree, actual, bi.standard_weight);
    let weights = WeightCandidates {
        actual,
        corrected: corrected.value,
        standard: bi.standard_weight,
    };

    Ok(DosingWeightResponse {
        usage: usage.as_str(),
        weight_kg: weight_selector::select(usage, age, &weights, patient.disease),
        actual_kg: actual,
        corrected_kg: corrected.value,
        standard_kg: bi.standard_weight,
        corrected_basis: corrected.basis,
        corrected_basis_label: corrected.basis.long_name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Disease, Sex};

    fn patient(disease: Disease) -> PatientInput {
        PatientInput {
            age: Some(40),
            height: Some(170.0),
            weight: Some(65.0),
            sex: Sex::Male,
            disease,
            ..Default::default()
        }
    }

    #[test]
    fn test_protein_weight_for_renal_failure_is_standard() {
        let r = dosing_weight("protein", &patient(Disease::RenalFailure)).unwrap();
        assert!((r.weight_kg - 63.58).abs() < 1e-9);
        assert_eq!(r.corrected_basis, WeightBasis::Actual);
    }

    #[test]
    fn test_energy_weight_is_corrected() {
        let r = dosing_weight("Energy", &patient(Disease::RenalFailure)).unwrap();
        assert_eq!(r.usage, "energy");
        assert_eq!(r.weight_kg, 65.0);
    }

    #[test]
    fn test_unknown_usage_is_rejected() {
        let err = dosing_weight("water", &patient(Disease::None)).unwrap_err();
        assert_eq!(err, "Unknown weight usage: water");
    }

    #[test]
    fn test_incomplete_patient_is_rejected() {
        let mut p = patient(Disease::None);
        p.height = None;
        assert!(dosing_weight("energy", &p).is_err());

        p.height = Some(400.0);
        let err = dosing_weight("energy", &p).unwrap_err();
        assert!(err.starts_with("Height"), "{}", err);
    }
}
