//! Corrected weight
//!
//! Picks actual, standard or adjusted weight from the obesity degree.

use crate::models::{CorrectedWeightResult, WeightBasis};

/// Both boundaries (80 and 120) resolve away from actual weight
pub fn get_basis(age: u32, obesity_degree: Option<f64>) -> WeightBasis {
    if age == 0 {
        return WeightBasis::Actual;
    }
    match obesity_degree {
        Some(od) if od <= 80.0 => WeightBasis::Standard,
        Some(od) if od >= 120.0 => WeightBasis::Adjusted,
        _ => WeightBasis::Actual,
    }
}

pub fn calculate_adjusted(actual: f64, standard: f64) -> f64 {
    (actual - standard) * 0.25 + standard
}

pub fn calculate_corrected(basis: WeightBasis, actual: f64, standard: f64) -> f64 {
    match basis {
        WeightBasis::Actual => actual,
        WeightBasis::Standard => standard,
        WeightBasis::Adjusted => calculate_adjusted(actual, standard),
    }
}

pub fn calculate(
    age: u32,
    obesity_degree: Option<f64>,
    actual: f64,
    standard: f64,
) -> CorrectedWeightResult {
    let basis = get_basis(age, obesity_degree);
    CorrectedWeightResult {
        basis,
        value: calculate_corrected(basis, actual, standard),
    }
}
