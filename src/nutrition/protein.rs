//! Protein requirement
//!
//! Adults with renal failure, hemodialysis or liver cirrhosis are dosed on
//! standard weight without the stress multiplier. Children keep both.

use super::rounding::round_gram_1dp;
use super::tables;
use crate::models::{Disease, ProteinCorrection, ProteinResult};

/// Whether the stress multiplier is dropped for protein
pub fn is_stress_factor_ignored(age: u32, disease: Disease) -> bool {
    if age < 18 {
        return false;
    }
    disease.is_protein_exception()
}

/// Whether adult protein is dosed on standard weight.
///
/// Currently the same condition as [`is_stress_factor_ignored`]; the two are
/// separate clinical decisions and are kept apart.
pub fn use_standard_weight_for_protein(age: u32, disease: Disease) -> bool {
    if age < 18 {
        return false;
    }
    disease.is_protein_exception()
}

/// g/kg/day by age
pub fn base_coefficient(age: u32) -> f64 {
    match age {
        0 => 2.0,
        1..=3 => 1.8,
        4..=6 => 1.5,
        7..=10 => 1.2,
        _ => 1.0,
    }
}

/// Correction a fresh form would pick for this patient
pub fn default_correction(age: u32, disease: Disease) -> ProteinCorrection {
    if age < 18 {
        return ProteinCorrection::None;
    }
    match disease {
        Disease::RenalFailure => ProteinCorrection::Ckd3bTo5,
        Disease::LiverCirrhosis => ProteinCorrection::LiverCirrhosisPoor,
        _ => ProteinCorrection::None,
    }
}

pub fn calculate(
    age: u32,
    weight_for_protein: f64,
    disease: Disease,
    stress_total: f64,
    correction: ProteinCorrection,
) -> ProteinResult {
    let base = base_coefficient(age) * weight_for_protein;
    let applied_stress = if is_stress_factor_ignored(age, disease) {
        1.0
    } else {
        stress_total
    };
    let correction_factor = tables::protein_correction_factor(correction);
    let raw = base * applied_stress * correction_factor;

    ProteinResult {
        weight_for_protein,
        base,
        applied_stress,
        correction_factor,
        raw,
        grams: round_gram_1dp(raw),
    }
}
