//! Creatinine clearance (Cockcroft-Gault)
//!
//! For patients aged 70+ with low muscle mass the measured creatinine
//! understates renal impairment, so a floor is applied and both values are
//! reported.

use crate::models::{CcrCorrection, CcrResult, Sex};

const MALE_CREATININE_FLOOR: f64 = 0.8;
const FEMALE_CREATININE_FLOOR: f64 = 0.6;

/// mL/min; a non-positive creatinine yields 0
pub fn calculate(age: u32, weight: f64, creatinine: f64, sex: Sex) -> f64 {
    if creatinine <= 0.0 {
        return 0.0;
    }
    let ccr = ((140.0 - age as f64) * weight) / (72.0 * creatinine);
    match sex {
        Sex::Male => ccr,
        Sex::Female => ccr * 0.85,
    }
}

/// Creatinine floor that applies, if any
pub fn correction(age: u32, creatinine: f64, sex: Sex) -> CcrCorrection {
    if age < 70 {
        return CcrCorrection::None;
    }
    match sex {
        Sex::Male if creatinine < MALE_CREATININE_FLOOR => CcrCorrection::MaleFloor,
        Sex::Female if creatinine < FEMALE_CREATININE_FLOOR => CcrCorrection::FemaleFloor,
        _ => CcrCorrection::None,
    }
}

pub fn corrected_creatinine(correction: CcrCorrection) -> Option<f64> {
    match correction {
        CcrCorrection::None => None,
        CcrCorrection::MaleFloor => Some(MALE_CREATININE_FLOOR),
        CcrCorrection::FemaleFloor => Some(FEMALE_CREATININE_FLOOR),
    }
}

/// Advisory shown beside the corrected value
pub fn note(correction: CcrCorrection) -> &'static str {
    match correction {
        CcrCorrection::None => "",
        CcrCorrection::MaleFloor => "Correct if muscle mass is low (Cr 0.8)",
        CcrCorrection::FemaleFloor => "Correct if muscle mass is low (Cr 0.6)",
    }
}

pub fn calculate_with_correction(age: u32, weight: f64, creatinine: f64, sex: Sex) -> CcrResult {
    let raw = calculate(age, weight, creatinine, sex);
    let correction = correction(age, creatinine, sex);
    let corrected_creatinine = corrected_creatinine(correction);

    CcrResult {
        raw,
        correction,
        corrected_creatinine,
        corrected: corrected_creatinine.map(|cr| calculate(age, weight, cr, sex)),
        note: note(correction).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_creatinine_is_zero() {
        assert_eq!(calculate(50, 60.0, 0.0, Sex::Male), 0.0);
        assert_eq!(calculate(50, 60.0, -1.0, Sex::Female), 0.0);
    }

    #[test]
    fn test_cockcroft_gault() {
        let male = calculate(40, 72.0, 1.0, Sex::Male);
        assert!((male - 100.0).abs() < 1e-9);
        let female = calculate(40, 72.0, 1.0, Sex::Female);
        assert!((female - male * 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_correction_strict_boundary() {
        assert_eq!(correction(70, 0.79, Sex::Male), CcrCorrection::MaleFloor);
        assert_eq!(correction(70, 0.80, Sex::Male), CcrCorrection::None);
        assert_eq!(correction(75, 0.59, Sex::Female), CcrCorrection::FemaleFloor);
        assert_eq!(correction(75, 0.60, Sex::Female), CcrCorrection::None);
        assert_eq!(correction(69, 0.3, Sex::Male), CcrCorrection::None);
    }

    #[test]
    fn test_corrected_value_uses_floor() {
        let r = calculate_with_correction(70, 50.0, 0.79, Sex::Male);
        assert_eq!(r.correction, CcrCorrection::MaleFloor);
        assert_eq!(r.corrected_creatinine, Some(0.8));
        let expected = calculate(70, 50.0, 0.8, Sex::Male);
        assert!((r.corrected.unwrap() - expected).abs() < 1e-9);
        assert!(r.raw > r.corrected.unwrap());
        assert_eq!(r.note, "Correct if muscle mass is low (Cr 0.8)");
    }

    #[test]
    fn test_no_correction_has_empty_note() {
        let r = calculate_with_correction(50, 60.0, 1.0, Sex::Female);
        assert_eq!(r.correction, CcrCorrection::None);
        assert!(r.corrected.is_none());
        assert!(r.note.is_empty());
    }
}
