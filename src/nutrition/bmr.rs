//! Basal metabolic rate
//!
//! Formula choice is banded by age:
//! - 0: simplified infant equation
//! - 1-17: per-kg reference value by age band and sex
//! - 18+: Harris-Benedict, or Ganpule for weight < 25 kg or height < 151 cm

use super::error::{CalcError, CalcResult};
use crate::models::{BmrFormula, BmrResult, Sex};

pub fn calculate(age: u32, weight: f64, height: f64, sex: Sex) -> CalcResult<BmrResult> {
    if weight <= 0.0 {
        return Err(CalcError::NonPositiveInput { field: "weight" });
    }

    match age {
        0 => Ok(infant(weight, sex)),
        1..=17 => {
            let coefficient = child_coefficient(age, sex)?;
            Ok(BmrResult {
                raw_value: coefficient * weight,
                formula: BmrFormula::ChildFormula,
            })
        }
        _ => {
            if height <= 0.0 {
                return Err(CalcError::NonPositiveInput { field: "height" });
            }
            Ok(adult(age, weight, height, sex))
        }
    }
}

fn infant(weight: f64, sex: Sex) -> BmrResult {
    let raw_value = if weight <= 10.0 {
        (weight - 0.4) * 57.0
    } else {
        match sex {
            Sex::Male => (weight + 8.6) * 30.5,
            Sex::Female => (weight + 8.6) * 30.0,
        }
    };
    BmrResult {
        raw_value,
        formula: BmrFormula::InfantFormula,
    }
}

/// kcal/kg/day reference value for children
fn child_coefficient(age: u32, sex: Sex) -> CalcResult<f64> {
    let (male, female) = match age {
        1..=2 => (61.0, 59.7),
        3..=5 => (54.8, 52.2),
        6..=7 => (44.3, 41.9),
        8..=9 => (40.8, 38.3),
        10..=11 => (37.4, 34.8),
        12..=14 => (31.0, 29.6),
        15..=17 => (27.0, 25.3),
        _ => return Err(CalcError::UncoveredAgeBand { age }),
    };
    Ok(match sex {
        Sex::Male => male,
        Sex::Female => female,
    })
}

fn adult(age: u32, weight: f64, height: f64, sex: Sex) -> BmrResult {
    let a = age as f64;

    if weight < 25.0 || height < 151.0 {
        let sex_factor = match sex {
            Sex::Male => 1.0,
            Sex::Female => 2.0,
        };
        let raw_value = (0.1238 + 0.0481 * weight + 0.0234 * height - 0.0138 * a
            - 0.5473 * sex_factor)
            * 1000.0
            / 4.186;
        return BmrResult {
            raw_value,
            formula: BmrFormula::AdultAlternate,
        };
    }

    let raw_value = match sex {
        Sex::Male => 66.47 + 13.75 * weight + 5.0 * height - 6.76 * a,
        Sex::Female => 655.1 + 9.56 * weight + 1.85 * height - 4.68 * a,
    };
    BmrResult {
        raw_value,
        formula: BmrFormula::AdultPrimary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_infant_light_uses_offset_formula() {
        let r = calculate(0, 8.0, 70.0, Sex::Male).unwrap();
        assert_eq!(r.formula, BmrFormula::InfantFormula);
        assert!(close(r.raw_value, (8.0 - 0.4) * 57.0));
    }

    #[test]
    fn test_infant_boundary_at_ten_kg() {
        // 10 kg still uses the offset formula; only > 10 switches
        let at = calculate(0, 10.0, 75.0, Sex::Male).unwrap();
        assert!(close(at.raw_value, 9.6 * 57.0));

        let above = calculate(0, 10.5, 75.0, Sex::Male).unwrap();
        assert!(close(above.raw_value, (10.5 + 8.6) * 30.5));
        let above_f = calculate(0, 10.5, 75.0, Sex::Female).unwrap();
        assert!(close(above_f.raw_value, (10.5 + 8.6) * 30.0));
    }

    #[test]
    fn test_child_bands() {
        let r = calculate(1, 10.0, 80.0, Sex::Male).unwrap();
        assert_eq!(r.formula, BmrFormula::ChildFormula);
        assert!(close(r.raw_value, 610.0));

        let r = calculate(5, 20.0, 110.0, Sex::Female).unwrap();
        assert!(close(r.raw_value, 52.2 * 20.0));

        let r = calculate(14, 40.0, 150.0, Sex::Male).unwrap();
        assert!(close(r.raw_value, 31.0 * 40.0));

        let r = calculate(17, 50.0, 160.0, Sex::Female).unwrap();
        assert!(close(r.raw_value, 25.3 * 50.0));
    }

    #[test]
    fn test_adult_harris_benedict() {
        let r = calculate(30, 65.0, 170.0, Sex::Male).unwrap();
        assert_eq!(r.formula, BmrFormula::AdultPrimary);
        assert!((r.raw_value - 1607.42).abs() < 1e-6);
        assert_eq!(r.display_value(), 1607);
    }

    #[test]
    fn test_adult_alternate_for_low_weight() {
        let r = calculate(30, 20.0, 160.0, Sex::Male).unwrap();
        assert_eq!(r.formula, BmrFormula::AdultAlternate);
        assert!(r.raw_value > 0.0);
    }

    #[test]
    fn test_adult_weight_and_height_boundaries() {
        assert_eq!(
            calculate(40, 24.9, 160.0, Sex::Female).unwrap().formula,
            BmrFormula::AdultAlternate
        );
        assert_eq!(
            calculate(40, 25.0, 151.0, Sex::Female).unwrap().formula,
            BmrFormula::AdultPrimary
        );
        assert_eq!(
            calculate(40, 50.0, 150.9, Sex::Male).unwrap().formula,
            BmrFormula::AdultAlternate
        );
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        assert_eq!(
            calculate(30, 0.0, 170.0, Sex::Male),
            Err(CalcError::NonPositiveInput { field: "weight" })
        );
    }

    #[test]
    fn test_uncovered_child_band() {
        assert_eq!(
            child_coefficient(18, Sex::Male),
            Err(CalcError::UncoveredAgeBand { age: 18 })
        );
    }
}
