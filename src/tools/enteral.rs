//! Enteral Package MCP Tool
//!
//! Standalone dose conversion and package allocation for one formula,
//! outside a full recalculation.

use serde::Serialize;

use crate::models::{EnteralComponents, EnteralFormula, EnteralPackagePlan};
use crate::nutrition::{enteral, tables, validation, EnteralDose};

/// Response for allocate_enteral_packages
#[derive(Debug, Serialize)]
pub struct AllocationResponse {
    pub formula: EnteralFormula,
    pub formula_name: &'static str,
    pub volume_ml: i64,
    pub energy_kcal: f64,
    pub package_sizes_ml: Vec<u32>,
    pub components: EnteralComponents,
    pub plans: Vec<EnteralPackagePlan>,
    pub plan_labels: Vec<String>,
}

/// Allocate a daily dose given either as mL or as kcal. Volume wins when
/// both are given.
pub fn allocate_enteral_packages(
    formula: EnteralFormula,
    volume_ml: Option<i64>,
    energy_kcal: Option<f64>,
) -> Result<AllocationResponse, String> {
    let dose = match (volume_ml, energy_kcal) {
        (Some(ml), _) if ml > 0 => EnteralDose::Volume(ml),
        (Some(ml), _) => return Err(format!("volume_ml must be positive, got {}", ml)),
        (None, Some(kcal)) if kcal > 0.0 => EnteralDose::Energy(kcal),
        (None, Some(kcal)) => return Err(format!("energy_kcal must be positive, got {}", kcal)),
        (None, None) => return Err("Either volume_ml or energy_kcal is required".to_string()),
    };

    let volume_ml = match dose {
        EnteralDose::Volume(ml) => ml,
        EnteralDose::Energy(kcal) => enteral::volume_from_energy(formula, kcal),
    };
    validation::check_enteral_volume(volume_ml).map_err(|e| e.message)?;

    let result = enteral::calculate(formula, dose);
    tracing::debug!(
        formula = formula.as_str(),
        volume_ml = result.volume_ml,
        plans = result.plans.len(),
        "Allocated enteral packages"
    );

    Ok(AllocationResponse {
        formula,
        formula_name: formula.display_name(),
        volume_ml: result.volume_ml,
        energy_kcal: result.energy_kcal,
        package_sizes_ml: tables::enteral_package_sizes(formula).to_vec(),
        components: result.components,
        plans: result.plans,
        plan_labels: result.plan_labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_by_volume() {
        let r = allocate_enteral_packages(EnteralFormula::Meibalance10, Some(1000), None).unwrap();
        assert_eq!(r.volume_ml, 1000);
        assert_eq!(r.package_sizes_ml, vec![300, 400]);
        assert_eq!(r.plan_labels[0], "400mL×1 + 300mL×2");
        assert!(r.plans.len() <= 2);
    }

    #[test]
    fn test_allocate_by_energy() {
        let r = allocate_enteral_packages(EnteralFormula::PeptamenAf15, None, Some(1500.0)).unwrap();
        assert_eq!(r.volume_ml, 1000);
        assert_eq!(r.plan_labels, vec!["200mL×5".to_string()]);
    }

    #[test]
    fn test_volume_takes_precedence() {
        let r = allocate_enteral_packages(EnteralFormula::Mein10, Some(600), Some(2000.0)).unwrap();
        assert_eq!(r.volume_ml, 600);
        assert!((r.energy_kcal - 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_dose_above_daily_limit_is_rejected() {
        let err = allocate_enteral_packages(EnteralFormula::Inoras16, Some(5_000_000_000), None)
            .unwrap_err();
        assert!(err.contains("Enteral volume"), "{}", err);
        assert!(allocate_enteral_packages(EnteralFormula::Meibalance10, None, Some(4.0e8)).is_err());
        assert!(allocate_enteral_packages(EnteralFormula::Meibalance10, Some(10_000), None).is_ok());
    }

    #[test]
    fn test_missing_or_bad_dose() {
        assert!(allocate_enteral_packages(EnteralFormula::Mein10, None, None).is_err());
        assert!(allocate_enteral_packages(EnteralFormula::Mein10, Some(0), None).is_err());
        assert!(allocate_enteral_packages(EnteralFormula::Mein10, None, Some(-1.0)).is_err());
    }
}
