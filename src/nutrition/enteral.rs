//! Enteral dose and package allocation
//!
//! Converts between kcal and mL for a formula, derives the nutrients in the
//! dose, and splits the daily volume into whole packages.

use std::collections::BTreeMap;

use super::rounding::round_enteral_ml;
use super::tables::{enteral_composition, enteral_package_sizes};
use crate::models::{EnteralComponents, EnteralFormula, EnteralPackagePlan, EnteralResult};

/// Largest daily volume split into packages
pub const MAX_DAILY_VOLUME_ML: i64 = 10_000;

/// What the dose is anchored on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnteralDose {
    /// kcal/day from the energy order
    Energy(f64),
    /// mL/day typed by the user
    Volume(i64),
}

/// kcal/day to mL/day, rounded to whole mL
pub fn volume_from_energy(formula: EnteralFormula, kcal: f64) -> i64 {
    round_enteral_ml(kcal * enteral_composition(formula).volume_per_kcal)
}

pub fn energy_from_volume(formula: EnteralFormula, ml: f64) -> f64 {
    ml / enteral_composition(formula).volume_per_kcal
}

pub fn components(formula: EnteralFormula, kcal: f64) -> EnteralComponents {
    let c = enteral_composition(formula);
    EnteralComponents {
        protein_g: kcal * c.protein_per_kcal,
        fat_g: kcal * c.fat_per_kcal,
        carb_g: kcal * c.carb_per_kcal,
        salt_g: kcal * c.salt_per_kcal,
        vitamin_k_ug: kcal * c.vitamin_k_per_kcal,
        water_ml: kcal * c.water_per_kcal,
    }
}

/// One plan for single-size formulas, two otherwise
pub fn max_plans_for(formula: EnteralFormula) -> usize {
    if enteral_package_sizes(formula).len() == 1 {
        1
    } else {
        2
    }
}

/// Split `target_ml` into whole packages.
///
/// Each possible count of the largest package anchors a candidate; the
/// rest is filled greedily from the next largest size down, and the
/// smallest size mops up until the remainder is below it. Candidates are
/// deduplicated and ranked by (remainder, package count). Targets above
/// [`MAX_DAILY_VOLUME_ML`] get no plans.
pub fn build_plans(target_ml: i64, sizes: &[u32], max_plans: usize) -> Vec<EnteralPackagePlan> {
    if target_ml <= 0 || target_ml > MAX_DAILY_VOLUME_ML {
        return Vec::new();
    }

    let mut volumes: Vec<i64> = sizes.iter().filter(|v| **v > 0).map(|v| *v as i64).collect();
    volumes.sort_unstable_by(|a, b| b.cmp(a));
    volumes.dedup();

    let (biggest, smallest) = match (volumes.first(), volumes.last()) {
        (Some(b), Some(s)) => (*b, *s),
        _ => return Vec::new(),
    };

    let mut plans: Vec<EnteralPackagePlan> = Vec::new();

    for big_count in (0..=target_ml / biggest).rev() {
        let mut counts: BTreeMap<u32, u32> = BTreeMap::new();
        let mut used = big_count * biggest;
        if big_count > 0 {
            counts.insert(biggest as u32, big_count as u32);
        }

        for &v in &volumes[1..] {
            let c = (target_ml - used) / v;
            if c > 0 {
                counts.insert(v as u32, c as u32);
                used += c * v;
            }
        }

        let add = (target_ml - used) / smallest;
        if add > 0 {
            *counts.entry(smallest as u32).or_insert(0) += add as u32;
            used += add * smallest;
        }

        let (Ok(total_volume_ml), Ok(remainder_ml)) =
            (u32::try_from(used), u32::try_from(target_ml - used))
        else {
            continue;
        };
        let plan = EnteralPackagePlan {
            counts_by_volume: counts,
            total_volume_ml,
            remainder_ml,
        };
        if !plans.contains(&plan) {
            plans.push(plan);
        }
    }

    plans.sort_by_key(|p| (p.remainder_ml, p.total_package_count()));
    plans.truncate(max_plans);
    plans
}

/// Allocate a volume for a formula with its own package table
pub fn allocate(formula: EnteralFormula, volume_ml: i64) -> Vec<EnteralPackagePlan> {
    build_plans(
        volume_ml,
        enteral_package_sizes(formula),
        max_plans_for(formula),
    )
}

/// Resolve the dose both ways, then derive nutrients and packages.
///
/// Nutrients always follow the energy that matches the shown volume, so
/// kcal and mL stay consistent after rounding.
pub fn calculate(formula: EnteralFormula, dose: EnteralDose) -> EnteralResult {
    let (volume_ml, energy_kcal) = match dose {
        EnteralDose::Volume(ml) => (ml, energy_from_volume(formula, ml as f64)),
        EnteralDose::Energy(kcal) => {
            let ml = volume_from_energy(formula, kcal);
            (ml, energy_from_volume(formula, ml as f64))
        }
    };

    let plans = allocate(formula, volume_ml);
    let plan_labels = plans.iter().map(|p| p.to_string()).collect();

    EnteralResult {
        formula,
        energy_kcal,
        volume_ml,
        components: components(formula, energy_kcal),
        plans,
        plan_labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_invariants(target: i64, sizes: &[u32], plans: &[EnteralPackagePlan]) {
        let min = *sizes.iter().min().unwrap();
        for p in plans {
            let sum: u32 = p.counts_by_volume.iter().map(|(v, c)| v * c).sum();
            assert_eq!(sum, p.total_volume_ml);
            assert_eq!((p.total_volume_ml + p.remainder_ml) as i64, target);
            assert!(p.remainder_ml < min, "remainder {} >= {}", p.remainder_ml, min);
        }
    }

    #[test]
    fn test_non_positive_target_yields_nothing() {
        assert!(build_plans(0, &[200], 1).is_empty());
        assert!(build_plans(-5, &[200, 400], 2).is_empty());
        assert!(build_plans(100, &[], 2).is_empty());
    }

    #[test]
    fn test_oversized_target_yields_nothing() {
        assert!(build_plans(MAX_DAILY_VOLUME_ML + 1, &[300, 400], 2).is_empty());
        assert!(build_plans(5_000_000_000, &[187], 1).is_empty());

        let plans = build_plans(MAX_DAILY_VOLUME_ML, &[187], 1);
        assert_eq!(plans.len(), 1);
        check_invariants(MAX_DAILY_VOLUME_ML, &[187], &plans);
    }

    #[test]
    fn test_single_size() {
        let plans = build_plans(1350, &[200], 1);
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].counts_by_volume.get(&200), Some(&6));
        assert_eq!(plans[0].remainder_ml, 150);
        assert_eq!(plans[0].to_string(), "200mL×6 + 150mL");
        check_invariants(1350, &[200], &plans);
    }

    #[test]
    fn test_two_sizes_exact_fit_ranked_first() {
        let plans = build_plans(1000, &[300, 400], 2);
        assert_eq!(plans.len(), 2);
        // 400x1 + 300x2 fits exactly
        assert_eq!(plans[0].remainder_ml, 0);
        assert_eq!(plans[0].to_string(), "400mL×1 + 300mL×2");
        assert!(plans[1].remainder_ml >= plans[0].remainder_ml);
        check_invariants(1000, &[300, 400], &plans);
    }

    #[test]
    fn test_tie_on_remainder_prefers_fewer_packages() {
        let plans = build_plans(800, &[200, 400], 2);
        assert_eq!(plans[0].to_string(), "400mL×2");
        assert_eq!(plans[1].to_string(), "400mL×1 + 200mL×2");
        check_invariants(800, &[200, 400], &plans);
    }

    #[test]
    fn test_invariants_over_many_targets() {
        for sizes in [&[200u32][..], &[200, 267], &[300, 400], &[187], &[200, 400]] {
            for target in (1..3000).step_by(37) {
                let plans = build_plans(target, sizes, 2);
                assert!(!plans.is_empty());
                check_invariants(target, sizes, &plans);
            }
        }
    }

    #[test]
    fn test_energy_dose_round_trip() {
        let r = calculate(EnteralFormula::PeptamenAf15, EnteralDose::Energy(1500.0));
        // 1500 kcal at 1.5 kcal/mL
        assert_eq!(r.volume_ml, 1000);
        assert!((r.energy_kcal - 1500.0).abs() < 1e-6);
        assert!((r.components.protein_g - 95.0).abs() < 1e-6);
        assert_eq!(r.plans.len(), 1);
        assert_eq!(r.plan_labels, vec!["200mL×5".to_string()]);
    }

    #[test]
    fn test_volume_dose_drives_energy() {
        let r = calculate(EnteralFormula::Meibalance10, EnteralDose::Volume(1250));
        assert_eq!(r.volume_ml, 1250);
        assert!((r.energy_kcal - 1250.0).abs() < 1e-6);
        assert!((r.components.protein_g - 50.0).abs() < 1e-6);
        assert_eq!(r.plans.len(), 2);
    }

    #[test]
    fn test_max_plans() {
        assert_eq!(max_plans_for(EnteralFormula::Mein10), 1);
        assert_eq!(max_plans_for(EnteralFormula::GlucernaRex10), 2);
    }
}
