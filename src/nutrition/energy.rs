//! Stress composition and energy resolution

use super::rounding::round_kcal;
use super::tables;
use crate::models::{
    ActivityFactor, BmrResult, BodyTemperatureLevel, EnergyOrder, EnergyResult,
    PressureUlcerLevel, StressBreakdown, StressFactor,
};

pub fn stress_total(
    stress: StressFactor,
    temperature: BodyTemperatureLevel,
    pressure_ulcer: PressureUlcerLevel,
) -> StressBreakdown {
    let base = tables::stress_factor(stress);
    let temperature = tables::temperature_addition(temperature);
    let pressure_ulcer = tables::pressure_ulcer_addition(pressure_ulcer);
    StressBreakdown {
        base,
        temperature,
        pressure_ulcer,
        total: base + temperature + pressure_ulcer,
    }
}

/// Unrounded kcal/day from BMR at the energy weight
///
/// Infants get growth energy (40 kcal/kg actual weight) and a 10% margin
/// instead of an activity factor.
pub fn energy_by_corrected_bmr(
    age: u32,
    bmr_raw: f64,
    activity: ActivityFactor,
    stress_total: f64,
    actual_weight: f64,
) -> f64 {
    if age == 0 {
        ((bmr_raw * stress_total) + 40.0 * actual_weight) * 1.1
    } else {
        bmr_raw * tables::activity_factor(activity) * stress_total
    }
}

/// kcal/day for a per-kg order; None for the BMR and manual orders
pub fn energy_per_kg(order: EnergyOrder, standard_weight: f64) -> Option<f64> {
    tables::energy_per_kg(order).map(|per_kg| per_kg * standard_weight)
}

/// Resolve the selected order to unrounded kcal/day
pub fn resolve(
    order: EnergyOrder,
    by_corrected_bmr: f64,
    standard_weight: f64,
    manual: Option<i32>,
) -> f64 {
    match order {
        EnergyOrder::CorrectedBmrBased => by_corrected_bmr,
        EnergyOrder::Kcal25 | EnergyOrder::Kcal30 | EnergyOrder::Kcal35 => {
            energy_per_kg(order, standard_weight).unwrap_or(by_corrected_bmr)
        }
        EnergyOrder::Manual => manual.map(f64::from).unwrap_or(by_corrected_bmr),
    }
}

/// All candidates plus the resolved prescription
#[allow(clippy::too_many_arguments)]
pub fn calculate(
    age: u32,
    bmr_for_energy: BmrResult,
    activity: ActivityFactor,
    stress: &StressBreakdown,
    actual_weight: f64,
    standard_weight: f64,
    order: EnergyOrder,
    manual: Option<i32>,
) -> EnergyResult {
    let by_corrected_bmr = energy_by_corrected_bmr(
        age,
        bmr_for_energy.raw_value,
        activity,
        stress.total,
        actual_weight,
    );
    let candidate = |o: EnergyOrder| {
        energy_per_kg(o, standard_weight)
            .map(round_kcal)
            .unwrap_or_default()
    };

    EnergyResult {
        bmr_for_energy,
        by_corrected_bmr,
        by_corrected_bmr_kcal: round_kcal(by_corrected_bmr),
        kcal25: candidate(EnergyOrder::Kcal25),
        kcal30: candidate(EnergyOrder::Kcal30),
        kcal35: candidate(EnergyOrder::Kcal35),
        order,
        final_kcal: round_kcal(resolve(order, by_corrected_bmr, standard_weight, manual)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BmrFormula;

    fn bmr(raw: f64) -> BmrResult {
        BmrResult {
            raw_value: raw,
            formula: BmrFormula::AdultPrimary,
        }
    }

    #[test]
    fn test_stress_total_sums_components() {
        let s = stress_total(
            StressFactor::SurgeryModerate,
            BodyTemperatureLevel::Fever38,
            PressureUlcerLevel::D3,
        );
        assert!((s.base - 1.4).abs() < 1e-9);
        assert!((s.temperature - 0.4).abs() < 1e-9);
        assert!((s.pressure_ulcer - 0.2).abs() < 1e-9);
        assert!((s.total - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_infant_energy_adds_growth() {
        let e = energy_by_corrected_bmr(0, 400.0, ActivityFactor::Walking, 1.0, 8.0);
        assert!((e - (400.0 + 320.0) * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_adult_energy_multiplies_factors() {
        let e = energy_by_corrected_bmr(30, 1500.0, ActivityFactor::Sitting, 1.1, 60.0);
        assert!((e - 1500.0 * 1.2 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_orders() {
        assert_eq!(resolve(EnergyOrder::CorrectedBmrBased, 1800.4, 60.0, None), 1800.4);
        assert_eq!(resolve(EnergyOrder::Kcal30, 1800.4, 60.0, None), 1800.0);
        assert_eq!(resolve(EnergyOrder::Manual, 1800.4, 60.0, Some(1500)), 1500.0);
        // Manual without a value falls back to the BMR route
        assert_eq!(resolve(EnergyOrder::Manual, 1800.4, 60.0, None), 1800.4);
    }

    #[test]
    fn test_calculate_candidates_and_final() {
        let stress = stress_total(
            StressFactor::Normal,
            BodyTemperatureLevel::Normal,
            PressureUlcerLevel::None,
        );
        let r = calculate(
            30,
            bmr(1500.5),
            ActivityFactor::BedriddenComa,
            &stress,
            60.0,
            64.0,
            EnergyOrder::Kcal25,
            None,
        );
        assert_eq!(r.by_corrected_bmr_kcal, 1501);
        assert_eq!(r.kcal25, 1600);
        assert_eq!(r.kcal30, 1920);
        assert_eq!(r.kcal35, 2240);
        assert_eq!(r.final_kcal, r.kcal25);
    }
}
