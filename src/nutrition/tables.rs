//! Formula tables
//!
//! Static coefficients keyed by the selection enums.

use crate::models::{
    ActivityFactor, BodyTemperatureLevel, Disease, EnergyOrder, EnteralFormula,
    PressureUlcerLevel, ProteinCorrection, StressFactor,
};

pub fn activity_factor(factor: ActivityFactor) -> f64 {
    match factor {
        ActivityFactor::BedriddenComa => 1.0,
        ActivityFactor::BedriddenAwake => 1.1,
        ActivityFactor::Sitting => 1.2,
        ActivityFactor::Wheelchair => 1.3,
        ActivityFactor::Walking => 1.4,
        ActivityFactor::Rehabilitation15 => 1.5,
        ActivityFactor::Rehabilitation16 => 1.6,
        ActivityFactor::Rehabilitation17 => 1.7,
    }
}

pub fn stress_factor(factor: StressFactor) -> f64 {
    match factor {
        StressFactor::Normal => 1.0,
        StressFactor::MildStress => 1.1,
        StressFactor::InfectMild => 1.2,
        StressFactor::InfectModerate => 1.5,
        StressFactor::InfectSevere => 1.8,
        StressFactor::SurgeryMinor => 1.2,
        StressFactor::SurgeryModerate => 1.4,
        StressFactor::SurgeryMajor => 1.6,
        StressFactor::SurgeryVeryMajor => 1.8,
        StressFactor::TraumaBone => 1.35,
        StressFactor::TraumaMuscle => 1.3,
        StressFactor::TraumaHeadSteroid => 1.6,
        StressFactor::Burn20 => 1.5,
        StressFactor::Burn40 => 1.85,
        StressFactor::Burn100 => 2.05,
    }
}

/// Stress added per fever band
pub fn temperature_addition(level: BodyTemperatureLevel) -> f64 {
    match level {
        BodyTemperatureLevel::Normal => 0.0,
        BodyTemperatureLevel::Fever37 => 0.2,
        BodyTemperatureLevel::Fever38 => 0.4,
        BodyTemperatureLevel::Fever39 => 0.6,
        BodyTemperatureLevel::Fever40 => 0.8,
    }
}

/// Stress added per pressure ulcer depth
pub fn pressure_ulcer_addition(level: PressureUlcerLevel) -> f64 {
    match level {
        PressureUlcerLevel::None => 0.0,
        PressureUlcerLevel::D1ToD2 => 0.1,
        PressureUlcerLevel::D3 => 0.2,
        PressureUlcerLevel::D4 => 0.3,
        PressureUlcerLevel::D5 => 0.4,
    }
}

pub fn protein_correction_factor(correction: ProteinCorrection) -> f64 {
    match correction {
        ProteinCorrection::None => 1.0,
        ProteinCorrection::Ckd3bTo5 => 0.7,
        ProteinCorrection::LiverCirrhosisPoor => 0.5,
    }
}

/// kcal per kg of standard weight, for the per-kg energy orders only
pub fn energy_per_kg(order: EnergyOrder) -> Option<f64> {
    match order {
        EnergyOrder::Kcal25 => Some(25.0),
        EnergyOrder::Kcal30 => Some(30.0),
        EnergyOrder::Kcal35 => Some(35.0),
        EnergyOrder::CorrectedBmrBased | EnergyOrder::Manual => None,
    }
}

/// Energy order a disease selects when the user has not chosen one
pub fn disease_energy_default(disease: Disease) -> EnergyOrder {
    match disease {
        Disease::None => EnergyOrder::CorrectedBmrBased,
        Disease::Diabetes => EnergyOrder::Kcal25,
        Disease::RenalFailure | Disease::Hemodialysis => EnergyOrder::Kcal30,
        Disease::LiverCirrhosis => EnergyOrder::Kcal35,
    }
}

/// Per-kcal nutrient ratios of an enteral product
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnteralComposition {
    pub volume_per_kcal: f64,
    pub protein_per_kcal: f64,
    pub fat_per_kcal: f64,
    pub carb_per_kcal: f64,
    pub salt_per_kcal: f64,
    pub vitamin_k_per_kcal: f64,
    pub water_per_kcal: f64,
}

impl EnteralComposition {
    /// Build from one package's label: package kcal, then the label amounts
    const fn per_package(
        kcal: f64,
        volume: f64,
        protein: f64,
        fat: f64,
        carb: f64,
        salt: f64,
        vitamin_k: f64,
        water: f64,
    ) -> Self {
        Self {
            volume_per_kcal: volume / kcal,
            protein_per_kcal: protein / kcal,
            fat_per_kcal: fat / kcal,
            carb_per_kcal: carb / kcal,
            salt_per_kcal: salt / kcal,
            vitamin_k_per_kcal: vitamin_k / kcal,
            water_per_kcal: water / kcal,
        }
    }
}

pub fn enteral_composition(formula: EnteralFormula) -> EnteralComposition {
    use EnteralComposition as C;
    match formula {
        EnteralFormula::Meibalance10 => C::per_package(400.0, 400.0, 16.0, 11.2, 58.0, 1.12, 20.0, 338.0),
        EnteralFormula::PeptamenPrebio15 => C::per_package(400.0, 267.0, 14.0, 16.0, 50.0, 1.45, 33.0, 204.0),
        EnteralFormula::PeptamenIntense10 => C::per_package(200.0, 200.0, 18.4, 7.4, 15.0, 0.61, 24.0, 170.0),
        EnteralFormula::PeptamenAf15 => C::per_package(300.0, 200.0, 19.0, 13.2, 26.4, 0.61, 6.0, 155.0),
        EnteralFormula::IsocalSupport15 => C::per_package(400.0, 267.0, 15.2, 18.4, 40.9, 0.92, 46.8, 204.0),
        EnteralFormula::Lacphia15 => C::per_package(400.0, 267.0, 16.0, 12.0, 56.1, 1.21, 28.0, 206.0),
        EnteralFormula::Mein10 => C::per_package(200.0, 200.0, 10.0, 5.6, 26.2, 0.41, 4.6, 168.2),
        EnteralFormula::RenalenMp16 => C::per_package(400.0, 250.0, 14.0, 11.2, 60.0, 0.61, 5.6, 187.3),
        EnteralFormula::GlucernaRex10 => C::per_package(400.0, 400.0, 16.7, 22.3, 38.8, 0.96, 12.0, 340.0),
        EnteralFormula::PgSoftEj15 => C::per_package(400.0, 267.0, 16.0, 8.8, 62.7, 1.38, 60.0, 175.0),
        EnteralFormula::RacolNf10 => C::per_package(200.0, 200.0, 8.76, 4.46, 31.24, 0.38, 12.5, 170.0),
        EnteralFormula::RacolNfSemiSolid10 => C::per_package(300.0, 300.0, 13.14, 6.69, 46.86, 0.57, 18.8, 228.0),
        EnteralFormula::EnsureH15 => C::per_package(375.0, 250.0, 13.2, 13.2, 51.5, 0.76, 26.3, 194.0),
        EnteralFormula::Inoras16 => C::per_package(300.0, 187.5, 12.0, 9.66, 39.79, 0.69, 24.99, 140.0),
        EnteralFormula::Elental10 => C::per_package(300.0, 300.0, 14.1, 0.51, 63.41, 0.66, 9.0, 250.0),
    }
}

/// Available package volumes (mL), ascending
pub fn enteral_package_sizes(formula: EnteralFormula) -> &'static [u32] {
    match formula {
        EnteralFormula::Meibalance10 => &[300, 400],
        EnteralFormula::PeptamenPrebio15 => &[200, 267],
        EnteralFormula::PeptamenIntense10 => &[200],
        EnteralFormula::PeptamenAf15 => &[200],
        EnteralFormula::IsocalSupport15 => &[200, 267],
        EnteralFormula::Lacphia15 => &[200, 267],
        EnteralFormula::Mein10 => &[200],
        EnteralFormula::RenalenMp16 => &[250],
        EnteralFormula::GlucernaRex10 => &[200, 400],
        EnteralFormula::PgSoftEj15 => &[200, 267],
        EnteralFormula::RacolNf10 => &[200],
        EnteralFormula::RacolNfSemiSolid10 => &[300],
        EnteralFormula::EnsureH15 => &[250],
        // Labelled 187.5 mL; allocated as 187 to match existing ward sheets
        EnteralFormula::Inoras16 => &[187],
        EnteralFormula::Elental10 => &[300],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disease_energy_defaults() {
        assert_eq!(disease_energy_default(Disease::None), EnergyOrder::CorrectedBmrBased);
        assert_eq!(disease_energy_default(Disease::Diabetes), EnergyOrder::Kcal25);
        assert_eq!(disease_energy_default(Disease::RenalFailure), EnergyOrder::Kcal30);
        assert_eq!(disease_energy_default(Disease::Hemodialysis), EnergyOrder::Kcal30);
        assert_eq!(disease_energy_default(Disease::LiverCirrhosis), EnergyOrder::Kcal35);
    }

    #[test]
    fn test_stress_additions_step_evenly() {
        for level in BodyTemperatureLevel::ALL {
            let expected = 0.2 * level.step() as f64;
            assert!((temperature_addition(level) - expected).abs() < 1e-9);
        }
        for level in PressureUlcerLevel::ALL {
            let expected = 0.1 * level.step() as f64;
            assert!((pressure_ulcer_addition(level) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_energy_density_matches_label() {
        // 1.0 kcal/mL products
        let c = enteral_composition(EnteralFormula::Meibalance10);
        assert!((c.volume_per_kcal - 1.0).abs() < 1e-9);
        // 1.5 kcal/mL products
        let c = enteral_composition(EnteralFormula::PeptamenAf15);
        assert!((1.0 / c.volume_per_kcal - 1.5).abs() < 1e-9);
        // 1.6 kcal/mL products
        let c = enteral_composition(EnteralFormula::RenalenMp16);
        assert!((1.0 / c.volume_per_kcal - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_package_sizes_ascending_and_nonempty() {
        for formula in EnteralFormula::ALL {
            let sizes = enteral_package_sizes(formula);
            assert!(!sizes.is_empty());
            assert!(sizes.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
