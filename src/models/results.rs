//! Calculation result records
//!
//! Immutable values produced fresh on every recalculation pass.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::selection::{EnergyOrder, EnteralFormula};
use crate::nutrition::rounding::round_kcal;

/// Which BMR equation produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    /// Kyoto PICU manual simplified infant equation
    InfantFormula,
    /// Japanese DRI 2010 reference values per kg
    ChildFormula,
    /// Harris-Benedict
    AdultPrimary,
    /// Ganpule 2007, for low weight or short stature
    AdultAlternate,
}

impl BmrFormula {
    pub fn short_name(&self) -> &'static str {
        match self {
            BmrFormula::InfantFormula => "Inf",
            BmrFormula::ChildFormula => "DRI",
            BmrFormula::AdultPrimary => "HB",
            BmrFormula::AdultAlternate => "Gan",
        }
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            BmrFormula::InfantFormula => "Infant simplified equation (Kyoto PICU manual, 7th ed.)",
            BmrFormula::ChildFormula => "Child (MHLW basal metabolic reference values 2010)",
            BmrFormula::AdultPrimary => "Adult (Harris-Benedict)",
            BmrFormula::AdultAlternate => "Adult (Ganpule 2007)",
        }
    }
}

/// Basal metabolic rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmrResult {
    /// Unrounded kcal/day, used for every downstream multiplication
    pub raw_value: f64,
    pub formula: BmrFormula,
}

impl BmrResult {
    pub fn display_value(&self) -> i64 {
        round_kcal(self.raw_value)
    }
}

/// BMI, standard weight and obesity degree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyIndexResult {
    pub bmi: f64,
    pub standard_weight: f64,
    /// Percent of standard weight; absent for infants
    pub obesity_degree: Option<f64>,
}

/// Which weight the corrected weight stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightBasis {
    Actual,
    Standard,
    Adjusted,
}

impl WeightBasis {
    pub fn kind_name(&self) -> &'static str {
        match self {
            WeightBasis::Actual => "Actual",
            WeightBasis::Standard => "Standard",
            WeightBasis::Adjusted => "Adjusted",
        }
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            WeightBasis::Actual => "Using actual body weight",
            WeightBasis::Standard => "Using standard body weight",
            WeightBasis::Adjusted => "Using adjusted body weight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectedWeightResult {
    pub basis: WeightBasis,
    pub value: f64,
}

/// Creatinine floor applied for elderly patients with low muscle mass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CcrCorrection {
    #[default]
    None,
    /// Male aged 70+, creatinine raised to 0.8
    MaleFloor,
    /// Female aged 70+, creatinine raised to 0.6
    FemaleFloor,
}

/// Creatinine clearance, raw and floor-corrected side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcrResult {
    /// mL/min with the measured creatinine
    pub raw: f64,
    pub correction: CcrCorrection,
    pub corrected_creatinine: Option<f64>,
    /// mL/min with the floor-corrected creatinine
    pub corrected: Option<f64>,
    /// Empty when no correction applies
    pub note: String,
}

/// Stress factor components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressBreakdown {
    pub base: f64,
    pub temperature: f64,
    pub pressure_ulcer: f64,
    pub total: f64,
}

/// Energy candidates and the resolved prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    /// BMR recalculated at the energy weight
    pub bmr_for_energy: BmrResult,
    pub by_corrected_bmr: f64,
    pub by_corrected_bmr_kcal: i64,
    pub kcal25: i64,
    pub kcal30: i64,
    pub kcal35: i64,
    pub order: EnergyOrder,
    pub final_kcal: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinResult {
    pub weight_for_protein: f64,
    pub base: f64,
    pub applied_stress: f64,
    pub correction_factor: f64,
    pub raw: f64,
    /// Grams/day rounded to one decimal
    pub grams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterResult {
    pub base: f64,
    pub fever_correction: f64,
    pub fever_corrected: bool,
    pub total: f64,
    /// mL/day rounded up
    pub ml: i64,
}

/// Nutrients delivered by an enteral dose
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnteralComponents {
    pub protein_g: f64,
    pub fat_g: f64,
    pub carb_g: f64,
    pub salt_g: f64,
    pub vitamin_k_ug: f64,
    pub water_ml: f64,
}

/// One way of covering a daily volume with whole packages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnteralPackagePlan {
    /// Package volume (mL) to number of packages
    pub counts_by_volume: BTreeMap<u32, u32>,
    /// Volume covered by packages
    pub total_volume_ml: u32,
    /// Volume left over below the smallest package
    pub remainder_ml: u32,
}

impl EnteralPackagePlan {
    pub fn total_package_count(&self) -> u32 {
        self.counts_by_volume.values().sum()
    }
}

impl fmt::Display for EnteralPackagePlan {
    /// e.g. `400mL×4 + 300mL×2 + 22mL`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .counts_by_volume
            .iter()
            .rev()
            .filter(|(_, count)| **count > 0)
            .map(|(volume, count)| format!("{}mL×{}", volume, count))
            .collect();

        match (parts.is_empty(), self.remainder_ml) {
            (true, remainder) => write!(f, "{}mL", remainder),
            (false, 0) => write!(f, "{}", parts.join(" + ")),
            (false, remainder) => write!(f, "{} + {}mL", parts.join(" + "), remainder),
        }
    }
}

/// Enteral dose resolved from the energy order or a typed volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnteralResult {
    pub formula: EnteralFormula,
    pub energy_kcal: f64,
    pub volume_ml: i64,
    pub components: EnteralComponents,
    pub plans: Vec<EnteralPackagePlan>,
    /// Human readable form of `plans`
    pub plan_labels: Vec<String>,
}
