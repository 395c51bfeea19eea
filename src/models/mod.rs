//! Data models
//!
//! Input records, selection enums and calculation results.

mod patient;
mod results;
mod selection;

pub use patient::{EditState, FactorSelections, PatientInput, RecalcAction, RecalcInput};
pub use results::{
    BmrFormula, BmrResult, BodyIndexResult, CcrCorrection, CcrResult, CorrectedWeightResult,
    EnergyResult, EnteralComponents, EnteralPackagePlan, EnteralResult, ProteinResult,
    StressBreakdown, WaterResult, WeightBasis,
};
pub use selection::{
    ActivityFactor, BodyTemperatureLevel, Disease, EnergyOrder, EnteralFormula,
    PressureUlcerLevel, ProteinCorrection, Sex, StressFactor,
};
