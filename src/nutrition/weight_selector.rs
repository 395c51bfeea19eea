//! Weight used for each downstream calculation

use std::fmt;

use super::error::{CalcError, CalcResult};
use super::protein::use_standard_weight_for_protein;
use crate::models::Disease;

/// Which calculation the weight feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUsage {
    Energy,
    Protein,
}

impl WeightUsage {
    /// Parse a usage tag from the tool boundary
    pub fn parse(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "energy" => Ok(WeightUsage::Energy),
            "protein" => Ok(WeightUsage::Protein),
            other => Err(CalcError::UnknownWeightUsage(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUsage::Energy => "energy",
            WeightUsage::Protein => "protein",
        }
    }
}

impl fmt::Display for WeightUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weights available to the selector
#[derive(Debug, Clone, Copy)]
pub struct WeightCandidates {
    pub actual: f64,
    pub corrected: f64,
    pub standard: f64,
}

pub fn select(usage: WeightUsage, age: u32, weights: &WeightCandidates, disease: Disease) -> f64 {
    match usage {
        WeightUsage::Energy => {
            if age == 0 {
                weights.actual
            } else {
                weights.corrected
            }
        }
        WeightUsage::Protein => {
            if age < 18 {
                weights.actual
            } else if use_standard_weight_for_protein(age, disease) {
                weights.standard
            } else {
                weights.corrected
            }
        }
    }
}
