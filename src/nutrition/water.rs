//! Water requirement

use super::rounding::ceil_ml;
use crate::models::{BodyTemperatureLevel, WaterResult};

/// Patient facts the water formulas branch on
#[derive(Debug, Clone, Copy)]
pub struct WaterInput {
    pub age: u32,
    pub actual_weight: f64,
    pub is_hemodialysis: bool,
    pub is_pregnant: bool,
    /// Needed only for pregnant adults
    pub adjusted_weight: Option<f64>,
    pub obesity_degree: Option<f64>,
    pub temperature: BodyTemperatureLevel,
}

/// mL/day before fever correction. Hemodialysis takes precedence over all
/// other branches.
pub fn calculate_base(input: &WaterInput) -> f64 {
    let w = input.actual_weight;
    if input.is_hemodialysis {
        return 15.0 * w;
    }
    if input.age == 0 {
        return 150.0 * w;
    }
    if input.age < 18 {
        return holliday_segar(w);
    }

    let pregnant_obese = input.is_pregnant && input.obesity_degree.is_some_and(|od| od >= 120.0);
    let weight_for_calc = match (pregnant_obese, input.adjusted_weight) {
        (true, Some(adjusted)) => adjusted,
        _ => w,
    };
    let per_kg = match input.age {
        0..=55 => 35.0,
        56..=65 => 30.0,
        _ => 25.0,
    };
    per_kg * weight_for_calc
}

fn holliday_segar(weight: f64) -> f64 {
    if weight < 10.0 {
        100.0 * weight
    } else if weight < 20.0 {
        1000.0 + (weight - 10.0) * 50.0
    } else {
        1500.0 + (weight - 20.0) * 20.0
    }
}

/// Extra mL/day per fever step: per-kg below 15 kg, flat above
pub fn calculate_fever_correction(level: BodyTemperatureLevel, actual_weight: f64) -> f64 {
    let step = level.step() as f64;
    if step == 0.0 {
        return 0.0;
    }
    if actual_weight < 15.0 {
        step * 10.0 * actual_weight
    } else {
        step * 150.0
    }
}

pub fn calculate(input: &WaterInput) -> WaterResult {
    let base = calculate_base(input);
    let fever_corrected =
        !input.is_hemodialysis && input.temperature != BodyTemperatureLevel::Normal;
    let fever_correction = if input.is_hemodialysis {
        0.0
    } else {
        calculate_fever_correction(input.temperature, input.actual_weight)
    };
    let total = base + fever_correction;

    WaterResult {
        base,
        fever_correction,
        fever_corrected,
        total,
        ml: ceil_ml(total),
    }
}
