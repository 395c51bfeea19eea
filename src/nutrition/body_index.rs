//! BMI, standard weight, obesity degree and body surface area

use crate::models::{BodyIndexResult, Sex};

/// Standard (ideal) body weight in kg
///
/// Under 6 a quadratic in height; 6-17 a cubic in height picked by height
/// band (< 140, 140-148.99, >= 149 cm); adults BMI 22.
pub fn standard_weight(age: u32, height: f64, sex: Sex) -> f64 {
    let h = height;
    if age < 6 {
        return match sex {
            Sex::Male => 0.00206 * h * h - 0.1166 * h + 6.5273,
            Sex::Female => 0.00249 * h * h - 0.1858 * h + 9.036,
        };
    }

    if age < 18 {
        let (a, b, c, d) = match (sex, h) {
            (Sex::Male, h) if h < 140.0 => (0.0000303882, -0.00571495, 0.508124, -9.17791),
            (Sex::Male, h) if h < 149.0 => (-0.000085013, 0.0370692, -4.6558, 191.847),
            (Sex::Male, _) => (-0.000310205, 0.151159, -23.6303, 1231.04),
            (Sex::Female, h) if h < 140.0 => (0.000127719, -0.0414712, 4.8575, -184.492),
            (Sex::Female, h) if h < 149.0 => (-0.00178766, 0.803922, -119.31, 5885.03),
            (Sex::Female, _) => (0.000956401, -0.462755, 75.3058, -4068.31),
        };
        return a * h * h * h + b * h * h + c * h + d;
    }

    h * h * 22.0 * 0.0001
}

pub fn calculate(age: u32, height: f64, weight: f64, sex: Sex) -> BodyIndexResult {
    let height_m = height / 100.0;
    let bmi = weight / (height_m * height_m);
    let standard_weight = standard_weight(age, height, sex);

    // Percent of ideal weight is not used clinically for infants
    let obesity_degree = if age == 0 || standard_weight <= 0.0 {
        None
    } else {
        Some(weight / standard_weight * 100.0)
    };

    BodyIndexResult {
        bmi,
        standard_weight,
        obesity_degree,
    }
}

/// DuBois body surface area in m²
pub fn body_surface_area(height: f64, weight: f64) -> f64 {
    71.84 * height.powf(0.725) * weight.powf(0.425) * 0.0001
}
