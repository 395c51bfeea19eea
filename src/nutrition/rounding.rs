//! Rounding policy
//!
//! One function per output class. Halves always round away from zero,
//! never to even.

/// Energy (kcal/day) as a whole number
pub fn round_kcal(kcal: f64) -> i64 {
    kcal.round() as i64
}

/// Protein and similar gram amounts to one decimal place
pub fn round_gram_1dp(gram: f64) -> f64 {
    (gram * 10.0).round() / 10.0
}

/// Total water (mL/day), always rounded up
pub fn ceil_ml(ml: f64) -> i64 {
    ml.ceil() as i64
}

/// Enteral volume (mL/day) as a whole number
pub fn round_enteral_ml(ml: f64) -> i64 {
    ml.round() as i64
}
