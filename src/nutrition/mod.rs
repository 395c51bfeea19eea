//! Nutrition therapy calculation module
//!
//! Pure calculators for each clinical target plus the recalculation pass
//! that sequences them.

pub mod bmr;
pub mod body_index;
pub mod ccr;
pub mod corrected_weight;
pub mod energy;
pub mod enteral;
pub mod error;
pub mod orchestrator;
pub mod protein;
pub mod rounding;
pub mod tables;
pub mod validation;
pub mod water;
pub mod weight_selector;

pub use enteral::{build_plans, EnteralDose};
pub use error::{CalcError, CalcResult};
pub use orchestrator::{recalculate, FormState, RecalcOutput, UiHints};
pub use validation::{ValidatedField, ValidationError};
pub use weight_selector::WeightUsage;
