//! TNT Tools module
//!
//! MCP tool implementations for the Total Nutrition Therapy calculator.

pub mod enteral;
pub mod options;
pub mod recalc;
pub mod status;
pub mod weights;
