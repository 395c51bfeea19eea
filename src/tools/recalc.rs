//! Recalculation MCP Tool
//!
//! Runs one recalculation pass and adds a display summary.

use serde::Serialize;

use crate::models::RecalcInput;
use crate::nutrition::{self, CalcError, RecalcOutput};

/// Display lines for the main results
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecalcSummary {
    /// e.g. "1539 kcal/day (HB)"
    pub bmr: Option<String>,
    pub bmr_formula: Option<String>,
    pub weight_basis: Option<String>,
    pub energy_kcal: Option<i64>,
    pub energy_order: String,
    pub protein_g: Option<f64>,
    pub water_ml: Option<i64>,
    pub ccr_note: Option<String>,
    pub enteral_plans: Vec<String>,
}

impl RecalcSummary {
    pub fn from_output(output: &RecalcOutput) -> Self {
        Self {
            bmr: output
                .bmr
                .map(|b| format!("{} kcal/day ({})", b.display_value(), b.formula.short_name())),
            bmr_formula: output.bmr.map(|b| b.formula.long_name().to_string()),
            weight_basis: output
                .corrected_weight
                .map(|c| format!("{} ({:.1} kg)", c.basis.long_name(), c.value)),
            energy_kcal: output.energy.as_ref().map(|e| e.final_kcal),
            energy_order: output.form.factors.energy_order.display_name().to_string(),
            protein_g: output.protein.as_ref().map(|p| p.grams),
            water_ml: output.water.as_ref().map(|w| w.ml),
            ccr_note: output
                .ccr
                .as_ref()
                .filter(|c| !c.note.is_empty())
                .map(|c| c.note.clone()),
            enteral_plans: output
                .enteral
                .as_ref()
                .map(|e| e.plan_labels.clone())
                .unwrap_or_default(),
        }
    }
}

/// Response for recalculate
#[derive(Debug, Serialize)]
pub struct RecalculateResponse {
    pub summary: RecalcSummary,
    #[serde(flatten)]
    pub result: RecalcOutput,
}

/// Parse an optional selection code, failing on an unknown one
pub fn parse_selection<T>(
    field: &'static str,
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, CalcError> {
    match value {
        None => Ok(None),
        Some(v) => parse(v).map(Some).ok_or_else(|| CalcError::UnknownSelection {
            field,
            value: v.to_string(),
        }),
    }
}

pub fn recalculate(input: &RecalcInput) -> Result<RecalculateResponse, String> {
    let result = nutrition::recalculate(input).map_err(|e| format!("Recalculation failed: {}", e))?;
    Ok(RecalculateResponse {
        summary: RecalcSummary::from_output(&result),
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Disease, PatientInput, Sex};

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            parse_selection("disease", Some("hd"), Disease::from_str),
            Ok(Some(Disease::Hemodialysis))
        );
        assert_eq!(parse_selection("sex", None, Sex::from_str), Ok(None));
        assert_eq!(
            parse_selection("sex", Some("x"), Sex::from_str),
            Err(CalcError::UnknownSelection {
                field: "sex",
                value: "x".to_string()
            })
        );
    }

    #[test]
    fn test_summary_lines() {
        let input = RecalcInput {
            patient: PatientInput {
                age: Some(30),
                height: Some(170.0),
                weight: Some(65.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let response = recalculate(&input).unwrap();
        assert_eq!(response.summary.bmr.as_deref(), Some("1607 kcal/day (HB)"));
        assert_eq!(
            response.summary.weight_basis.as_deref(),
            Some("Using actual body weight (65.0 kg)")
        );
        assert_eq!(response.summary.energy_kcal, Some(1607));
        assert!(response.summary.ccr_note.is_none());
        assert!(response.summary.enteral_plans.is_empty());
    }
}
