//! TNT MCP Server Implementation
//!
//! Implements the MCP server with all TNT tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::ManualLinkConfig;
use crate::models::{
    ActivityFactor, BodyTemperatureLevel, Disease, EditState, EnergyOrder, EnteralFormula,
    FactorSelections, PatientInput, PressureUlcerLevel, ProteinCorrection, RecalcInput, Sex,
    StressFactor,
};
use crate::nutrition::CalcError;
use crate::tools::enteral;
use crate::tools::options;
use crate::tools::recalc::{self, parse_selection};
use crate::tools::status::StatusTracker;
use crate::tools::weights;

/// TNT MCP Service
#[derive(Clone)]
pub struct TntService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    manual_link: ManualLinkConfig,
    tool_router: ToolRouter<TntService>,
}

impl TntService {
    pub fn new(manual_link: ManualLinkConfig) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            manual_link,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Recalculation Parameter Structs
// ============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct RecalculateParams {
    /// Age in years (0 for infants)
    pub age: Option<i32>,
    /// Height in cm
    pub height: Option<f64>,
    /// Weight in kg
    pub weight: Option<f64>,
    /// Sex code (male, female)
    pub sex: Option<String>,
    #[serde(default)]
    pub pregnant: bool,
    /// Disease code (see list_options)
    pub disease: Option<String>,
    /// Hepatic encephalopathy, only used with liver cirrhosis
    #[serde(default)]
    pub hepatic_encephalopathy: bool,
    /// Serum creatinine in mg/dL
    pub serum_creatinine: Option<f64>,

    pub activity_factor: Option<String>,
    pub stress_factor: Option<String>,
    pub body_temperature: Option<String>,
    pub pressure_ulcer: Option<String>,
    pub protein_correction: Option<String>,
    pub energy_order: Option<String>,
    /// kcal/day for the manual energy order
    pub manual_energy_value: Option<i32>,
    /// kcal/day currently shown in the energy field
    pub energy_order_value: Option<f64>,
    pub enteral_formula: Option<String>,
    /// mL/day typed by the user
    pub enteral_volume_input: Option<i32>,

    /// Edit flags returned in the previous response's form.edit
    #[serde(default)]
    pub is_energy_user_edited: bool,
    #[serde(default)]
    pub is_protein_correction_user_edited: bool,

    /// Which field changed (age, disease, hepatic, protein, order, energy, formula, volume, creatinine). Omit on first call.
    pub action: Option<String>,
}

impl RecalculateParams {
    fn into_input(self) -> Result<RecalcInput, CalcError> {
        let patient = PatientInput {
            age: self.age,
            height: self.height,
            weight: self.weight,
            sex: parse_selection("sex", self.sex.as_deref(), Sex::from_str)?.unwrap_or_default(),
            pregnant: self.pregnant,
            disease: parse_selection("disease", self.disease.as_deref(), Disease::from_str)?
                .unwrap_or_default(),
            hepatic_encephalopathy: self.hepatic_encephalopathy,
            serum_creatinine: self.serum_creatinine,
        };

        let factors = FactorSelections {
            activity_factor: parse_selection(
                "activity_factor",
                self.activity_factor.as_deref(),
                ActivityFactor::from_str,
            )?
            .unwrap_or_default(),
            stress_factor: parse_selection(
                "stress_factor",
                self.stress_factor.as_deref(),
                StressFactor::from_str,
            )?
            .unwrap_or_default(),
            body_temperature: parse_selection(
                "body_temperature",
                self.body_temperature.as_deref(),
                BodyTemperatureLevel::from_str,
            )?
            .unwrap_or_default(),
            pressure_ulcer: parse_selection(
                "pressure_ulcer",
                self.pressure_ulcer.as_deref(),
                PressureUlcerLevel::from_str,
            )?
            .unwrap_or_default(),
            protein_correction: parse_selection(
                "protein_correction",
                self.protein_correction.as_deref(),
                ProteinCorrection::from_str,
            )?
            .unwrap_or_default(),
            energy_order: parse_selection(
                "energy_order",
                self.energy_order.as_deref(),
                EnergyOrder::from_str,
            )?
            .unwrap_or_default(),
            manual_energy_value: self.manual_energy_value,
            energy_order_value: self.energy_order_value,
            enteral_formula: parse_selection(
                "enteral_formula",
                self.enteral_formula.as_deref(),
                EnteralFormula::from_str,
            )?,
            enteral_volume_input: self.enteral_volume_input,
        };

        Ok(RecalcInput {
            patient,
            factors,
            edit: EditState {
                is_energy_user_edited: self.is_energy_user_edited,
                is_protein_correction_user_edited: self.is_protein_correction_user_edited,
            },
            action: self.action,
        })
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AllocateEnteralPackagesParams {
    /// Enteral formula code (see list_options)
    pub formula: String,
    /// Daily volume in mL; takes precedence over energy_kcal
    pub volume_ml: Option<i64>,
    /// Daily energy in kcal
    pub energy_kcal: Option<f64>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct DosingWeightParams {
    /// Which calculation the weight feeds (energy, protein)
    pub usage: String,
    pub age: Option<i32>,
    /// Height in cm
    pub height: Option<f64>,
    /// Weight in kg
    pub weight: Option<f64>,
    /// Sex code (male, female)
    pub sex: Option<String>,
    /// Disease code (see list_options)
    pub disease: Option<String>,
}

impl DosingWeightParams {
    fn patient(&self) -> Result<PatientInput, CalcError> {
        Ok(PatientInput {
            age: self.age,
            height: self.height,
            weight: self.weight,
            sex: parse_selection("sex", self.sex.as_deref(), Sex::from_str)?.unwrap_or_default(),
            disease: parse_selection("disease", self.disease.as_deref(), Disease::from_str)?
                .unwrap_or_default(),
            ..Default::default()
        })
    }
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl TntService {
    // --- Status ---

    #[tool(description = "Get the current status of the TNT service including build info, process information and recalculations served")]
    async fn tnt_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for driving the calculator. Call this before the first recalculate or when unsure how to round-trip the form state.")]
    fn tnt_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::TNT_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(TNT_INSTRUCTIONS)]))
    }

    #[tool(description = "Get the configured clinical manual link, if enabled")]
    fn manual_link(&self) -> Result<CallToolResult, McpError> {
        let json = serde_json::to_string_pretty(&self.manual_link)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Calculation ---

    #[tool(description = "List every selector code with its label and coefficient: sex, disease, activity, stress, temperature, pressure ulcer, protein correction, energy order and enteral formulas")]
    fn list_options(&self) -> Result<CallToolResult, McpError> {
        let result = options::list_options();
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Recalculate BMR, body index, dosing weight, CCr, energy, protein, water and enteral targets. Send back the form values and edit flags from the previous response, plus the action that changed.")]
    async fn recalculate(&self, Parameters(p): Parameters<RecalculateParams>) -> Result<CallToolResult, McpError> {
        let input = p.into_input().map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let result = recalc::recalculate(&input).map_err(|e| McpError::internal_error(e, None))?;
        self.status_tracker.lock().await.record_recalculation();
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Convert an enteral dose between mL and kcal for one formula and split it into whole packages")]
    fn allocate_enteral_packages(&self, Parameters(p): Parameters<AllocateEnteralPackagesParams>) -> Result<CallToolResult, McpError> {
        let formula = parse_selection("enteral_formula", Some(p.formula.as_str()), EnteralFormula::from_str)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?
            .ok_or_else(|| McpError::invalid_params("formula is required", None))?;
        let result = enteral::allocate_enteral_packages(formula, p.volume_ml, p.energy_kcal)
            .map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the body weight used for energy or protein dosing, with the actual, corrected and standard candidates")]
    fn dosing_weight(&self, Parameters(p): Parameters<DosingWeightParams>) -> Result<CallToolResult, McpError> {
        let patient = p.patient().map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let result = weights::dosing_weight(&p.usage, &patient).map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for TntService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tnt".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Total Nutrition Therapy calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Total Nutrition Therapy (TNT) - Clinical nutrition targets from a patient record. \
                 IMPORTANT: Call tnt_instructions first. \
                 Selectors: list_options. \
                 Calculation: recalculate (stateless; send back the returned form and edit flags each time). \
                 Enteral: allocate_enteral_packages. \
                 Weights: dosing_weight. \
                 Misc: tnt_status, manual_link."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_map_to_input() {
        let params = RecalculateParams {
            age: Some(70),
            height: Some(160.0),
            weight: Some(50.0),
            sex: Some("female".to_string()),
            disease: Some("hd".to_string()),
            energy_order: Some("kcal30".to_string()),
            enteral_formula: Some("mein10".to_string()),
            is_energy_user_edited: true,
            action: Some("order".to_string()),
            ..Default::default()
        };
        let input = params.into_input().unwrap();
        assert_eq!(input.patient.sex, Sex::Female);
        assert_eq!(input.patient.disease, Disease::Hemodialysis);
        assert_eq!(input.factors.energy_order, EnergyOrder::Kcal30);
        assert_eq!(input.factors.enteral_formula, Some(EnteralFormula::Mein10));
        assert_eq!(input.factors.stress_factor, StressFactor::default());
        assert!(input.edit.is_energy_user_edited);
        assert_eq!(input.action.as_deref(), Some("order"));
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let params = RecalculateParams {
            stress_factor: Some("meteor_strike".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.into_input(),
            Err(CalcError::UnknownSelection {
                field: "stress_factor",
                value: "meteor_strike".to_string()
            })
        );
    }

    #[test]
    fn test_dosing_weight_params_map_to_patient() {
        let params = DosingWeightParams {
            usage: "protein".to_string(),
            age: Some(40),
            height: Some(170.0),
            weight: Some(65.0),
            sex: Some("male".to_string()),
            disease: Some("rf".to_string()),
        };
        let patient = params.patient().unwrap();
        assert_eq!(patient.disease, Disease::RenalFailure);
        let result = weights::dosing_weight(&params.usage, &patient).unwrap();
        assert!((result.weight_kg - result.standard_kg).abs() < 1e-9);

        let params = DosingWeightParams {
            usage: "energy".to_string(),
            disease: Some("gout".to_string()),
            ..Default::default()
        };
        assert!(params.patient().is_err());
    }

    #[test]
    fn test_server_info() {
        let service = TntService::new(ManualLinkConfig::default());
        let info = service.get_info();
        assert_eq!(info.server_info.name, "tnt");
        assert!(info.instructions.unwrap().contains("recalculate"));
    }
}
