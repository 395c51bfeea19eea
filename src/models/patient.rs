//! Recalculation input record
//!
//! Everything the caller round-trips through its form: patient demographics,
//! factor selections, the sticky edit flags, and which field was just edited.

use serde::{Deserialize, Serialize};

use super::selection::{
    ActivityFactor, BodyTemperatureLevel, Disease, EnergyOrder, EnteralFormula,
    PressureUlcerLevel, ProteinCorrection, Sex, StressFactor,
};

/// Patient demographics and labs, as entered (unvalidated)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    /// Years; 0 means infant
    pub age: Option<i32>,
    /// Centimetres
    pub height: Option<f64>,
    /// Kilograms
    pub weight: Option<f64>,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub pregnant: bool,
    #[serde(default)]
    pub disease: Disease,
    /// Only meaningful with liver cirrhosis
    #[serde(default)]
    pub hepatic_encephalopathy: bool,
    /// mg/dL
    pub serum_creatinine: Option<f64>,
}

/// Clinical factor selections and user-entered overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorSelections {
    pub activity_factor: ActivityFactor,
    pub stress_factor: StressFactor,
    pub body_temperature: BodyTemperatureLevel,
    pub pressure_ulcer: PressureUlcerLevel,
    pub protein_correction: ProteinCorrection,
    pub energy_order: EnergyOrder,
    pub manual_energy_value: Option<i32>,
    /// kcal/day currently shown in the energy field (synced or typed)
    pub energy_order_value: Option<f64>,
    pub enteral_formula: Option<EnteralFormula>,
    /// mL/day typed by the user to fine tune the enteral dose
    pub enteral_volume_input: Option<i32>,
}

/// Sticky "the user chose this" flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditState {
    pub is_energy_user_edited: bool,
    pub is_protein_correction_user_edited: bool,
}

/// Which field triggered this recalculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecalcAction {
    /// First load or a plain resubmit
    Initial,
    /// Age, height, weight or sex changed
    Anthropometric,
    Disease,
    HepaticFlag,
    ProteinCorrection,
    /// Energy order selector changed
    EnergyOrder,
    /// Energy value typed directly
    EnergyValue,
    EnteralVolume,
    EnteralFormula,
    Creatinine,
    Other(String),
}

impl RecalcAction {
    /// Parse the free-text action tag sent by the form
    pub fn parse(tag: Option<&str>) -> Self {
        let lower = tag.unwrap_or("").trim().to_lowercase();
        match lower.as_str() {
            "" => RecalcAction::Initial,
            "age" | "height" | "weight" | "sex" | "body" => RecalcAction::Anthropometric,
            "disease" => RecalcAction::Disease,
            "hepatic" => RecalcAction::HepaticFlag,
            "protein" => RecalcAction::ProteinCorrection,
            "order" => RecalcAction::EnergyOrder,
            "energy" | "manual" => RecalcAction::EnergyValue,
            "volume" => RecalcAction::EnteralVolume,
            "formula" => RecalcAction::EnteralFormula,
            "creatinine" => RecalcAction::Creatinine,
            _ => RecalcAction::Other(lower),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecalcAction::Initial => "",
            RecalcAction::Anthropometric => "body",
            RecalcAction::Disease => "disease",
            RecalcAction::HepaticFlag => "hepatic",
            RecalcAction::ProteinCorrection => "protein",
            RecalcAction::EnergyOrder => "order",
            RecalcAction::EnergyValue => "energy",
            RecalcAction::EnteralVolume => "volume",
            RecalcAction::EnteralFormula => "formula",
            RecalcAction::Creatinine => "creatinine",
            RecalcAction::Other(tag) => tag,
        }
    }

    /// Actions after which an unedited protein correction is re-defaulted
    pub fn redefaults_protein(&self) -> bool {
        matches!(
            self,
            RecalcAction::Initial
                | RecalcAction::Disease
                | RecalcAction::Anthropometric
                | RecalcAction::HepaticFlag
        )
    }
}

/// One full recalculation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecalcInput {
    pub patient: PatientInput,
    pub factors: FactorSelections,
    pub edit: EditState,
    pub action: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action_tags() {
        assert_eq!(RecalcAction::parse(None), RecalcAction::Initial);
        assert_eq!(RecalcAction::parse(Some(" Weight ")), RecalcAction::Anthropometric);
        assert_eq!(RecalcAction::parse(Some("VOLUME")), RecalcAction::EnteralVolume);
        assert_eq!(RecalcAction::parse(Some("manual")), RecalcAction::EnergyValue);
        assert_eq!(
            RecalcAction::parse(Some("stress")),
            RecalcAction::Other("stress".to_string())
        );
    }

    #[test]
    fn test_protein_redefault_actions() {
        assert!(RecalcAction::Disease.redefaults_protein());
        assert!(RecalcAction::HepaticFlag.redefaults_protein());
        assert!(!RecalcAction::ProteinCorrection.redefaults_protein());
        assert!(!RecalcAction::EnteralVolume.redefaults_protein());
    }

    #[test]
    fn test_input_deserializes_with_defaults() {
        let input: RecalcInput = serde_json::from_str(
            r#"{"patient": {"age": 30, "height": 170.0, "weight": 60.0}}"#,
        )
        .unwrap();
        assert_eq!(input.patient.sex, Sex::Male);
        assert_eq!(input.factors.energy_order, EnergyOrder::CorrectedBmrBased);
        assert!(!input.edit.is_energy_user_edited);
        assert!(input.action.is_none());
    }
}
