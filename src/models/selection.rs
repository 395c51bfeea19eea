//! Selection enums
//!
//! Every choice the clinician makes on the input form, with wire codes and
//! display labels resolved through static match tables.

use serde::{Deserialize, Serialize};

/// Patient sex
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

/// Underlying disease that changes energy/protein defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    #[default]
    None,
    Diabetes,
    /// Renal failure, not on dialysis
    RenalFailure,
    Hemodialysis,
    LiverCirrhosis,
}

impl Disease {
    pub const ALL: [Disease; 5] = [
        Disease::None,
        Disease::Diabetes,
        Disease::RenalFailure,
        Disease::Hemodialysis,
        Disease::LiverCirrhosis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Disease::None => "none",
            Disease::Diabetes => "diabetes",
            Disease::RenalFailure => "renal_failure",
            Disease::Hemodialysis => "hemodialysis",
            Disease::LiverCirrhosis => "liver_cirrhosis",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "" | "none" => Some(Disease::None),
            "diabetes" | "dm" => Some(Disease::Diabetes),
            "renal_failure" | "rf" | "ckd" => Some(Disease::RenalFailure),
            "hemodialysis" | "hd" => Some(Disease::Hemodialysis),
            "liver_cirrhosis" | "lc" => Some(Disease::LiverCirrhosis),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Disease::None => "None",
            Disease::Diabetes => "Diabetes",
            Disease::RenalFailure => "Renal disease (no dialysis)",
            Disease::Hemodialysis => "Hemodialysis",
            Disease::LiverCirrhosis => "Liver cirrhosis",
        }
    }

    /// Diseases that switch adult protein onto standard weight without stress
    pub fn is_protein_exception(&self) -> bool {
        matches!(
            self,
            Disease::RenalFailure | Disease::Hemodialysis | Disease::LiverCirrhosis
        )
    }
}

/// Activity factor applied to BMR-derived energy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityFactor {
    #[default]
    BedriddenComa,
    BedriddenAwake,
    Sitting,
    Wheelchair,
    Walking,
    Rehabilitation15,
    Rehabilitation16,
    Rehabilitation17,
}

impl ActivityFactor {
    pub const ALL: [ActivityFactor; 8] = [
        ActivityFactor::BedriddenComa,
        ActivityFactor::BedriddenAwake,
        ActivityFactor::Sitting,
        ActivityFactor::Wheelchair,
        ActivityFactor::Walking,
        ActivityFactor::Rehabilitation15,
        ActivityFactor::Rehabilitation16,
        ActivityFactor::Rehabilitation17,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityFactor::BedriddenComa => "bedridden_coma",
            ActivityFactor::BedriddenAwake => "bedridden_awake",
            ActivityFactor::Sitting => "sitting",
            ActivityFactor::Wheelchair => "wheelchair",
            ActivityFactor::Walking => "walking",
            ActivityFactor::Rehabilitation15 => "rehabilitation15",
            ActivityFactor::Rehabilitation16 => "rehabilitation16",
            ActivityFactor::Rehabilitation17 => "rehabilitation17",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s.trim().to_lowercase())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityFactor::BedriddenComa => "Bedridden, unconscious (1.0)",
            ActivityFactor::BedriddenAwake => "Bedridden, awake (1.1)",
            ActivityFactor::Sitting => "Sitting up (1.2)",
            ActivityFactor::Wheelchair => "Out of bed (1.3)",
            ActivityFactor::Walking => "Walking (1.4)",
            ActivityFactor::Rehabilitation15 => "Rehabilitation, light (1.5)",
            ActivityFactor::Rehabilitation16 => "Rehabilitation, moderate (1.6)",
            ActivityFactor::Rehabilitation17 => "Rehabilitation, intense (1.7)",
        }
    }
}

/// Base clinical condition for the stress factor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressFactor {
    #[default]
    Normal,
    MildStress,
    InfectMild,
    InfectModerate,
    InfectSevere,
    SurgeryMinor,
    SurgeryModerate,
    SurgeryMajor,
    SurgeryVeryMajor,
    TraumaBone,
    TraumaMuscle,
    TraumaHeadSteroid,
    Burn20,
    Burn40,
    Burn100,
}

impl StressFactor {
    pub const ALL: [StressFactor; 15] = [
        StressFactor::Normal,
        StressFactor::MildStress,
        StressFactor::InfectMild,
        StressFactor::InfectModerate,
        StressFactor::InfectSevere,
        StressFactor::SurgeryMinor,
        StressFactor::SurgeryModerate,
        StressFactor::SurgeryMajor,
        StressFactor::SurgeryVeryMajor,
        StressFactor::TraumaBone,
        StressFactor::TraumaMuscle,
        StressFactor::TraumaHeadSteroid,
        StressFactor::Burn20,
        StressFactor::Burn40,
        StressFactor::Burn100,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StressFactor::Normal => "normal",
            StressFactor::MildStress => "mild_stress",
            StressFactor::InfectMild => "infect_mild",
            StressFactor::InfectModerate => "infect_moderate",
            StressFactor::InfectSevere => "infect_severe",
            StressFactor::SurgeryMinor => "surgery_minor",
            StressFactor::SurgeryModerate => "surgery_moderate",
            StressFactor::SurgeryMajor => "surgery_major",
            StressFactor::SurgeryVeryMajor => "surgery_very_major",
            StressFactor::TraumaBone => "trauma_bone",
            StressFactor::TraumaMuscle => "trauma_muscle",
            StressFactor::TraumaHeadSteroid => "trauma_head_steroid",
            StressFactor::Burn20 => "burn20",
            StressFactor::Burn40 => "burn40",
            StressFactor::Burn100 => "burn100",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s.trim().to_lowercase())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StressFactor::Normal => "Normal (1.0)",
            StressFactor::MildStress => "Mild stress (1.1)",
            StressFactor::InfectMild => "Infection: mild (1.2)",
            StressFactor::InfectModerate => "Infection: moderate (1.5)",
            StressFactor::InfectSevere => "Infection: severe (1.8)",
            StressFactor::SurgeryMinor => "Surgery: cholecystectomy, mastectomy (1.2)",
            StressFactor::SurgeryModerate => "Surgery: subtotal gastrectomy, colectomy (1.4)",
            StressFactor::SurgeryMajor => "Surgery: total gastrectomy, bile duct resection (1.6)",
            StressFactor::SurgeryVeryMajor => {
                "Surgery: pancreatoduodenectomy, hepatectomy, esophagectomy (1.8)"
            }
            StressFactor::TraumaBone => "Trauma: fracture (1.35)",
            StressFactor::TraumaMuscle => "Trauma: muscle injury (1.3)",
            StressFactor::TraumaHeadSteroid => "Trauma: head injury with steroids (1.6)",
            StressFactor::Burn20 => "Burn: 20% (1.5)",
            StressFactor::Burn40 => "Burn: 40% (1.85)",
            StressFactor::Burn100 => "Burn: 100% (2.05)",
        }
    }
}

/// Body temperature band; each step above normal adds stress and water
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyTemperatureLevel {
    #[default]
    Normal,
    Fever37,
    Fever38,
    Fever39,
    Fever40,
}

impl BodyTemperatureLevel {
    pub const ALL: [BodyTemperatureLevel; 5] = [
        BodyTemperatureLevel::Normal,
        BodyTemperatureLevel::Fever37,
        BodyTemperatureLevel::Fever38,
        BodyTemperatureLevel::Fever39,
        BodyTemperatureLevel::Fever40,
    ];

    /// Ordinal step, 0 for normal up to 4
    pub fn step(&self) -> u32 {
        match self {
            BodyTemperatureLevel::Normal => 0,
            BodyTemperatureLevel::Fever37 => 1,
            BodyTemperatureLevel::Fever38 => 2,
            BodyTemperatureLevel::Fever39 => 3,
            BodyTemperatureLevel::Fever40 => 4,
        }
    }

    pub fn from_step(step: u32) -> Option<Self> {
        Self::ALL.get(step as usize).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyTemperatureLevel::Normal => "normal",
            BodyTemperatureLevel::Fever37 => "fever37",
            BodyTemperatureLevel::Fever38 => "fever38",
            BodyTemperatureLevel::Fever39 => "fever39",
            BodyTemperatureLevel::Fever40 => "fever40",
        }
    }

    /// Accepts the wire code or the bare ordinal ("0".."4")
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if let Ok(step) = lower.parse::<u32>() {
            return Self::from_step(step);
        }
        Self::ALL.into_iter().find(|l| l.as_str() == lower)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BodyTemperatureLevel::Normal => "Normal (up to 36.9°C)",
            BodyTemperatureLevel::Fever37 => "37°C range (stress +0.2)",
            BodyTemperatureLevel::Fever38 => "38°C range (stress +0.4)",
            BodyTemperatureLevel::Fever39 => "39°C range (stress +0.6)",
            BodyTemperatureLevel::Fever40 => "40°C and above (stress +0.8)",
        }
    }
}

/// Pressure ulcer depth (DESIGN-R)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureUlcerLevel {
    #[default]
    None,
    D1ToD2,
    D3,
    D4,
    D5,
}

impl PressureUlcerLevel {
    pub const ALL: [PressureUlcerLevel; 5] = [
        PressureUlcerLevel::None,
        PressureUlcerLevel::D1ToD2,
        PressureUlcerLevel::D3,
        PressureUlcerLevel::D4,
        PressureUlcerLevel::D5,
    ];

    pub fn step(&self) -> u32 {
        match self {
            PressureUlcerLevel::None => 0,
            PressureUlcerLevel::D1ToD2 => 1,
            PressureUlcerLevel::D3 => 2,
            PressureUlcerLevel::D4 => 3,
            PressureUlcerLevel::D5 => 4,
        }
    }

    pub fn from_step(step: u32) -> Option<Self> {
        Self::ALL.get(step as usize).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PressureUlcerLevel::None => "none",
            PressureUlcerLevel::D1ToD2 => "d1_to_d2",
            PressureUlcerLevel::D3 => "d3",
            PressureUlcerLevel::D4 => "d4",
            PressureUlcerLevel::D5 => "d5",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if let Ok(step) = lower.parse::<u32>() {
            return Self::from_step(step);
        }
        Self::ALL.into_iter().find(|l| l.as_str() == lower)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PressureUlcerLevel::None => "None",
            PressureUlcerLevel::D1ToD2 => "d1-d2 (stress +0.1)",
            PressureUlcerLevel::D3 => "D3 (stress +0.2)",
            PressureUlcerLevel::D4 => "D4 (stress +0.3)",
            PressureUlcerLevel::D5 => "D5 (stress +0.4)",
        }
    }
}

/// Protein restriction multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProteinCorrection {
    #[default]
    #[serde(rename = "none")]
    None,
    /// CKD stage 3b to 5 (x0.7)
    #[serde(rename = "ckd_3b_to_5")]
    Ckd3bTo5,
    /// Protein intolerance in liver cirrhosis (x0.5)
    #[serde(rename = "liver_cirrhosis_poor")]
    LiverCirrhosisPoor,
}

impl ProteinCorrection {
    pub const ALL: [ProteinCorrection; 3] = [
        ProteinCorrection::None,
        ProteinCorrection::Ckd3bTo5,
        ProteinCorrection::LiverCirrhosisPoor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProteinCorrection::None => "none",
            ProteinCorrection::Ckd3bTo5 => "ckd_3b_to_5",
            ProteinCorrection::LiverCirrhosisPoor => "liver_cirrhosis_poor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Some(ProteinCorrection::None),
            "ckd_3b_to_5" | "ckd" => Some(ProteinCorrection::Ckd3bTo5),
            "liver_cirrhosis_poor" | "liver_poor" => Some(ProteinCorrection::LiverCirrhosisPoor),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProteinCorrection::None => "None",
            ProteinCorrection::Ckd3bTo5 => "CKD 3b-5 (0.7)",
            ProteinCorrection::LiverCirrhosisPoor => "Protein intolerance (0.5)",
        }
    }
}

/// How the prescribed energy is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyOrder {
    #[default]
    CorrectedBmrBased,
    Kcal25,
    Kcal30,
    Kcal35,
    Manual,
}

impl EnergyOrder {
    pub const ALL: [EnergyOrder; 5] = [
        EnergyOrder::CorrectedBmrBased,
        EnergyOrder::Kcal25,
        EnergyOrder::Kcal30,
        EnergyOrder::Kcal35,
        EnergyOrder::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyOrder::CorrectedBmrBased => "corrected_bmr_based",
            EnergyOrder::Kcal25 => "kcal25",
            EnergyOrder::Kcal30 => "kcal30",
            EnergyOrder::Kcal35 => "kcal35",
            EnergyOrder::Manual => "manual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "corrected_bmr_based" | "bmr" | "bmr_estimated" => Some(EnergyOrder::CorrectedBmrBased),
            "kcal25" => Some(EnergyOrder::Kcal25),
            "kcal30" => Some(EnergyOrder::Kcal30),
            "kcal35" => Some(EnergyOrder::Kcal35),
            "manual" => Some(EnergyOrder::Manual),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EnergyOrder::CorrectedBmrBased => "Corrected BMR x factors",
            EnergyOrder::Kcal25 => "25 kcal/kg standard weight",
            EnergyOrder::Kcal30 => "30 kcal/kg standard weight",
            EnergyOrder::Kcal35 => "35 kcal/kg standard weight",
            EnergyOrder::Manual => "Manual entry",
        }
    }
}

/// Enteral nutrition products with a known composition and package table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnteralFormula {
    // 1.0 kcal/mL
    Meibalance10,
    PeptamenIntense10,
    Mein10,
    GlucernaRex10,
    RacolNf10,
    RacolNfSemiSolid10,
    Elental10,
    // 1.5 kcal/mL
    PeptamenPrebio15,
    PeptamenAf15,
    IsocalSupport15,
    Lacphia15,
    PgSoftEj15,
    EnsureH15,
    // 1.6 kcal/mL
    RenalenMp16,
    Inoras16,
}

impl EnteralFormula {
    pub const ALL: [EnteralFormula; 15] = [
        EnteralFormula::Meibalance10,
        EnteralFormula::PeptamenIntense10,
        EnteralFormula::Mein10,
        EnteralFormula::GlucernaRex10,
        EnteralFormula::RacolNf10,
        EnteralFormula::RacolNfSemiSolid10,
        EnteralFormula::Elental10,
        EnteralFormula::PeptamenPrebio15,
        EnteralFormula::PeptamenAf15,
        EnteralFormula::IsocalSupport15,
        EnteralFormula::Lacphia15,
        EnteralFormula::PgSoftEj15,
        EnteralFormula::EnsureH15,
        EnteralFormula::RenalenMp16,
        EnteralFormula::Inoras16,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnteralFormula::Meibalance10 => "meibalance10",
            EnteralFormula::PeptamenIntense10 => "peptamen_intense10",
            EnteralFormula::Mein10 => "mein10",
            EnteralFormula::GlucernaRex10 => "glucerna_rex10",
            EnteralFormula::RacolNf10 => "racol_nf10",
            EnteralFormula::RacolNfSemiSolid10 => "racol_nf_semi_solid10",
            EnteralFormula::Elental10 => "elental10",
            EnteralFormula::PeptamenPrebio15 => "peptamen_prebio15",
            EnteralFormula::PeptamenAf15 => "peptamen_af15",
            EnteralFormula::IsocalSupport15 => "isocal_support15",
            EnteralFormula::Lacphia15 => "lacphia15",
            EnteralFormula::PgSoftEj15 => "pg_soft_ej15",
            EnteralFormula::EnsureH15 => "ensure_h15",
            EnteralFormula::RenalenMp16 => "renalen_mp16",
            EnteralFormula::Inoras16 => "inoras16",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|f| f.as_str() == lower)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EnteralFormula::Meibalance10 => "Meibalance 1.0 (1.0 kcal/mL)",
            EnteralFormula::PeptamenIntense10 => "Peptamen Intense (1.0 kcal/mL)",
            EnteralFormula::Mein10 => "MEIN (1.0 kcal/mL)",
            EnteralFormula::GlucernaRex10 => "Glucerna REX (1.0 kcal/mL)",
            EnteralFormula::RacolNf10 => "Racol NF (1.0 kcal/mL)",
            EnteralFormula::RacolNfSemiSolid10 => "Racol NF semi-solid (1.0 kcal/mL)",
            EnteralFormula::Elental10 => "Elental (1.0 kcal/mL)",
            EnteralFormula::PeptamenPrebio15 => "Peptamen Prebio (1.5 kcal/mL)",
            EnteralFormula::PeptamenAf15 => "Peptamen AF (1.5 kcal/mL)",
            EnteralFormula::IsocalSupport15 => "Isocal Support (1.5 kcal/mL)",
            EnteralFormula::Lacphia15 => "Lacphia 1.5 (1.5 kcal/mL)",
            EnteralFormula::PgSoftEj15 => "PG Soft EJ (1.5 kcal/mL)",
            EnteralFormula::EnsureH15 => "Ensure H (1.5 kcal/mL)",
            EnteralFormula::RenalenMp16 => "Renalen MP (1.6 kcal/mL)",
            EnteralFormula::Inoras16 => "Inoras (1.6 kcal/mL)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_codes_match_serde() {
        for f in EnteralFormula::ALL {
            let json = serde_json::to_string(&f).unwrap();
            assert_eq!(json, format!("\"{}\"", f.as_str()));
        }
        for s in StressFactor::ALL {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{}\"", s.as_str()));
        }
        for p in ProteinCorrection::ALL {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.as_str()));
        }
        for l in PressureUlcerLevel::ALL {
            let json = serde_json::to_string(&l).unwrap();
            assert_eq!(json, format!("\"{}\"", l.as_str()));
        }
    }

    #[test]
    fn test_from_str_round_trips_as_str() {
        for a in ActivityFactor::ALL {
            assert_eq!(ActivityFactor::from_str(a.as_str()), Some(a));
        }
        for e in EnergyOrder::ALL {
            assert_eq!(EnergyOrder::from_str(e.as_str()), Some(e));
        }
        for d in Disease::ALL {
            assert_eq!(Disease::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Disease::from_str("HD"), Some(Disease::Hemodialysis));
        assert_eq!(Sex::from_str("unknown"), None);
    }

    #[test]
    fn test_levels_accept_ordinals() {
        assert_eq!(BodyTemperatureLevel::from_str("3"), Some(BodyTemperatureLevel::Fever39));
        assert_eq!(BodyTemperatureLevel::from_str("5"), None);
        assert_eq!(PressureUlcerLevel::from_str("1"), Some(PressureUlcerLevel::D1ToD2));
        assert_eq!(PressureUlcerLevel::D5.step(), 4);
    }

    #[test]
    fn test_protein_exception_diseases() {
        assert!(Disease::RenalFailure.is_protein_exception());
        assert!(Disease::Hemodialysis.is_protein_exception());
        assert!(Disease::LiverCirrhosis.is_protein_exception());
        assert!(!Disease::Diabetes.is_protein_exception());
        assert!(!Disease::None.is_protein_exception());
    }
}
