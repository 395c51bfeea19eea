//! Option Catalogue MCP Tool
//!
//! Wire codes and display labels for every selector, so a client can build
//! its form without hard-coding them.

use serde::Serialize;

use crate::models::{
    ActivityFactor, BmrFormula, BodyTemperatureLevel, CcrCorrection, Disease, EnergyOrder,
    EnteralFormula, PressureUlcerLevel, ProteinCorrection, Sex, StressFactor, WeightBasis,
};
use crate::nutrition::{ccr, tables};

/// One selectable option
#[derive(Debug, Clone, Serialize)]
pub struct OptionEntry {
    pub code: &'static str,
    pub label: &'static str,
    /// Numeric coefficient behind the option, where there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnteralFormulaEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub kcal_per_ml: f64,
    pub package_sizes_ml: Vec<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelEntry {
    pub code: &'static str,
    pub short_name: &'static str,
    pub long_name: &'static str,
}

/// Response for list_options
#[derive(Debug, Serialize)]
pub struct OptionsCatalogue {
    pub sex: Vec<OptionEntry>,
    pub disease: Vec<OptionEntry>,
    pub activity_factor: Vec<OptionEntry>,
    pub stress_factor: Vec<OptionEntry>,
    pub body_temperature: Vec<OptionEntry>,
    pub pressure_ulcer: Vec<OptionEntry>,
    pub protein_correction: Vec<OptionEntry>,
    pub energy_order: Vec<OptionEntry>,
    pub enteral_formula: Vec<EnteralFormulaEntry>,
    pub bmr_formula: Vec<LabelEntry>,
    pub weight_basis: Vec<LabelEntry>,
    pub ccr_notes: Vec<OptionEntry>,
}

fn entry(code: &'static str, label: &'static str, value: Option<f64>) -> OptionEntry {
    OptionEntry { code, label, value }
}

pub fn list_options() -> OptionsCatalogue {
    OptionsCatalogue {
        sex: Sex::ALL
            .iter()
            .map(|s| entry(s.as_str(), s.display_name(), None))
            .collect(),
        disease: Disease::ALL
            .iter()
            .map(|d| entry(d.as_str(), d.display_name(), None))
            .collect(),
        activity_factor: ActivityFactor::ALL
            .iter()
            .map(|a| entry(a.as_str(), a.display_name(), Some(tables::activity_factor(*a))))
            .collect(),
        stress_factor: StressFactor::ALL
            .iter()
            .map(|s| entry(s.as_str(), s.display_name(), Some(tables::stress_factor(*s))))
            .collect(),
        body_temperature: BodyTemperatureLevel::ALL
            .iter()
            .map(|l| entry(l.as_str(), l.display_name(), Some(tables::temperature_addition(*l))))
            .collect(),
        pressure_ulcer: PressureUlcerLevel::ALL
            .iter()
            .map(|l| {
                entry(l.as_str(), l.display_name(), Some(tables::pressure_ulcer_addition(*l)))
            })
            .collect(),
        protein_correction: ProteinCorrection::ALL
            .iter()
            .map(|p| {
                entry(p.as_str(), p.display_name(), Some(tables::protein_correction_factor(*p)))
            })
            .collect(),
        energy_order: EnergyOrder::ALL
            .iter()
            .map(|o| entry(o.as_str(), o.display_name(), tables::energy_per_kg(*o)))
            .collect(),
        enteral_formula: EnteralFormula::ALL
            .iter()
            .map(|f| EnteralFormulaEntry {
                code: f.as_str(),
                label: f.display_name(),
                kcal_per_ml: (1.0 / tables::enteral_composition(*f).volume_per_kcal * 10.0)
                    .round()
                    / 10.0,
                package_sizes_ml: tables::enteral_package_sizes(*f).to_vec(),
            })
            .collect(),
        bmr_formula: [
            (BmrFormula::InfantFormula, "infant_formula"),
            (BmrFormula::ChildFormula, "child_formula"),
            (BmrFormula::AdultPrimary, "adult_primary"),
            (BmrFormula::AdultAlternate, "adult_alternate"),
        ]
        .into_iter()
        .map(|(f, code)| LabelEntry {
            code,
            short_name: f.short_name(),
            long_name: f.long_name(),
        })
        .collect(),
        weight_basis: [
            (WeightBasis::Actual, "actual"),
            (WeightBasis::Standard, "standard"),
            (WeightBasis::Adjusted, "adjusted"),
        ]
        .into_iter()
        .map(|(b, code)| LabelEntry {
            code,
            short_name: b.kind_name(),
            long_name: b.long_name(),
        })
        .collect(),
        ccr_notes: [
            (CcrCorrection::MaleFloor, "male_floor"),
            (CcrCorrection::FemaleFloor, "female_floor"),
        ]
        .into_iter()
        .map(|(c, code)| entry(code, ccr::note(c), ccr::corrected_creatinine(c)))
        .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_covers_every_variant() {
        let c = list_options();
        assert_eq!(c.sex.len(), 2);
        assert_eq!(c.disease.len(), 5);
        assert_eq!(c.activity_factor.len(), 8);
        assert_eq!(c.stress_factor.len(), 15);
        assert_eq!(c.body_temperature.len(), 5);
        assert_eq!(c.pressure_ulcer.len(), 5);
        assert_eq!(c.protein_correction.len(), 3);
        assert_eq!(c.energy_order.len(), 5);
        assert_eq!(c.enteral_formula.len(), 15);
        assert_eq!(c.bmr_formula.len(), 4);
        assert_eq!(c.weight_basis.len(), 3);
        assert_eq!(c.ccr_notes.len(), 2);
    }

    #[test]
    fn test_enteral_entries() {
        let c = list_options();
        let af = c
            .enteral_formula
            .iter()
            .find(|e| e.code == "peptamen_af15")
            .unwrap();
        assert_eq!(af.kcal_per_ml, 1.5);
        assert_eq!(af.package_sizes_ml, vec![200]);

        let renalen = c
            .enteral_formula
            .iter()
            .find(|e| e.code == "renalen_mp16")
            .unwrap();
        assert_eq!(renalen.kcal_per_ml, 1.6);
    }

    #[test]
    fn test_energy_order_values() {
        let c = list_options();
        let kcal30 = c.energy_order.iter().find(|e| e.code == "kcal30").unwrap();
        assert_eq!(kcal30.value, Some(30.0));
        let bmr = c
            .energy_order
            .iter()
            .find(|e| e.code == "corrected_bmr_based")
            .unwrap();
        assert!(bmr.value.is_none());
    }
}
