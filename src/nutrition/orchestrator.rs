//! Recalculation pass
//!
//! One pass settles the form state (disease resets, sticky edit flags,
//! energy order and protein correction defaults), then derives every result
//! from it. Each stage takes the previous stages' outputs as arguments, so
//! the order is fixed by the data flow:
//!
//! 1. settle disease and hepatic flag
//! 2. apply the triggering action to the edit flags
//! 3. resolve energy order and protein correction
//! 4. anthropometrics (BMR, body index, BSA, corrected weight, CCr)
//! 5. energy, protein and water targets
//! 6. sync the energy order value
//! 7. enteral dose and packages

use serde::{Deserialize, Serialize};

use super::enteral::EnteralDose;
use super::error::CalcResult;
use super::rounding::round_kcal;
use super::validation::{self, ValidatedPatient, ValidationError};
use super::weight_selector::{self, WeightCandidates, WeightUsage};
use super::{bmr, body_index, ccr, corrected_weight, energy, enteral, protein, tables, water};
use crate::models::{
    BmrResult, BodyIndexResult, CcrResult, CorrectedWeightResult, Disease, EditState,
    EnergyOrder, EnergyResult, EnteralResult, FactorSelections, PatientInput, ProteinCorrection,
    ProteinResult, RecalcAction, RecalcInput, Sex, StressBreakdown, WaterResult,
};

/// Age from which the adult rules apply
const ADULT_AGE: u32 = 18;

/// Which input controls are meaningful for this patient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiHints {
    pub show_disease: bool,
    pub show_pregnant: bool,
    pub show_hepatic: bool,
}

/// Settled form state to send back to the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub patient: PatientInput,
    pub factors: FactorSelections,
    pub edit: EditState,
    /// Derived from the disease; never taken from input
    pub is_hemodialysis: bool,
}

/// Everything one pass produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalcOutput {
    pub action: String,
    pub form: FormState,
    pub hints: UiHints,
    pub bmr: Option<BmrResult>,
    pub body_index: Option<BodyIndexResult>,
    /// m²
    pub body_surface_area: Option<f64>,
    pub corrected_weight: Option<CorrectedWeightResult>,
    pub ccr: Option<CcrResult>,
    pub stress: StressBreakdown,
    pub energy: Option<EnergyResult>,
    pub protein: Option<ProteinResult>,
    pub water: Option<WaterResult>,
    pub enteral: Option<EnteralResult>,
    pub errors: Vec<ValidationError>,
}

impl RecalcOutput {
    /// Input record for the next pass, carrying the settled state
    pub fn next_input(&self) -> RecalcInput {
        RecalcInput {
            patient: self.form.patient.clone(),
            factors: self.form.factors.clone(),
            edit: self.form.edit,
            action: None,
        }
    }
}

/// Disease after age and cirrhosis rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SettledDisease {
    disease: Disease,
    hepatic_encephalopathy: bool,
    is_hemodialysis: bool,
    /// Disease was forced back to None for a child
    reset_for_child: bool,
}

/// Anthropometric results, each present only when its inputs validated
#[derive(Debug, Clone, Default)]
struct Anthropometrics {
    bmr: Option<BmrResult>,
    body_index: Option<BodyIndexResult>,
    body_surface_area: Option<f64>,
    corrected_weight: Option<CorrectedWeightResult>,
    ccr: Option<CcrResult>,
}

/// Inputs shared by the energy and protein stages
#[derive(Debug, Clone, Copy)]
struct TargetBasis {
    age: u32,
    height: f64,
    weights: WeightCandidates,
}

pub fn recalculate(input: &RecalcInput) -> CalcResult<RecalcOutput> {
    match run_pass(input) {
        Ok(output) => {
            tracing::info!(
                "Recalculated (action '{}'): energy {:?} kcal, protein {:?} g, water {:?} mL, {} validation error(s)",
                output.action,
                output.energy.as_ref().map(|e| e.final_kcal),
                output.protein.as_ref().map(|p| p.grams),
                output.water.as_ref().map(|w| w.ml),
                output.errors.len()
            );
            Ok(output)
        }
        Err(e) => {
            tracing::warn!("Recalculation aborted: {}", e);
            Err(e)
        }
    }
}

fn run_pass(input: &RecalcInput) -> CalcResult<RecalcOutput> {
    let action = RecalcAction::parse(input.action.as_deref());
    let (measured, mut errors) = validation::validate(&input.patient);
    let patient = &input.patient;
    let factors = &input.factors;

    let settled = settle_disease(patient, measured.age);
    tracing::debug!("Settled disease: {:?}", settled);

    let edit = mark_edits(input.edit, &action, factors, &settled, measured.age);
    let energy_order = resolve_energy_order(factors.energy_order, &action, &settled, edit);
    let protein_correction = resolve_protein_correction(
        factors.protein_correction,
        &action,
        &settled,
        measured.age,
        edit,
    );
    tracing::debug!(
        "Edit state {:?}, energy order {}, protein correction {}",
        edit,
        energy_order.as_str(),
        protein_correction.as_str()
    );

    let anthro = compute_anthropometrics(&measured, patient.sex)?;
    let stress = energy::stress_total(
        factors.stress_factor,
        factors.body_temperature,
        factors.pressure_ulcer,
    );
    let basis = target_basis(&measured, &anthro);

    let energy_result = match basis {
        Some(b) => Some(compute_energy(&b, patient.sex, factors, energy_order, &stress)?),
        None => None,
    };
    let protein_result = basis.map(|b| {
        let weight = weight_selector::select(WeightUsage::Protein, b.age, &b.weights, settled.disease);
        protein::calculate(b.age, weight, settled.disease, stress.total, protein_correction)
    });
    let water_result = compute_water(&measured, patient, &settled, &anthro, factors);
    tracing::debug!("Stress total {:.2}", stress.total);

    let energy_order_value = sync_energy_value(
        factors,
        &action,
        edit,
        energy_order,
        energy_result.as_ref(),
        anthro.body_index.as_ref(),
    );

    let enteral_stage = resolve_enteral(factors, &action, energy_order_value);
    errors.extend(enteral_stage.error);

    let hints = ui_hints(measured.age, patient.sex, settled.disease);

    let form = FormState {
        patient: PatientInput {
            disease: settled.disease,
            hepatic_encephalopathy: settled.hepatic_encephalopathy,
            ..patient.clone()
        },
        factors: FactorSelections {
            protein_correction,
            energy_order,
            energy_order_value: enteral_stage.energy_order_value,
            enteral_volume_input: enteral_stage.volume_input,
            ..factors.clone()
        },
        edit,
        is_hemodialysis: settled.is_hemodialysis,
    };

    Ok(RecalcOutput {
        action: action.as_str().to_string(),
        form,
        hints,
        bmr: anthro.bmr,
        body_index: anthro.body_index,
        body_surface_area: anthro.body_surface_area,
        corrected_weight: anthro.corrected_weight,
        ccr: anthro.ccr,
        stress,
        energy: energy_result,
        protein: protein_result,
        water: water_result,
        enteral: enteral_stage.result,
        errors,
    })
}

/// Children are outside the disease model; the hepatic flag only exists
/// with cirrhosis; hemodialysis follows the disease.
fn settle_disease(patient: &PatientInput, age: Option<u32>) -> SettledDisease {
    let is_child = age.is_some_and(|a| a < ADULT_AGE);
    let disease = if is_child { Disease::None } else { patient.disease };
    SettledDisease {
        disease,
        hepatic_encephalopathy: patient.hepatic_encephalopathy
            && disease == Disease::LiverCirrhosis,
        is_hemodialysis: disease == Disease::Hemodialysis,
        reset_for_child: disease != patient.disease,
    }
}

/// Protein correction the selector would choose by itself
fn default_protein_correction(age: Option<u32>, disease: Disease) -> ProteinCorrection {
    protein::default_correction(age.unwrap_or(ADULT_AGE), disease)
}

/// Apply the triggering action to the sticky flags. Choosing the option a
/// flag would default to clears it.
fn mark_edits(
    mut edit: EditState,
    action: &RecalcAction,
    factors: &FactorSelections,
    settled: &SettledDisease,
    age: Option<u32>,
) -> EditState {
    match action {
        RecalcAction::EnergyValue | RecalcAction::EnteralVolume => {
            edit.is_energy_user_edited = true;
        }
        RecalcAction::EnergyOrder => {
            edit.is_energy_user_edited =
                factors.energy_order != tables::disease_energy_default(settled.disease);
        }
        RecalcAction::ProteinCorrection => {
            edit.is_protein_correction_user_edited = factors.protein_correction
                != default_protein_correction(age, settled.disease);
        }
        _ => {}
    }
    edit
}

fn resolve_energy_order(
    current: EnergyOrder,
    action: &RecalcAction,
    settled: &SettledDisease,
    edit: EditState,
) -> EnergyOrder {
    let disease_changed = *action == RecalcAction::Disease || settled.reset_for_child;
    if disease_changed && !edit.is_energy_user_edited {
        tables::disease_energy_default(settled.disease)
    } else {
        current
    }
}

/// Hepatic encephalopathy in cirrhosis always restricts protein, even over
/// a user choice.
fn resolve_protein_correction(
    current: ProteinCorrection,
    action: &RecalcAction,
    settled: &SettledDisease,
    age: Option<u32>,
    edit: EditState,
) -> ProteinCorrection {
    if settled.disease == Disease::LiverCirrhosis && settled.hepatic_encephalopathy {
        return ProteinCorrection::LiverCirrhosisPoor;
    }
    if !edit.is_protein_correction_user_edited && action.redefaults_protein() {
        return default_protein_correction(age, settled.disease);
    }
    current
}

fn compute_anthropometrics(measured: &ValidatedPatient, sex: Sex) -> CalcResult<Anthropometrics> {
    let mut anthro = Anthropometrics::default();

    if let (Some(age), Some(weight)) = (measured.age, measured.weight) {
        if age < ADULT_AGE || measured.height.is_some() {
            anthro.bmr = Some(bmr::calculate(
                age,
                weight,
                measured.height.unwrap_or_default(),
                sex,
            )?);
        }
        if let Some(cr) = measured.serum_creatinine {
            anthro.ccr = Some(ccr::calculate_with_correction(age, weight, cr, sex));
        }
    }

    if let (Some(height), Some(weight)) = (measured.height, measured.weight) {
        anthro.body_surface_area = Some(body_index::body_surface_area(height, weight));

        if let Some(age) = measured.age {
            let bi = body_index::calculate(age, height, weight, sex);
            anthro.corrected_weight = Some(corrected_weight::calculate(
                age,
                bi.obesity_degree,
                weight,
                bi.standard_weight,
            ));
            anthro.body_index = Some(bi);
        }
    }

    tracing::debug!(
        "Anthropometrics: bmr {:?}, body index {:?}, corrected {:?}",
        anthro.bmr.map(|b| b.raw_value),
        anthro.body_index.map(|b| b.standard_weight),
        anthro.corrected_weight.map(|c| c.value)
    );
    Ok(anthro)
}

fn target_basis(measured: &ValidatedPatient, anthro: &Anthropometrics) -> Option<TargetBasis> {
    let age = measured.age?;
    let height = measured.height?;
    let actual = measured.weight?;
    let bi = anthro.body_index?;
    let corrected = anthro.corrected_weight?;
    Some(TargetBasis {
        age,
        height,
        weights: WeightCandidates {
            actual,
            corrected: corrected.value,
            standard: bi.standard_weight,
        },
    })
}

fn compute_energy(
    basis: &TargetBasis,
    sex: Sex,
    factors: &FactorSelections,
    order: EnergyOrder,
    stress: &StressBreakdown,
) -> CalcResult<EnergyResult> {
    let weight = weight_selector::select(WeightUsage::Energy, basis.age, &basis.weights, Disease::None);
    let bmr_for_energy = bmr::calculate(basis.age, weight, basis.height, sex)?;
    Ok(energy::calculate(
        basis.age,
        bmr_for_energy,
        factors.activity_factor,
        stress,
        basis.weights.actual,
        basis.weights.standard,
        order,
        factors.manual_energy_value,
    ))
}

fn compute_water(
    measured: &ValidatedPatient,
    patient: &PatientInput,
    settled: &SettledDisease,
    anthro: &Anthropometrics,
    factors: &FactorSelections,
) -> Option<WaterResult> {
    let age = measured.age?;
    let actual_weight = measured.weight?;
    let is_pregnant = patient.pregnant && patient.sex == Sex::Female && age >= ADULT_AGE;

    // Pregnant adults branch on obesity degree, which needs the body index
    if is_pregnant && !settled.is_hemodialysis && anthro.body_index.is_none() {
        return None;
    }

    let input = water::WaterInput {
        age,
        actual_weight,
        is_hemodialysis: settled.is_hemodialysis,
        is_pregnant,
        adjusted_weight: anthro
            .body_index
            .map(|bi| corrected_weight::calculate_adjusted(actual_weight, bi.standard_weight)),
        obesity_degree: anthro.body_index.and_then(|bi| bi.obesity_degree),
        temperature: factors.body_temperature,
    };
    Some(water::calculate(&input))
}

/// Energy order value after this pass.
///
/// Unedited, it follows the computed prescription; picking an order also
/// pulls in that order's value. Otherwise the user's number stays.
fn sync_energy_value(
    factors: &FactorSelections,
    action: &RecalcAction,
    edit: EditState,
    order: EnergyOrder,
    computed: Option<&EnergyResult>,
    body_index: Option<&BodyIndexResult>,
) -> Option<f64> {
    let follows_computed = !edit.is_energy_user_edited || *action == RecalcAction::EnergyOrder;
    if !follows_computed {
        return factors.energy_order_value;
    }

    if let Some(e) = computed {
        return Some(e.final_kcal as f64);
    }

    // Primary derivation unavailable: fall back to the selected candidate
    match order {
        EnergyOrder::Manual => factors.manual_energy_value.map(f64::from),
        _ => body_index
            .and_then(|bi| energy::energy_per_kg(order, bi.standard_weight))
            .map(|kcal| round_kcal(kcal) as f64),
    }
}

/// Enteral result plus the energy order value and volume input it settles
#[derive(Debug, Clone, Default)]
struct EnteralStage {
    result: Option<EnteralResult>,
    energy_order_value: Option<f64>,
    volume_input: Option<i32>,
    error: Option<ValidationError>,
}

fn resolve_enteral(
    factors: &FactorSelections,
    action: &RecalcAction,
    energy_order_value: Option<f64>,
) -> EnteralStage {
    let untouched = EnteralStage {
        energy_order_value,
        volume_input: factors.enteral_volume_input,
        ..Default::default()
    };
    let Some(formula) = factors.enteral_formula else {
        return untouched;
    };

    let typed_volume = factors
        .enteral_volume_input
        .filter(|ml| *ml > 0 && *action == RecalcAction::EnteralVolume);

    if let Some(ml) = typed_volume {
        if let Err(e) = validation::check_enteral_volume(i64::from(ml)) {
            return EnteralStage {
                error: Some(e),
                ..untouched
            };
        }
        let result = enteral::calculate(formula, EnteralDose::Volume(i64::from(ml)));
        tracing::debug!(
            "Enteral from typed volume {} mL -> {:.1} kcal",
            ml,
            result.energy_kcal
        );
        return EnteralStage {
            energy_order_value: Some(result.energy_kcal),
            volume_input: Some(ml),
            result: Some(result),
            error: None,
        };
    }

    let Some(kcal) = energy_order_value.filter(|kcal| *kcal > 0.0) else {
        return untouched;
    };
    if let Err(e) = validation::check_enteral_volume(enteral::volume_from_energy(formula, kcal)) {
        return EnteralStage {
            error: Some(e),
            ..untouched
        };
    }

    let result = enteral::calculate(formula, EnteralDose::Energy(kcal));
    tracing::debug!(
        "Enteral from {:.0} kcal -> {} mL ({} plan(s))",
        kcal,
        result.volume_ml,
        result.plans.len()
    );
    EnteralStage {
        volume_input: i32::try_from(result.volume_ml).ok(),
        result: Some(result),
        energy_order_value,
        error: None,
    }
}

fn ui_hints(age: Option<u32>, sex: Sex, disease: Disease) -> UiHints {
    let adult = age.is_some_and(|a| a >= ADULT_AGE);
    UiHints {
        show_disease: adult,
        show_pregnant: adult && sex == Sex::Female,
        show_hepatic: disease == Disease::LiverCirrhosis,
    }
}
