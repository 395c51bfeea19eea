//! TNT Status Tool
//!
//! Provides runtime status information about the TNT service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildStamp;

/// Usage guide for AI assistants driving the calculator
pub const TNT_INSTRUCTIONS: &str = r#"
# TNT Usage Instructions

This guide explains how to drive the Total Nutrition Therapy (TNT) calculator.

## Overview

TNT derives daily clinical nutrition targets from a small patient record:
- Basal metabolic rate (BMR) and the formula used
- Standard weight, BMI and obesity degree
- The weight basis used for dosing (actual, standard or adjusted)
- Creatinine clearance (Cockcroft-Gault)
- Energy (kcal/day), protein (g/day) and water (mL/day)
- Enteral formula volume, nutrient content and package plans

Every call is stateless. The caller holds the form state and sends it back
on the next call.

---

## The Recalculation Loop

1. Call `list_options` once to get every selector code.
2. Call `recalculate` without an `action` and with whatever patient fields you have.
3. Each time the user changes something, call `recalculate` again with:
   - the values from the previous response's `form` (patient, factors, edit flags)
     passed back as flat parameters
   - the changed field applied on top
   - the `action` naming what changed
4. Show `summary` to the user. The full results sit next to it.

### Actions

| action | Use when |
|--------|----------|
| (omitted) | First calculation or a plain resubmit |
| `age`, `height`, `weight`, `sex`, `body` | Anthropometrics changed |
| `disease` | Disease changed |
| `hepatic` | Hepatic encephalopathy toggled |
| `protein` | The user picked a protein correction |
| `order` | The user picked an energy order |
| `energy`, `manual` | The user typed an energy value |
| `formula` | Enteral formula changed |
| `volume` | The user typed an enteral volume |
| `creatinine` | Serum creatinine changed |

Any other tag recalculates without re-defaulting anything.

---

## Defaults and User Edits

Disease changes re-default the energy order and the protein correction.
Once the user picks one of these by hand, the edit flag in `form.edit`
keeps that choice across later recalculations. Send the flags back
unchanged.

Exceptions:
- Liver cirrhosis with hepatic encephalopathy always forces the "poor" liver protein correction.
- Children (under 18) always get disease "none", which re-defaults the energy order.

---

## Missing or Invalid Input

TNT never fails on incomplete input. Missing or out-of-range fields are
reported in `errors` and every result that depends on them is null.

Ranges:
- Age: 0 to 129 years
- Height: 30 to 249.9 cm
- Weight: 0.5 to 299.9 kg
- Serum creatinine: 0.01 to 30.0 mg/dL

---

## Enteral Packages

Use `allocate_enteral_packages` to size a formula without a full
recalculation. Give `volume_ml` or `energy_kcal`. Plans are ranked by
leftover volume, then by package count. Doses above 10000 mL/day are
rejected. In `recalculate` they are reported in `errors` and the enteral
result is null.

---

## Dosing Weight

Use `dosing_weight` with `usage` set to `energy` or `protein` to see which
body weight feeds that calculation, next to the actual, corrected and
standard candidates.

---

## Clinical Manual

Call `manual_link` to get the configured manual URL, if enabled.
"#;

/// Runtime status of the TNT service
#[derive(Debug, Clone, Serialize)]
pub struct TntStatus {
    #[serde(flatten)]
    pub build: BuildStamp,

    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,

    /// Recalculations served since start
    pub recalculations_served: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    recalculations: u64,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            recalculations: 0,
        }
    }

    pub fn record_recalculation(&mut self) {
        self.recalculations += 1;
    }

    /// Get the current status
    pub fn get_status(&self) -> TntStatus {
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TntStatus {
            build: BuildStamp::current(),
            started_at: self.started_at.to_rfc3339(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            recalculations_served: self.recalculations,
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_counts_recalculations() {
        let mut tracker = StatusTracker::new();
        tracker.record_recalculation();
        tracker.record_recalculation();
        let status = tracker.get_status();
        assert_eq!(status.recalculations_served, 2);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.build.version, crate::build_info::VERSION);
        assert!(DateTime::parse_from_rfc3339(&status.started_at).is_ok());
    }

    #[test]
    fn test_instructions_list_every_action_tag() {
        for action in [
            "age",
            "height",
            "weight",
            "sex",
            "body",
            "disease",
            "hepatic",
            "protein",
            "order",
            "energy",
            "manual",
            "formula",
            "volume",
            "creatinine",
        ] {
            assert!(
                TNT_INSTRUCTIONS.contains(&format!("`{}`", action)),
                "{}",
                action
            );
        }
    }
}
