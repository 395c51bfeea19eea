//! Build stamp
//!
//! `build.rs` bumps a counter on each recompilation and embeds it with the
//! compile time. The stamp shows up in the startup banner and `tnt_status`.

use serde::Serialize;

use crate::models::{ActivityFactor, EnteralFormula, StressFactor};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildStamp {
    pub version: &'static str,
    pub build_number: u64,
    /// ISO 8601, or "unknown" outside a cargo build
    pub built_at: &'static str,
}

impl BuildStamp {
    pub fn current() -> Self {
        Self::from_parts(
            option_env!("TNT_BUILD_NUMBER"),
            option_env!("TNT_BUILD_TIMESTAMP"),
        )
    }

    fn from_parts(build_number: Option<&str>, built_at: Option<&'static str>) -> Self {
        Self {
            version: VERSION,
            build_number: build_number
                .and_then(|n| n.trim().parse().ok())
                .unwrap_or(0),
            built_at: built_at.unwrap_or("unknown"),
        }
    }

    /// e.g. `tnt 1.0.0+42`
    pub fn label(&self) -> String {
        format!("tnt {}+{}", self.version, self.build_number)
    }
}

/// Print the stamp and the size of the loaded tables to stderr
pub fn print_startup_banner() {
    let stamp = BuildStamp::current();
    eprintln!("Total Nutrition Therapy calculator: {}", stamp.label());
    eprintln!("  Built: {}", stamp.built_at);
    eprintln!(
        "  Tables: {} enteral formulas, {} stress factors, {} activity levels",
        EnteralFormula::ALL.len(),
        StressFactor::ALL.len(),
        ActivityFactor::ALL.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_from_build_env() {
        let stamp = BuildStamp::from_parts(Some("42"), Some("2026-01-01T00:00:00Z"));
        assert_eq!(stamp.build_number, 42);
        assert_eq!(stamp.built_at, "2026-01-01T00:00:00Z");
        assert_eq!(stamp.label(), format!("tnt {}+42", VERSION));
    }

    #[test]
    fn test_stamp_outside_cargo_build() {
        let stamp = BuildStamp::from_parts(None, None);
        assert_eq!(stamp.build_number, 0);
        assert_eq!(stamp.built_at, "unknown");

        assert_eq!(BuildStamp::from_parts(Some("4x2"), None).build_number, 0);
    }
}
