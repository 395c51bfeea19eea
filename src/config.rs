//! Environment configuration
//!
//! - `TNT_MANUAL_ENABLED` / `TNT_MANUAL_URL`: external manual link
//! - `TNT_LOG`: default log directive, used when `RUST_LOG` is unset

use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_DIRECTIVE: &str = "tnt=info";

/// Link to the clinical manual, passed through to the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManualLinkConfig {
    pub enabled: bool,
    pub url: Option<String>,
}

impl ManualLinkConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("TNT_MANUAL_ENABLED").ok().as_deref(),
            std::env::var("TNT_MANUAL_URL").ok().as_deref(),
        )
    }

    /// Enabled only when the flag is on and a URL is configured
    pub fn from_values(enabled: Option<&str>, url: Option<&str>) -> Self {
        let flag = enabled.map(parse_flag).unwrap_or(false);
        let url = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);
        Self {
            enabled: flag && url.is_some(),
            url,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Default tracing directive, overridable with `TNT_LOG`
pub fn log_directive() -> String {
    std::env::var("TNT_LOG")
        .ok()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string())
}

/// Log filter for the binaries: `RUST_LOG` when it parses, else the default
/// directive
pub fn env_filter() -> EnvFilter {
    filter_from(std::env::var("RUST_LOG").ok().as_deref(), &log_directive())
}

fn filter_from(rust_log: Option<&str>, fallback: &str) -> EnvFilter {
    rust_log
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_link_requires_flag_and_url() {
        let c = ManualLinkConfig::from_values(Some("true"), Some("https://example.org/manual"));
        assert!(c.enabled);
        assert_eq!(c.url.as_deref(), Some("https://example.org/manual"));

        let c = ManualLinkConfig::from_values(Some("on"), Some("  "));
        assert!(!c.enabled);
        assert!(c.url.is_none());

        let c = ManualLinkConfig::from_values(Some("0"), Some("https://example.org/manual"));
        assert!(!c.enabled);
        assert!(c.url.is_some());

        let c = ManualLinkConfig::from_values(None, None);
        assert_eq!(c, ManualLinkConfig::default());
    }

    #[test]
    fn test_rust_log_takes_precedence() {
        let filter = filter_from(Some("tnt=debug"), DEFAULT_LOG_DIRECTIVE);
        assert_eq!(filter.to_string(), "tnt=debug");

        let filter = filter_from(None, DEFAULT_LOG_DIRECTIVE);
        assert_eq!(filter.to_string(), "tnt=info");

        let filter = filter_from(Some("  "), "tnt=warn");
        assert_eq!(filter.to_string(), "tnt=warn");
    }

    #[test]
    fn test_parse_flag() {
        for v in ["1", "true", "YES", " On "] {
            assert!(parse_flag(v), "{}", v);
        }
        for v in ["", "0", "false", "off", "enabled"] {
            assert!(!parse_flag(v), "{}", v);
        }
    }
}
