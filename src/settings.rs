// ⚙️ Settings - optional JSON file, every field defaulted
//
// Path comes from STATEMENT_VISUALIZER_SETTINGS; without it the defaults apply.

use crate::indicators::IndicatorThresholds;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const SETTINGS_ENV_VAR: &str = "STATEMENT_VISUALIZER_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_filter: String,
    pub bind_addr: String,
    /// Reject statements whose totals do not add up
    pub validate_identities: bool,
    pub thresholds: IndicatorThresholds,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_filter: "info".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
            validate_identities: true,
            thresholds: IndicatorThresholds::default(),
        }
    }
}

/// Load settings from a JSON file. Missing fields take their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    settings
        .thresholds
        .validate()
        .with_context(|| format!("Invalid thresholds in {}", path.display()))?;
    Ok(settings)
}

/// Load from the file named by STATEMENT_VISUALIZER_SETTINGS, or use defaults.
pub fn load_from_env() -> Result<Settings> {
    match std::env::var_os(SETTINGS_ENV_VAR) {
        Some(path) => load_settings(path),
        None => Ok(Settings::default()),
    }
}
