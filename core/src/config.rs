use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::tempo::{TempoTarget, DEFAULT_TEMPO_TOLERANCE_S};

/// Weights for the set-level fatigue model. Overridable per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetAggregatorConfig {
    pub concentric_weight: f64,
    pub eccentric_weight: f64,
    pub eccentric_speedup_penalty: f64,
    pub baseline_reps: usize,
    /// Max deviation (s) for a rep to count as on tempo.
    pub tempo_tolerance_s: f64,
}

impl Default for SetAggregatorConfig {
    fn default() -> Self {
        Self {
            concentric_weight: 0.6,
            eccentric_weight: 0.4,
            eccentric_speedup_penalty: 1.5,
            baseline_reps: 2,
            tempo_tolerance_s: DEFAULT_TEMPO_TOLERANCE_S,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub aggregator: SetAggregatorConfig,
    /// Default tempo target for sets without a planned tempo, e.g. `"3-0-1-0"`.
    pub target_tempo: Option<String>,
}

impl CoreConfig {
    pub fn tempo_target(&self) -> Option<TempoTarget> {
        self.target_tempo.as_deref().and_then(TempoTarget::parse)
    }
}

/// Parse a config document; errors carry the JSON path of the bad field.
pub fn parse_config(json: &str) -> Result<CoreConfig, CoreError> {
    let mut de = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut de).map_err(CoreError::from_path_error)
}

/// Load config from disk. A missing file yields the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CoreConfig, CoreError> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("config not found at {}, using defaults", path.display());
        return Ok(CoreConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    let cfg = parse_config(&contents)?;
    info!("config loaded from {}", path.display());
    Ok(cfg)
}
