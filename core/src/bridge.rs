//! JSON in / JSON out entry points for the Python and app layers.
//!
//! Input parsing is tolerant of the field names used by older recordings
//! (`ts`, `t_ms`, `seq`); every parse error carries the JSON path.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::SetAggregatorConfig;
use crate::error::CoreError;
use crate::recorder::SetRecorder;
use crate::set::aggregate_set;
use crate::tempo::TempoTarget;
use crate::types::{MovementPhase, Rep, SetMetrics, WorkoutSample};

// ──────────────────────────────────────────────────────────────────────────────
// Tolerant input
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SampleInTol {
    #[serde(default, alias = "seq")]
    sequence: u64,
    #[serde(alias = "ts", alias = "t_ms")]
    timestamp: i64,
    phase: MovementPhase,
    #[serde(default)]
    position: f64,
    #[serde(default)]
    velocity: f64,
    #[serde(default)]
    force: f64,
}

impl From<SampleInTol> for WorkoutSample {
    fn from(s: SampleInTol) -> Self {
        WorkoutSample {
            sequence: s.sequence,
            timestamp: s.timestamp,
            phase: s.phase,
            position: s.position,
            velocity: s.velocity.abs(),
            force: s.force,
        }
    }
}

/// Tempo may come as `"3-1-1-0"` or as an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TempoIn {
    Text(String),
    Object(TempoTarget),
}

fn parse<T: DeserializeOwned>(json: &str) -> Result<T, CoreError> {
    let mut de = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut de).map_err(CoreError::from_path_error)
}

fn parse_tempo(json: Option<&str>) -> Result<Option<TempoTarget>, CoreError> {
    let Some(raw) = json.map(str::trim).filter(|s| !s.is_empty() && *s != "null") else {
        return Ok(None);
    };
    match parse::<TempoIn>(raw)? {
        TempoIn::Object(t) => Ok(Some(t)),
        TempoIn::Text(s) => TempoTarget::parse(&s).map(Some).ok_or_else(|| CoreError::Parse {
            path: ".".into(),
            message: format!("invalid tempo string {s:?}"),
        }),
    }
}

fn parse_cfg(json: Option<&str>) -> Result<SetAggregatorConfig, CoreError> {
    match json.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse(raw),
        None => Ok(SetAggregatorConfig::default()),
    }
}

pub fn parse_samples(json: &str) -> Result<Vec<WorkoutSample>, CoreError> {
    let raw: Vec<SampleInTol> = parse(json)?;
    Ok(raw.into_iter().map(WorkoutSample::from).collect())
}

// ──────────────────────────────────────────────────────────────────────────────
// Entry points
// ──────────────────────────────────────────────────────────────────────────────

/// `reps_json` is an array of stored reps (as produced by `replay_json`).
pub fn aggregate_set_json(
    reps_json: &str,
    tempo_json: Option<&str>,
    cfg_json: Option<&str>,
) -> Result<String, CoreError> {
    let reps: Vec<Rep> = parse(reps_json)?;
    let tempo = parse_tempo(tempo_json)?;
    let cfg = parse_cfg(cfg_json)?;
    let metrics = aggregate_set(&reps, tempo.as_ref(), &cfg);
    Ok(serde_json::to_string(&metrics)?)
}

#[derive(Debug, Serialize)]
struct ReplayOut<'a> {
    reps: &'a [Rep],
    metrics: &'a SetMetrics,
    samples: usize,
}

/// Run a recorded sample stream through a fresh [`SetRecorder`].
pub fn replay_json(
    samples_json: &str,
    tempo_json: Option<&str>,
    cfg_json: Option<&str>,
) -> Result<String, CoreError> {
    let samples = parse_samples(samples_json)?;
    let mut recorder = SetRecorder::new(parse_cfg(cfg_json)?, parse_tempo(tempo_json)?);
    for s in &samples {
        recorder.process_sample(s);
    }
    let out = ReplayOut { reps: recorder.reps(), metrics: recorder.metrics(), samples: samples.len() };
    Ok(serde_json::to_string(&out)?)
}
