use serde::{Deserialize, Serialize};

/// Movement phase as reported by the device adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementPhase {
    #[serde(alias = "idle")]
    Idle,
    #[serde(alias = "concentric")]
    Concentric,
    #[serde(alias = "hold")]
    Hold,
    #[serde(alias = "eccentric")]
    Eccentric,
}

/// One normalized telemetry frame (~11 Hz).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSample {
    pub sequence: u64,
    pub timestamp: i64, // ms since epoch
    pub phase: MovementPhase,
    pub position: f64, // 0..1 cable extension
    pub velocity: f64,
    pub force: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseMetrics {
    pub duration: f64, // sek
    pub mean_velocity: f64,
    pub peak_velocity: f64,
    pub mean_force: f64,
    pub peak_force: f64,
    pub start_position: f64,
    pub end_position: f64,
    /// Frames aggregated; 0 only for the empty phase. Survives storage.
    pub sample_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseTimestamp {
    pub start: i64,
    pub end: i64,
}

/// Aggregate over a contiguous run of same-phase samples.
///
/// Raw samples are kept in memory for the live set but never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(rename = "type")]
    pub phase_type: MovementPhase,
    pub timestamp: PhaseTimestamp,
    #[serde(skip_serializing, default)]
    pub samples: Vec<WorkoutSample>,
    pub metrics: PhaseMetrics,
}

impl Phase {
    pub fn is_empty(&self) -> bool {
        self.metrics.sample_count == 0
    }

    pub fn duration(&self) -> f64 {
        self.metrics.duration
    }
}

/// Samples of an open rep, partitioned by sub-phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhaseSamples {
    pub concentric: Vec<WorkoutSample>,
    pub eccentric: Vec<WorkoutSample>,
    pub hold_at_top: Vec<WorkoutSample>,
    pub hold_at_bottom: Vec<WorkoutSample>,
}

/// Detector output for one completed rep. Consumed right away by the aggregators.
#[derive(Debug, Clone, PartialEq)]
pub struct RepBoundary {
    pub rep_number: u32,
    pub samples: Vec<WorkoutSample>,
    pub phase_samples: PhaseSamples,
    pub start_time: i64,
    pub end_time: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RepMetrics {
    pub concentric_mean_velocity: f64,
    pub concentric_peak_velocity: f64,
    pub eccentric_mean_velocity: f64,
    pub eccentric_peak_velocity: f64,
    pub peak_force: f64,
    pub total_duration: f64,
    pub top_pause_time: f64,
    pub bottom_pause_time: f64,
    pub range_of_motion: f64,
    /// |eccentric.start_position - concentric.end_position|
    pub position_gap: f64,
    pub tempo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rep {
    pub rep_number: u32,
    pub concentric: Phase,
    pub eccentric: Phase,
    pub hold_at_top: Option<Phase>,
    pub hold_at_bottom: Option<Phase>,
    pub metrics: RepMetrics,
}

impl Rep {
    fn phases(&self) -> impl Iterator<Item = &Phase> {
        [Some(&self.concentric), Some(&self.eccentric)]
            .into_iter()
            .chain([self.hold_at_top.as_ref(), self.hold_at_bottom.as_ref()])
            .flatten()
            .filter(|p| !p.is_empty())
    }

    /// Earliest start over the non-empty phases (ms).
    pub fn start_time(&self) -> Option<i64> {
        self.phases().map(|p| p.timestamp.start).min()
    }

    /// Latest end over the non-empty phases (ms).
    pub fn end_time(&self) -> Option<i64> {
        self.phases().map(|p| p.timestamp.end).max()
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Set level
// ──────────────────────────────────────────────────────────────────────────────

/// Tier 1: raw velocity measurement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocityMetrics {
    pub concentric_baseline: f64,
    pub concentric_last: f64,
    pub concentric_delta: f64, // %
    pub eccentric_baseline: f64,
    pub eccentric_last: f64,
    pub eccentric_delta: f64, // %
    pub concentric_by_rep: Vec<f64>,
    pub eccentric_by_rep: Vec<f64>,
}

/// Tier 2: fatigue pattern, derived from [`VelocityMetrics`] only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueAnalysis {
    pub fatigue_index: f64,
    pub eccentric_control_score: f64,
    pub form_warning: Option<String>,
}

impl Default for FatigueAnalysis {
    fn default() -> Self {
        Self {
            fatigue_index: 0.0,
            eccentric_control_score: 100.0,
            form_warning: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Tier 3: effort, derived from [`FatigueAnalysis`] only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortEstimate {
    pub rir: f64,
    pub rpe: f64,
    pub confidence: Confidence,
}

impl Default for EffortEstimate {
    fn default() -> Self {
        Self {
            rir: 6.0,
            rpe: 4.0,
            confidence: Confidence::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TempoAnalysis {
    pub target: String,
    pub reps_on_tempo: u32,
    pub adherence_pct: f64,
    pub mean_eccentric: f64,
    pub mean_concentric: f64,
}

/// `Default` is the "no data yet" sentinel (zero reps).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetMetrics {
    pub rep_count: u32,
    pub total_duration: f64,
    pub time_under_tension: f64,
    pub velocity: VelocityMetrics,
    pub fatigue: FatigueAnalysis,
    pub effort: EffortEstimate,
    #[serde(default)]
    pub tempo: Option<TempoAnalysis>,
}
