pub mod bridge;
pub mod config;
pub mod counters;
pub mod error;
pub mod math;
pub mod phase;
pub mod recorder;
pub mod rep;
pub mod rep_detector;
pub mod session;
pub mod set;
pub mod storage;
pub mod tempo;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use config::{load_config, CoreConfig, SetAggregatorConfig};
pub use error::CoreError;
pub use phase::aggregate_phase;
pub use recorder::SetRecorder;
pub use rep::aggregate_rep;
pub use rep_detector::{DetectorState, RepDetector};
pub use session::{CompletedSet, PlannedSet, WorkoutPlan, WorkoutSession};
pub use set::aggregate_set;
pub use storage::{load_recording, load_session, save_session};
pub use tempo::TempoTarget;
pub use types::{
    Confidence, EffortEstimate, FatigueAnalysis, MovementPhase, Phase, PhaseMetrics, Rep,
    RepBoundary, RepMetrics, SetMetrics, VelocityMetrics, WorkoutSample,
};
