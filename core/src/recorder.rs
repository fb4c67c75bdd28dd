use chrono::{TimeZone, Utc};
use log::info;

use crate::config::SetAggregatorConfig;
use crate::rep::rep_from_boundary;
use crate::rep_detector::RepDetector;
use crate::session::CompletedSet;
use crate::set::aggregate_set;
use crate::tempo::TempoTarget;
use crate::types::{Rep, RepBoundary, SetMetrics, WorkoutSample};

/// Live pipeline for one working set: samples in, reps and set metrics out.
#[derive(Debug, Default)]
pub struct SetRecorder {
    detector: RepDetector,
    config: SetAggregatorConfig,
    target_tempo: Option<TempoTarget>,
    reps: Vec<Rep>,
    metrics: SetMetrics,
    first_sample_ms: Option<i64>,
}

impl SetRecorder {
    pub fn new(config: SetAggregatorConfig, target_tempo: Option<TempoTarget>) -> Self {
        Self { config, target_tempo, ..Default::default() }
    }

    pub fn set_target_tempo(&mut self, target: Option<TempoTarget>) {
        self.target_tempo = target;
        self.recompute();
    }

    pub fn process_sample(&mut self, sample: &WorkoutSample) -> Option<Rep> {
        self.first_sample_ms.get_or_insert(sample.timestamp);
        let boundary = self.detector.process_sample(sample)?;
        Some(self.push_boundary(boundary))
    }

    /// Device reported a rep summary before an idle frame arrived.
    pub fn on_rep_summary(&mut self) -> Option<Rep> {
        let boundary = self.detector.force_complete()?;
        Some(self.push_boundary(boundary))
    }

    pub fn reps(&self) -> &[Rep] {
        &self.reps
    }

    pub fn rep_count(&self) -> u32 {
        self.reps.len() as u32
    }

    pub fn metrics(&self) -> &SetMetrics {
        &self.metrics
    }

    /// Snapshot the set and get ready for the next one.
    pub fn finish_set(&mut self, set_number: u32, weight: f64) -> CompletedSet {
        let completed_at = Utc::now();
        let started_at = self
            .first_sample_ms
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .unwrap_or(completed_at);

        let set = CompletedSet {
            set_number,
            weight,
            reps: std::mem::take(&mut self.reps),
            metrics: std::mem::take(&mut self.metrics),
            started_at,
            completed_at,
        };
        info!(
            "set {} finished: {} reps @ {} (rir {:.1}, rpe {:.1})",
            set.set_number, set.metrics.rep_count, weight, set.metrics.effort.rir, set.metrics.effort.rpe
        );
        self.reset();
        set
    }

    /// Drop the in-progress set without producing a record.
    pub fn reset(&mut self) {
        self.detector.reset();
        self.reps.clear();
        self.metrics = SetMetrics::default();
        self.first_sample_ms = None;
    }

    fn push_boundary(&mut self, boundary: RepBoundary) -> Rep {
        let rep = rep_from_boundary(boundary);
        info!(
            "rep {}: con {:.2}, ecc {:.2}, tempo {}",
            rep.rep_number,
            rep.metrics.concentric_mean_velocity,
            rep.metrics.eccentric_mean_velocity,
            rep.metrics.tempo
        );
        self.reps.push(rep.clone());
        self.recompute();
        rep
    }

    fn recompute(&mut self) {
        self.metrics = aggregate_set(&self.reps, self.target_tempo.as_ref(), &self.config);
    }
}

