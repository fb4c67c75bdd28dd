//! Rep boundary detection.
//!
//! A rep is one `idle → concentric → (hold) → eccentric → idle` cycle. The
//! detector consumes one sample at a time, in arrival order, and emits a
//! [`RepBoundary`] when a cycle closes. Reps that return to idle before any
//! eccentric movement are abandoned silently.

use log::debug;

use crate::counters;
use crate::types::{MovementPhase, PhaseSamples, RepBoundary, WorkoutSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorState {
    #[default]
    Idle,
    Concentric,
    Hold,
    Eccentric,
}

#[derive(Debug, Default)]
pub struct RepDetector {
    state: DetectorState,
    rep_count: u32,
    rep_start_time: i64,
    samples: Vec<WorkoutSample>,
    buffers: PhaseSamples,
}

impl RepDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// Completed reps since construction or the last [`reset`](Self::reset).
    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Feed one sample. Returns a boundary when this sample closes a rep.
    pub fn process_sample(&mut self, sample: &WorkoutSample) -> Option<RepBoundary> {
        use DetectorState as S;
        use MovementPhase as P;

        counters::samples_processed_total().inc();

        match (self.state, sample.phase) {
            (S::Idle, P::Concentric) => {
                self.begin_rep(sample);
                None
            }
            // Frames outside a rep are dropped.
            (S::Idle, _) => None,

            (S::Concentric, P::Concentric) => {
                self.push(sample, |b| &mut b.concentric);
                None
            }
            (S::Concentric, P::Hold) => {
                self.transition(S::Hold);
                self.push(sample, |b| &mut b.hold_at_top);
                None
            }
            (S::Concentric, P::Eccentric) | (S::Hold, P::Eccentric) => {
                self.transition(S::Eccentric);
                self.push(sample, |b| &mut b.eccentric);
                None
            }
            (S::Concentric, P::Idle) | (S::Hold, P::Idle) => {
                self.abandon();
                None
            }

            (S::Hold, P::Hold) => {
                self.push(sample, |b| &mut b.hold_at_top);
                None
            }
            // Paused pull that continues: resume, the rep is kept.
            (S::Hold, P::Concentric) => {
                self.transition(S::Concentric);
                self.push(sample, |b| &mut b.concentric);
                None
            }

            (S::Eccentric, P::Eccentric) => {
                self.push(sample, |b| &mut b.eccentric);
                None
            }
            // Brief pause before full release.
            (S::Eccentric, P::Hold) => {
                self.push(sample, |b| &mut b.hold_at_bottom);
                None
            }
            (S::Eccentric, P::Idle) => Some(self.complete(sample.timestamp)),
            // Stray pull frame mid-release: dropped. Only idle or a rep
            // summary closes the rep.
            (S::Eccentric, P::Concentric) => {
                debug!("rep detector: concentric frame {} dropped in eccentric", sample.sequence);
                None
            }
        }
    }

    /// Feed a batch; returns every boundary produced, in order.
    pub fn process_batch(&mut self, samples: &[WorkoutSample]) -> Vec<RepBoundary> {
        samples.iter().filter_map(|s| self.process_sample(s)).collect()
    }

    /// Close the open rep on an external rep-summary signal.
    ///
    /// Only valid while in the eccentric state; returns `None` otherwise.
    pub fn force_complete(&mut self) -> Option<RepBoundary> {
        if self.state != DetectorState::Eccentric {
            return None;
        }
        counters::reps_force_completed_total().inc();
        let end = self.last_timestamp();
        Some(self.complete(end))
    }

    /// Clear buffers and counters without emitting anything (new set).
    pub fn reset(&mut self) {
        self.clear_buffers();
        self.rep_count = 0;
    }

    // ----- intern -----

    fn begin_rep(&mut self, sample: &WorkoutSample) {
        self.clear_buffers();
        self.transition(DetectorState::Concentric);
        self.rep_start_time = sample.timestamp;
        self.push(sample, |b| &mut b.concentric);
    }

    fn push<F>(&mut self, sample: &WorkoutSample, buffer: F)
    where
        F: FnOnce(&mut PhaseSamples) -> &mut Vec<WorkoutSample>,
    {
        buffer(&mut self.buffers).push(*sample);
        self.samples.push(*sample);
    }

    fn transition(&mut self, next: DetectorState) {
        debug!("rep detector: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn last_timestamp(&self) -> i64 {
        self.samples.last().map(|s| s.timestamp).unwrap_or(self.rep_start_time)
    }

    fn abandon(&mut self) {
        debug!(
            "rep abandoned after {} samples (no eccentric phase)",
            self.samples.len()
        );
        counters::reps_abandoned_total().inc();
        self.clear_buffers();
    }

    fn complete(&mut self, end_time: i64) -> RepBoundary {
        self.rep_count += 1;
        counters::reps_completed_total().inc();

        let boundary = RepBoundary {
            rep_number: self.rep_count,
            samples: std::mem::take(&mut self.samples),
            phase_samples: std::mem::take(&mut self.buffers),
            start_time: self.rep_start_time,
            end_time,
        };
        debug!(
            "rep {} complete: {} samples, {} ms",
            boundary.rep_number,
            boundary.samples.len(),
            boundary.end_time - boundary.start_time
        );
        self.clear_buffers();
        boundary
    }

    fn clear_buffers(&mut self) {
        self.state = DetectorState::Idle;
        self.rep_start_time = 0;
        self.samples.clear();
        self.buffers = PhaseSamples::default();
    }
}
