use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tempo::TempoTarget;
use crate::types::{Rep, SetMetrics};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedSet {
    pub set_number: u32,
    pub weight: f64, // lbs
    pub target_reps: u32,
    #[serde(default)]
    pub target_tempo: Option<TempoTarget>,
    #[serde(default)]
    pub rest_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub exercise_id: String,
    pub exercise_name: String,
    pub sets: Vec<PlannedSet>,
}

/// A finished set as stored in history. Reps serialize without raw samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSet {
    pub set_number: u32,
    pub weight: f64,
    pub reps: Vec<Rep>,
    pub metrics: SetMetrics,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl CompletedSet {
    pub fn hit_target(&self, planned: &PlannedSet) -> bool {
        self.metrics.rep_count >= planned.target_reps
    }

    pub fn volume(&self) -> f64 {
        self.weight * self.metrics.rep_count as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: String,
    pub plan: WorkoutPlan,
    #[serde(default)]
    pub completed: Vec<CompletedSet>,
    pub started_at: DateTime<Utc>,
}

impl WorkoutSession {
    pub fn new(id: impl Into<String>, plan: WorkoutPlan) -> Self {
        Self { id: id.into(), plan, completed: Vec::new(), started_at: Utc::now() }
    }

    /// Next set to perform, `None` once the plan is done.
    pub fn current_planned_set(&self) -> Option<&PlannedSet> {
        self.plan.sets.get(self.completed.len())
    }

    pub fn record_set(&mut self, set: CompletedSet) {
        if let Some(planned) = self.current_planned_set() {
            if !set.hit_target(planned) {
                log::info!(
                    "set {}: {} of {} planned reps",
                    planned.set_number,
                    set.metrics.rep_count,
                    planned.target_reps
                );
            }
        }
        self.completed.push(set);
    }

    pub fn is_complete(&self) -> bool {
        self.completed.len() >= self.plan.sets.len()
    }

    pub fn sets_remaining(&self) -> usize {
        self.plan.sets.len().saturating_sub(self.completed.len())
    }

    pub fn total_volume(&self) -> f64 {
        self.completed.iter().map(CompletedSet::volume).sum()
    }
}
