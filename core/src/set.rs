//! Set aggregation in three tiers.
//!
//! 1. [`velocity_metrics`]: baseline/last/delta from the reps.
//! 2. [`fatigue_analysis`]: reads only tier 1.
//! 3. [`effort_estimate`]: reads only tier 2.
//!
//! Everything is recomputed from the full rep list on each call.

use crate::config::SetAggregatorConfig;
use crate::math::{mean, pct_change, RoundTo};
use crate::tempo::{analyze_tempo, TempoTarget};
use crate::types::{
    Confidence, EffortEstimate, FatigueAnalysis, Rep, SetMetrics, VelocityMetrics,
};

pub const WARN_ECCENTRIC_CONTROL: &str = "Eccentric control declining - slow the negative";
pub const WARN_GRINDING: &str = "Grinding with loss of control - consider ending set";

/// Fatigue points per rep in reserve.
const FATIGUE_PER_RIR: f64 = 13.0;
const MAX_RIR: f64 = 6.0;

pub fn aggregate_set(
    reps: &[Rep],
    target_tempo: Option<&TempoTarget>,
    config: &SetAggregatorConfig,
) -> SetMetrics {
    if reps.is_empty() {
        return SetMetrics::default();
    }

    let velocity = velocity_metrics(reps, config.baseline_reps);
    let fatigue = fatigue_analysis(&velocity, config);
    let effort = effort_estimate(&fatigue);

    let time_under_tension: f64 = reps.iter().map(|r| r.metrics.total_duration).sum();
    let span = match (
        reps.iter().filter_map(Rep::start_time).min(),
        reps.iter().filter_map(Rep::end_time).max(),
    ) {
        (Some(start), Some(end)) if end > start => (end - start) as f64 / 1000.0,
        _ => 0.0,
    };

    SetMetrics {
        rep_count: reps.len() as u32,
        total_duration: span,
        time_under_tension,
        velocity,
        fatigue,
        effort,
        tempo: target_tempo.and_then(|t| analyze_tempo(reps, t, config.tempo_tolerance_s)),
    }
}

/// Tier 1. `baseline_reps` of 0 is treated as 1.
pub fn velocity_metrics(reps: &[Rep], baseline_reps: usize) -> VelocityMetrics {
    let concentric_by_rep: Vec<f64> =
        reps.iter().map(|r| r.metrics.concentric_mean_velocity).collect();
    let eccentric_by_rep: Vec<f64> =
        reps.iter().map(|r| r.metrics.eccentric_mean_velocity).collect();

    let n = baseline_reps.max(1).min(reps.len());
    let concentric_baseline = mean(&concentric_by_rep[..n]);
    let eccentric_baseline = mean(&eccentric_by_rep[..n]);
    let concentric_last = concentric_by_rep.last().copied().unwrap_or(0.0);
    let eccentric_last = eccentric_by_rep.last().copied().unwrap_or(0.0);

    VelocityMetrics {
        concentric_baseline,
        concentric_last,
        concentric_delta: pct_change(concentric_baseline, concentric_last),
        eccentric_baseline,
        eccentric_last,
        eccentric_delta: pct_change(eccentric_baseline, eccentric_last),
        concentric_by_rep,
        eccentric_by_rep,
    }
}

/// Tier 2. Concentric slowing is the primary signal; eccentric speed-up
/// (loss of braking) is penalized on top of its weight.
pub fn fatigue_analysis(v: &VelocityMetrics, config: &SetAggregatorConfig) -> FatigueAnalysis {
    let concentric_loss = (-v.concentric_delta).max(0.0);
    let eccentric_speedup = v.eccentric_delta.max(0.0);

    let fatigue_index = (concentric_loss * config.concentric_weight
        + eccentric_speedup * config.eccentric_speedup_penalty * config.eccentric_weight)
        .clamp(0.0, 100.0);

    let eccentric_control_score = (100.0 - v.eccentric_delta * 2.0).clamp(0.0, 100.0);

    let form_warning = if eccentric_control_score < 40.0 {
        Some(WARN_ECCENTRIC_CONTROL.to_string())
    } else if v.eccentric_delta > 30.0 && v.concentric_delta < -10.0 {
        Some(WARN_GRINDING.to_string())
    } else {
        None
    };

    FatigueAnalysis { fatigue_index, eccentric_control_score, form_warning }
}

/// Tier 3. `rir` and `rpe` land on the 0.5 grid.
pub fn effort_estimate(f: &FatigueAnalysis) -> EffortEstimate {
    let mut rir = (MAX_RIR - f.fatigue_index / FATIGUE_PER_RIR).max(0.0);
    if f.eccentric_control_score < 50.0 {
        rir = (rir - 1.0).max(0.0);
    }
    let rir = rir.round_half();
    let rpe = (10.0 - rir).clamp(4.0, 10.0).round_half();

    let confidence = if f.fatigue_index > 50.0 && f.eccentric_control_score < 60.0 {
        Confidence::High
    } else if f.fatigue_index < 20.0 {
        Confidence::Low
    } else {
        Confidence::Medium
    };

    EffortEstimate { rir, rpe, confidence }
}
