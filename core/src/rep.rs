use log::warn;

use crate::math::RoundTo;
use crate::phase::{aggregate_phase, empty_phase};
use crate::types::{MovementPhase, Phase, Rep, RepBoundary, RepMetrics};

/// Above this, concentric end and eccentric start are reported as a data-quality issue.
pub const POSITION_GAP_WARN: f64 = 0.05;

/// Tempo string `"ecc-topPause-con-bottomPause"`, each value on the 0.5 s grid.
pub fn tempo_string(eccentric: f64, top_pause: f64, concentric: f64, bottom_pause: f64) -> String {
    format!(
        "{}-{}-{}-{}",
        eccentric.round_half(),
        top_pause.round_half(),
        concentric.round_half(),
        bottom_pause.round_half()
    )
}

/// Combine phase aggregates into one [`Rep`].
///
/// A missing eccentric phase must be passed as a zero-valued phase by the caller.
pub fn aggregate_rep(
    rep_number: u32,
    concentric: Phase,
    eccentric: Phase,
    hold_at_top: Option<Phase>,
    hold_at_bottom: Option<Phase>,
) -> Rep {
    let top_pause = hold_at_top.as_ref().map_or(0.0, Phase::duration);
    let bottom_pause = hold_at_bottom.as_ref().map_or(0.0, Phase::duration);
    let (con, ecc) = (&concentric.metrics, &eccentric.metrics);

    let range_of_motion = con.end_position;
    let position_gap = if eccentric.is_empty() {
        0.0
    } else {
        (ecc.start_position - con.end_position).abs()
    };
    if position_gap > POSITION_GAP_WARN {
        warn!(
            "rep {}: concentric end {:.3} vs eccentric start {:.3}, using concentric",
            rep_number, con.end_position, ecc.start_position
        );
    }

    let metrics = RepMetrics {
        concentric_mean_velocity: con.mean_velocity,
        concentric_peak_velocity: con.peak_velocity,
        eccentric_mean_velocity: ecc.mean_velocity,
        eccentric_peak_velocity: ecc.peak_velocity,
        peak_force: con.peak_force.max(ecc.peak_force),
        total_duration: con.duration + ecc.duration + top_pause + bottom_pause,
        top_pause_time: top_pause,
        bottom_pause_time: bottom_pause,
        range_of_motion,
        position_gap,
        tempo: tempo_string(ecc.duration, top_pause, con.duration, bottom_pause),
    };

    Rep { rep_number, concentric, eccentric, hold_at_top, hold_at_bottom, metrics }
}

/// Run a detector boundary through the phase and rep aggregators.
///
/// Holds are only attached when they have samples; an empty eccentric buffer
/// (forced completion) becomes a zero-valued phase.
pub fn rep_from_boundary(boundary: RepBoundary) -> Rep {
    let ps = boundary.phase_samples;

    let concentric = aggregate_phase(MovementPhase::Concentric, ps.concentric);
    let eccentric = if ps.eccentric.is_empty() {
        empty_phase(MovementPhase::Eccentric)
    } else {
        aggregate_phase(MovementPhase::Eccentric, ps.eccentric)
    };
    let hold_top = (!ps.hold_at_top.is_empty())
        .then(|| aggregate_phase(MovementPhase::Hold, ps.hold_at_top));
    let hold_bottom = (!ps.hold_at_bottom.is_empty())
        .then(|| aggregate_phase(MovementPhase::Hold, ps.hold_at_bottom));

    aggregate_rep(boundary.rep_number, concentric, eccentric, hold_top, hold_bottom)
}
