use crate::math::{mean, peak};
use crate::types::{MovementPhase, Phase, PhaseMetrics, PhaseTimestamp, WorkoutSample};

/// Zero-valued phase of the given type. This is the defined empty case.
pub fn empty_phase(phase_type: MovementPhase) -> Phase {
    Phase {
        phase_type,
        timestamp: PhaseTimestamp::default(),
        samples: Vec::new(),
        metrics: PhaseMetrics::default(),
    }
}

/// Reduce a contiguous same-phase run to a [`Phase`].
///
/// Samples are assumed to be in arrival order (non-decreasing timestamps).
/// Force is treated as a magnitude.
pub fn aggregate_phase(phase_type: MovementPhase, samples: Vec<WorkoutSample>) -> Phase {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return empty_phase(phase_type),
    };

    let velocities: Vec<f64> = samples.iter().map(|s| s.velocity).collect();
    let forces: Vec<f64> = samples.iter().map(|s| s.force.abs()).collect();

    let metrics = PhaseMetrics {
        duration: (last.timestamp - first.timestamp) as f64 / 1000.0,
        mean_velocity: mean(&velocities),
        peak_velocity: peak(velocities.iter().copied()),
        mean_force: mean(&forces),
        peak_force: peak(forces.iter().copied()),
        start_position: first.position,
        end_position: last.position,
        sample_count: samples.len(),
    };

    Phase {
        phase_type,
        timestamp: PhaseTimestamp { start: first.timestamp, end: last.timestamp },
        samples,
        metrics,
    }
}
