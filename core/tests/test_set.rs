use voltra_core::set::{effort_estimate, fatigue_analysis, velocity_metrics};
use voltra_core::{
    aggregate_phase, aggregate_rep, aggregate_set, Confidence, MovementPhase, Rep,
    SetAggregatorConfig, TempoTarget, WorkoutSample,
};

fn run(kind: MovementPhase, start_ms: i64, n: usize, velocity: f64) -> Vec<WorkoutSample> {
    (0..n)
        .map(|i| WorkoutSample {
            sequence: i as u64,
            timestamp: start_ms + i as i64 * 100,
            phase: kind,
            position: if kind == MovementPhase::Concentric { 0.08 * i as f64 } else { 0.8 - 0.05 * i as f64 },
            velocity,
            force: 40.0,
        })
        .collect()
}

/// Rep with 1.0 s concentric and 1.5 s eccentric at constant velocities.
fn rep(n: u32, con_v: f64, ecc_v: f64) -> Rep {
    let start = n as i64 * 5_000;
    let con = aggregate_phase(MovementPhase::Concentric, run(MovementPhase::Concentric, start, 11, con_v));
    let ecc = aggregate_phase(MovementPhase::Eccentric, run(MovementPhase::Eccentric, start + 1_100, 16, ecc_v));
    aggregate_rep(n, con, ecc, None, None)
}

fn reps(con: &[f64], ecc: &[f64]) -> Vec<Rep> {
    con.iter()
        .zip(ecc)
        .enumerate()
        .map(|(i, (c, e))| rep(i as u32 + 1, *c, *e))
        .collect()
}

#[test]
fn empty_set_is_the_no_data_sentinel() {
    let m = aggregate_set(&[], None, &SetAggregatorConfig::default());
    assert_eq!(m.rep_count, 0);
    assert_eq!(m.total_duration, 0.0);
    assert_eq!(m.time_under_tension, 0.0);
    assert_eq!(m.effort.rir, 6.0);
    assert_eq!(m.effort.rpe, 4.0);
    assert_eq!(m.effort.confidence, Confidence::Low);
    assert_eq!(m.fatigue.eccentric_control_score, 100.0);
    assert_eq!(m.fatigue.fatigue_index, 0.0);
    assert!(m.fatigue.form_warning.is_none());
    assert!(m.velocity.concentric_by_rep.is_empty());
    assert!(m.tempo.is_none());
}

#[test]
fn aggregate_set_is_idempotent() {
    let rs = reps(&[0.7, 0.66, 0.58, 0.5], &[0.4, 0.42, 0.47, 0.55]);
    let target = TempoTarget::parse("2-0-1-0");
    let cfg = SetAggregatorConfig::default();
    let a = aggregate_set(&rs, target.as_ref(), &cfg);
    let b = aggregate_set(&rs, target.as_ref(), &cfg);
    assert_eq!(a, b);
}

#[test]
fn declining_concentric_scenario() {
    let rs = reps(&[0.70, 0.65, 0.50], &[0.40, 0.40, 0.40]);
    let m = aggregate_set(&rs, None, &SetAggregatorConfig::default());

    assert_eq!(m.rep_count, 3);
    assert!((m.velocity.concentric_baseline - 0.675).abs() < 1e-9);
    assert!((m.velocity.concentric_last - 0.50).abs() < 1e-9);
    assert!((m.velocity.concentric_delta - (-25.925_925)).abs() < 1e-3);
    assert!(m.velocity.eccentric_delta.abs() < 1e-9);
    assert_eq!(m.velocity.concentric_by_rep.len(), 3);

    // 25.93 * 0.6
    assert!((m.fatigue.fatigue_index - 15.5556).abs() < 1e-3);
    assert_eq!(m.fatigue.eccentric_control_score, 100.0);
    // 6 - 15.56/13 = 4.80 -> 5.0
    assert_eq!(m.effort.rir, 5.0);
    assert_eq!(m.effort.rpe, 5.0);
    assert_eq!(m.effort.confidence, Confidence::Low);
}

#[test]
fn single_rep_baseline_equals_last() {
    let rs = reps(&[0.62], &[0.35]);
    let m = aggregate_set(&rs, None, &SetAggregatorConfig::default());
    assert_eq!(m.velocity.concentric_baseline, m.velocity.concentric_last);
    assert!(m.velocity.concentric_delta.abs() < 1e-9);
    assert_eq!(m.effort.rir, 6.0);
}

#[test]
fn zero_baseline_gives_zero_delta() {
    let rs = reps(&[0.0, 0.0, 0.3], &[0.0, 0.0, 0.3]);
    let v = velocity_metrics(&rs, 2);
    assert_eq!(v.concentric_delta, 0.0);
    assert_eq!(v.eccentric_delta, 0.0);
}

#[test]
fn baseline_reps_zero_uses_first_rep() {
    let rs = reps(&[0.8, 0.6, 0.4], &[0.4, 0.4, 0.4]);
    let v = velocity_metrics(&rs, 0);
    assert!((v.concentric_baseline - 0.8).abs() < 1e-9);
    let v = velocity_metrics(&rs, 10);
    assert!((v.concentric_baseline - 0.6).abs() < 1e-9);
}

#[test]
fn fatigue_is_monotone_in_concentric_loss() {
    let cfg = SetAggregatorConfig::default();
    let mut last = -1.0;
    for final_v in [0.70, 0.65, 0.60, 0.50, 0.40, 0.30, 0.20, 0.05] {
        let rs = reps(&[0.70, 0.70, final_v], &[0.40, 0.40, 0.45]);
        let m = aggregate_set(&rs, None, &cfg);
        assert!(
            m.fatigue.fatigue_index >= last,
            "fatigue dropped at final velocity {final_v}: {} < {last}",
            m.fatigue.fatigue_index
        );
        last = m.fatigue.fatigue_index;
    }
    assert!(last > 50.0 && last <= 100.0);
}

#[test]
fn eccentric_speedup_triggers_control_warning() {
    let rs = reps(&[0.6, 0.6, 0.45], &[0.40, 0.40, 0.56]);
    let m = aggregate_set(&rs, None, &SetAggregatorConfig::default());
    // +40% eccentric -> score 20
    assert!((m.fatigue.eccentric_control_score - 20.0).abs() < 1e-6);
    assert_eq!(
        m.fatigue.form_warning.as_deref(),
        Some("Eccentric control declining - slow the negative")
    );
    // 25*0.6 + 40*1.5*0.4 = 39
    assert!((m.fatigue.fatigue_index - 39.0).abs() < 1e-6);
    // 6 - 3 = 3, minus 1 for poor control
    assert_eq!(m.effort.rir, 2.0);
    assert_eq!(m.effort.rpe, 8.0);
    assert_eq!(m.effort.confidence, Confidence::Medium);
}

#[test]
fn custom_weights_are_honoured() {
    let rs = reps(&[0.8, 0.8, 0.6], &[0.4, 0.4, 0.4]);
    let cfg = SetAggregatorConfig { concentric_weight: 1.0, ..Default::default() };
    let m = aggregate_set(&rs, None, &cfg);
    assert!((m.fatigue.fatigue_index - 25.0).abs() < 1e-6);
}

#[test]
fn tiers_compose() {
    let rs = reps(&[0.9, 0.8, 0.3], &[0.3, 0.3, 0.33]);
    let cfg = SetAggregatorConfig::default();
    let v = velocity_metrics(&rs, cfg.baseline_reps);
    let f = fatigue_analysis(&v, &cfg);
    let e = effort_estimate(&f);
    let m = aggregate_set(&rs, None, &cfg);
    assert_eq!(m.velocity, v);
    assert_eq!(m.fatigue, f);
    assert_eq!(m.effort, e);
    assert_eq!(m.effort.rir + m.effort.rpe, 10.0);
}

#[test]
fn durations_and_tempo_adherence() {
    let rs = reps(&[0.7, 0.6], &[0.4, 0.4]);
    let target = TempoTarget::parse("1.5-0-1-0").expect("tempo");
    let m = aggregate_set(&rs, Some(&target), &SetAggregatorConfig::default());

    // each rep: 1.0 s con + 1.5 s ecc
    assert!((m.time_under_tension - 5.0).abs() < 1e-9);
    // rep 1 starts at 5.0 s, rep 2 ends at 10.0 + 2.6 s
    assert!((m.total_duration - 7.6).abs() < 1e-9);

    let tempo = m.tempo.expect("tempo analysis");
    assert_eq!(tempo.target, "1.5-0-1-0");
    assert_eq!(tempo.reps_on_tempo, 2);
    assert_eq!(tempo.adherence_pct, 100.0);
    assert!((tempo.mean_eccentric - 1.5).abs() < 1e-9);

    let slow = TempoTarget::parse("4-0-2-0").expect("tempo");
    let m = aggregate_set(&rs, Some(&slow), &SetAggregatorConfig::default());
    assert_eq!(m.tempo.expect("tempo").reps_on_tempo, 0);
}
