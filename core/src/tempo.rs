use serde::{Deserialize, Serialize};

use crate::math::mean;
use crate::rep::tempo_string;
use crate::types::{Rep, TempoAnalysis};

pub const DEFAULT_TEMPO_TOLERANCE_S: f64 = 0.5;

/// Planned tempo in seconds per segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TempoTarget {
    pub eccentric: f64,
    pub pause_top: f64,
    pub concentric: f64,
    pub pause_bottom: f64,
}

impl TempoTarget {
    /// Parse `"ecc-top-con-bottom"`, e.g. `"3-1-1-0"` or `"2.5-0-1-0"`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<f64> = s
            .trim()
            .split('-')
            .map(|p| p.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0))
            .collect::<Option<_>>()?;

        match parts.as_slice() {
            [ecc, top, con, bottom] => Some(Self {
                eccentric: *ecc,
                pause_top: *top,
                concentric: *con,
                pause_bottom: *bottom,
            }),
            _ => None,
        }
    }

    pub fn to_tempo_string(&self) -> String {
        tempo_string(self.eccentric, self.pause_top, self.concentric, self.pause_bottom)
    }
}

/// How closely the reps followed `target`. `None` for an empty set.
pub fn analyze_tempo(reps: &[Rep], target: &TempoTarget, tolerance_s: f64) -> Option<TempoAnalysis> {
    if reps.is_empty() {
        return None;
    }

    let ecc: Vec<f64> = reps.iter().map(|r| r.eccentric.duration()).collect();
    let con: Vec<f64> = reps.iter().map(|r| r.concentric.duration()).collect();

    let on_tempo = ecc
        .iter()
        .zip(&con)
        .filter(|(e, c)| {
            (*e - target.eccentric).abs() <= tolerance_s
                && (*c - target.concentric).abs() <= tolerance_s
        })
        .count();

    Some(TempoAnalysis {
        target: target.to_tempo_string(),
        reps_on_tempo: on_tempo as u32,
        adherence_pct: on_tempo as f64 / reps.len() as f64 * 100.0,
        mean_eccentric: mean(&ecc),
        mean_concentric: mean(&con),
    })
}
