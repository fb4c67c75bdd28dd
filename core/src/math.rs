use ordered_float::OrderedFloat;

pub trait RoundTo {
    /// Nearest 0.5 (`round(x*2)/2`).
    fn round_half(self) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_half(self) -> f64 {
        (self * 2.0).round() / 2.0
    }
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Maximum of an iterator, 0.0 when empty. NaN sorts above everything in
/// `OrderedFloat`, so non-finite values are dropped first.
pub fn peak<I: IntoIterator<Item = f64>>(xs: I) -> f64 {
    xs.into_iter()
        .filter(|x| x.is_finite())
        .map(OrderedFloat)
        .max()
        .map(|m| m.into_inner())
        .unwrap_or(0.0)
}

/// Percent change of `last` against `baseline`; 0.0 when baseline is 0.
pub fn pct_change(baseline: f64, last: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    (last - baseline) / baseline * 100.0
}
