use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

/// Process-wide pipeline counters.
struct Counters {
    registry: Registry,
    samples_processed: IntCounter,
    reps_completed: IntCounter,
    reps_abandoned: IntCounter,
    reps_force_completed: IntCounter,
}

impl Counters {
    fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let counter = |name: &str, help: &str| -> prometheus::Result<IntCounter> {
            let c = IntCounter::new(name, help)?;
            registry.register(Box::new(c.clone()))?;
            Ok(c)
        };

        Ok(Self {
            samples_processed: counter(
                "voltra_samples_processed_total",
                "Telemetry samples fed to the rep detector",
            )?,
            reps_completed: counter("voltra_reps_completed_total", "Rep boundaries emitted")?,
            reps_abandoned: counter(
                "voltra_reps_abandoned_total",
                "Reps dropped before reaching the eccentric phase",
            )?,
            reps_force_completed: counter(
                "voltra_reps_force_completed_total",
                "Reps closed by an external rep-summary event",
            )?,
            registry,
        })
    }
}

// Names are static and unique, so construction cannot fail at runtime.
static COUNTERS: Lazy<Counters> =
    Lazy::new(|| Counters::new().expect("static counter definitions are valid"));

pub fn samples_processed_total() -> &'static IntCounter {
    &COUNTERS.samples_processed
}

pub fn reps_completed_total() -> &'static IntCounter {
    &COUNTERS.reps_completed
}

pub fn reps_abandoned_total() -> &'static IntCounter {
    &COUNTERS.reps_abandoned
}

pub fn reps_force_completed_total() -> &'static IntCounter {
    &COUNTERS.reps_force_completed
}

/// Text exposition of all counters.
pub fn gather_text() -> String {
    let mut buf = Vec::new();
    let families = COUNTERS.registry.gather();
    if let Err(e) = TextEncoder::new().encode(&families, &mut buf) {
        log::warn!("counter encoding failed: {e}");
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}
