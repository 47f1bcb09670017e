#![forbid(unsafe_code)]

//! Timestamping and sample fan-out.

use std::sync::Arc;
use std::time::Instant;

use crate::sample::{Phase, ScenarioSample};
use crate::sink::SampleSink;

/// Stamps samples against a monotonic origin and forwards them to a sink.
///
/// One profiler serves every activation of every screen in a process; the
/// shared origin makes `at_us` values comparable across activations so an
/// external harness can diff repeated runs.
pub struct Profiler {
    origin: Instant,
    sink: Arc<dyn SampleSink>,
}

impl Profiler {
    /// Create a profiler whose origin is "now".
    #[must_use]
    pub fn new(sink: Arc<dyn SampleSink>) -> Self {
        Self {
            origin: Instant::now(),
            sink,
        }
    }

    /// Emit one sample for (screen, instance, phase) at the current
    /// monotonic offset. Fire-and-forget: never blocks, never fails.
    pub fn sample(&self, screen: &str, instance_id: &str, phase: Phase) {
        let at_us = u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX);
        tracing::debug!(screen, instance_id, phase = phase.as_str(), at_us, "lifecycle sample");
        self.sink.record(ScenarioSample {
            screen: screen.to_owned(),
            instance_id: instance_id.to_owned(),
            phase,
            at_us,
        });
    }
}

impl std::fmt::Debug for Profiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profiler")
            .field("origin", &self.origin)
            .field("sink", &"<dyn SampleSink>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn samples_carry_monotone_timestamps() {
        let sink = Arc::new(MemorySink::new());
        let profiler = Profiler::new(sink.clone());
        profiler.sample("CatalogList", "a", Phase::Constructor);
        profiler.sample("CatalogList", "b", Phase::Appear);
        let samples = sink.snapshot();
        assert_eq!(samples.len(), 2);
        assert!(samples[0].at_us <= samples[1].at_us);
        assert_eq!(samples[0].instance_id, "a");
        assert_eq!(samples[1].phase, Phase::Appear);
    }
}
