#![forbid(unsafe_code)]

//! Sample sinks.
//!
//! A sink receives finished samples from the [`crate::Profiler`]. The
//! contract is best-effort delivery on the caller's thread: a sink must
//! not block for meaningful time and must swallow its own failures —
//! sampling never fails the UI path.

use std::io::Write;
use std::sync::Mutex;

use crate::sample::ScenarioSample;

/// Receiver for emitted samples.
pub trait SampleSink: Send + Sync {
    /// Accept one sample. Must not panic or block; errors stay inside.
    fn record(&self, sample: ScenarioSample);
}

/// Collects samples in memory, for tests and in-process reporting.
#[derive(Debug, Default)]
pub struct MemorySink {
    samples: Mutex<Vec<ScenarioSample>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy out everything recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ScenarioSample> {
        self.samples.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Number of samples recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SampleSink for MemorySink {
    fn record(&self, sample: ScenarioSample) {
        if let Ok(mut samples) = self.samples.lock() {
            samples.push(sample);
        }
    }
}

/// Writes one JSON object per line to any [`Write`] target.
///
/// I/O errors are reported through `tracing::warn!` and otherwise
/// dropped; a broken pipe never reaches the screen.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and hand back the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> SampleSink for JsonLinesSink<W> {
    fn record(&self, sample: ScenarioSample) {
        let Ok(line) = serde_json::to_string(&sample) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            if let Err(err) = writeln!(writer, "{line}") {
                tracing::warn!(error = %err, "sample sink write failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Phase;

    fn sample(phase: Phase, at_us: u64) -> ScenarioSample {
        ScenarioSample {
            screen: "CatalogList".to_owned(),
            instance_id: "run-1".to_owned(),
            phase,
            at_us,
        }
    }

    #[test]
    fn memory_sink_collects_in_order() {
        let sink = MemorySink::new();
        sink.record(sample(Phase::Constructor, 1));
        sink.record(sample(Phase::Appear, 2));
        let got = sink.snapshot();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].phase, Phase::Constructor);
        assert_eq!(got[1].at_us, 2);
    }

    #[test]
    fn json_lines_roundtrip() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.record(sample(Phase::Render, 42));
        sink.record(sample(Phase::Appear, 43));
        let bytes = sink.into_inner();
        let text = String::from_utf8(bytes).unwrap();
        let parsed: Vec<ScenarioSample> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].phase, Phase::Render);
        assert_eq!(parsed[1].at_us, 43);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_swallowed() {
        let sink = JsonLinesSink::new(FailingWriter);
        // Must not panic.
        sink.record(sample(Phase::Constructor, 0));
    }
}
