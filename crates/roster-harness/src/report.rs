#![forbid(unsafe_code)]

//! Sample collection and machine-readable reporting.

use std::io::{self, Write};

use roster_profile::{MemorySink, Phase, ScenarioSample};
use serde::Serialize;

/// Aggregate timing figures for one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseSummary {
    pub phase: Phase,
    pub count: usize,
    pub min_us: u64,
    pub max_us: u64,
    pub mean_us: u64,
}

/// Everything an external pipeline needs from one harness run.
#[derive(Debug, Clone, Serialize)]
pub struct SampleReport {
    samples: Vec<ScenarioSample>,
    summaries: Vec<PhaseSummary>,
}

impl SampleReport {
    /// Build a report from the samples a sink collected.
    #[must_use]
    pub fn from_sink(sink: &MemorySink) -> Self {
        Self::from_samples(sink.snapshot())
    }

    /// Build a report from an explicit sample list.
    #[must_use]
    pub fn from_samples(samples: Vec<ScenarioSample>) -> Self {
        let summaries = [Phase::Constructor, Phase::Appear, Phase::Render]
            .into_iter()
            .filter_map(|phase| summarize(&samples, phase))
            .collect();
        Self { samples, summaries }
    }

    /// Total number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the run produced no samples at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples, in emission order.
    #[must_use]
    pub fn samples(&self) -> &[ScenarioSample] {
        &self.samples
    }

    /// Per-phase aggregates (phases with no samples are omitted).
    #[must_use]
    pub fn summaries(&self) -> &[PhaseSummary] {
        &self.summaries
    }

    /// Samples for one phase, in emission order.
    #[must_use]
    pub fn for_phase(&self, phase: Phase) -> Vec<&ScenarioSample> {
        self.samples.iter().filter(|s| s.phase == phase).collect()
    }

    /// Distinct instance ids seen for one phase, in first-seen order.
    #[must_use]
    pub fn instance_ids(&self, phase: Phase) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for sample in self.samples.iter().filter(|s| s.phase == phase) {
            if !ids.contains(&sample.instance_id.as_str()) {
                ids.push(&sample.instance_id);
            }
        }
        ids
    }

    /// Write one JSON object per sample line.
    pub fn write_json_lines<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for sample in &self.samples {
            let line = serde_json::to_string(sample).map_err(io::Error::other)?;
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }

    /// The whole report as one pretty JSON document.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_owned())
    }
}

fn summarize(samples: &[ScenarioSample], phase: Phase) -> Option<PhaseSummary> {
    let times: Vec<u64> = samples
        .iter()
        .filter(|s| s.phase == phase)
        .map(|s| s.at_us)
        .collect();
    if times.is_empty() {
        return None;
    }
    let min_us = *times.iter().min().expect("non-empty");
    let max_us = *times.iter().max().expect("non-empty");
    let mean_us = times.iter().sum::<u64>() / times.len() as u64;
    Some(PhaseSummary {
        phase,
        count: times.len(),
        min_us,
        max_us,
        mean_us,
    })
}
