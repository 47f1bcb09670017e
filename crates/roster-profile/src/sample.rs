#![forbid(unsafe_code)]

//! Sample record types.

use std::fmt;

use roster_core::Scenario;
use serde::{Deserialize, Serialize};

/// A lifecycle milestone eligible for sampling.
///
/// Phases match scenarios 1:1 — a scenario selects the phase of the same
/// name and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Screen instance construction.
    Constructor,
    /// The activation transition has settled and the UI is interactive.
    Appear,
    /// The first render pass completed.
    Render,
}

impl Phase {
    /// Stable wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::Appear => "appear",
            Self::Render => "render",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Scenario> for Phase {
    fn from(scenario: Scenario) -> Self {
        match scenario {
            Scenario::Constructor => Self::Constructor,
            Scenario::Appear => Self::Appear,
            Scenario::Render => Self::Render,
        }
    }
}

/// One timing sample: a screen reached a phase at a monotonic instant.
///
/// `at_us` is microseconds since the emitting [`crate::Profiler`]'s
/// origin — comparable across samples from the same profiler, meaningless
/// across profilers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSample {
    /// Screen name the sample is attributed to.
    pub screen: String,
    /// Opaque correlation token distinguishing repeated activations.
    pub instance_id: String,
    /// The lifecycle milestone that was reached.
    pub phase: Phase,
    /// Monotonic microseconds since the profiler origin.
    pub at_us: u64,
}
