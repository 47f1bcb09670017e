#![forbid(unsafe_code)]

//! Lifecycle performance sampling for roster screens.
//!
//! A screen activation may request a *scenario*: a named lifecycle phase
//! that should produce exactly one timing sample, correlated with an
//! externally supplied instance id. This crate owns the whole sampling
//! path:
//!
//! - [`Phase`] / [`ScenarioSample`] — what gets emitted
//! - [`SampleSink`] — where it goes (memory, JSON lines, anything)
//! - [`Profiler`] — timestamping and fan-out
//! - [`Lifecycle`] — the per-activation one-shot trigger evaluating the
//!   requested scenario at each phase boundary
//!
//! Emission is fire-and-forget: nothing here blocks the UI path or
//! surfaces an error into it.

pub mod lifecycle;
pub mod profiler;
pub mod sample;
pub mod sink;

pub use lifecycle::Lifecycle;
pub use profiler::Profiler;
pub use sample::{Phase, ScenarioSample};
pub use sink::{JsonLinesSink, MemorySink, SampleSink};
