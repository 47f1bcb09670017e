#![forbid(unsafe_code)]

//! End-to-end driver and reporting for roster lifecycle sampling.
//!
//! The harness plays the external automation driver: it boots the
//! program in the deterministic simulator, taps the hidden
//! `push-self-<scenario>` controls, and collects the emitted samples into
//! a machine-readable report.
//!
//! # Quick start
//!
//! ```
//! use roster_core::FixtureSource;
//! use roster_core::Scenario;
//! use roster_harness::driver::{SCREEN_TIMES, boot, push_self};
//! use roster_harness::report::SampleReport;
//! use std::sync::Arc;
//!
//! let (sink, mut sim) = boot(Arc::new(FixtureSource::synthetic(40)));
//! push_self(&mut sim, Scenario::Appear, SCREEN_TIMES);
//! let report = SampleReport::from_sink(&sink);
//! assert_eq!(report.len(), SCREEN_TIMES);
//! ```

pub mod driver;
pub mod report;

pub use driver::{SCREEN_TIMES, boot, push_self};
pub use report::{PhaseSummary, SampleReport};
