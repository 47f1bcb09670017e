#![forbid(unsafe_code)]

//! Harness binary: run every scenario and print a JSON report.
//!
//! Boots the catalog screen over a synthetic fixture, taps each
//! `push-self-<scenario>` control `SCREEN_TIMES` times, and writes the
//! collected samples plus per-phase summaries to stdout as JSON.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=debug` to
//! see every emitted sample.
//!
//! ```sh
//! cargo run -p roster-harness
//! RUST_LOG=debug cargo run -p roster-harness
//! ```

use std::sync::Arc;

use roster_core::{FixtureSource, Scenario};
use roster_harness::driver::{SCREEN_TIMES, boot, push_self};
use roster_harness::report::SampleReport;
use tracing_subscriber::EnvFilter;

/// Items in the synthetic fixture catalog.
const FIXTURE_LEN: usize = 120;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let source = Arc::new(FixtureSource::synthetic(FIXTURE_LEN));
    let (sink, mut sim) = boot(source);

    for scenario in Scenario::ALL {
        tracing::info!(%scenario, times = SCREEN_TIMES, "driving scenario");
        push_self(&mut sim, scenario, SCREEN_TIMES);
    }

    let report = SampleReport::from_sink(&sink);
    tracing::info!(samples = report.len(), "run complete");
    println!("{}", report.to_json());
}
