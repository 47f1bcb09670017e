#![forbid(unsafe_code)]

//! Roster public facade crate.
//!
//! Re-exports the stable surface from the internal crates and offers a
//! lightweight prelude for embedders: build a [`Router`] over a
//! [`CatalogSource`], drive it with a [`ProgramSimulator`] (or your own
//! loop), and collect lifecycle samples through a [`SampleSink`].

// --- Core re-exports -------------------------------------------------------

pub use roster_core::activation::{ActivationParams, ParamBag, Scenario};
pub use roster_core::catalog::{CatalogError, CatalogSource, FixtureSource};
pub use roster_core::item::{CatalogData, CatalogEnvelope, CatalogItem};
pub use roster_core::ordering::{favorites_first, remove, toggle, toggle_favorite};
pub use roster_core::pagination::{DEFAULT_END_THRESHOLD, PageState, near_end};

// --- Profiling re-exports --------------------------------------------------

pub use roster_profile::{
    JsonLinesSink, Lifecycle, MemorySink, Phase, Profiler, SampleSink, ScenarioSample,
};

// --- Runtime re-exports ----------------------------------------------------

pub use roster_runtime::event::{Event, KeyCode, KeyEvent, Modifiers};
pub use roster_runtime::frame::Frame;
pub use roster_runtime::program::{Cmd, Model};
pub use roster_runtime::simulator::{CmdRecord, ProgramSimulator};

// --- Screen re-exports -----------------------------------------------------

pub use roster_screen::controls::{parse_push_self, push_self_control};
pub use roster_screen::{ActivationId, CATALOG_LIST, CatalogScreen, InputOutcome, Router, RouterMsg};

/// Convenience prelude for embedders.
pub mod prelude {
    pub use crate::{
        ActivationParams, CatalogItem, CatalogSource, Cmd, Event, FixtureSource, Frame,
        MemorySink, Model, Phase, Profiler, ProgramSimulator, Router, RouterMsg, Scenario,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::sync::Arc;

    #[test]
    fn facade_wires_a_whole_program() {
        let sink = Arc::new(MemorySink::new());
        let profiler = Arc::new(Profiler::new(sink.clone()));
        let router = Router::new(
            Arc::new(FixtureSource::synthetic(10)),
            profiler,
            crate::ParamBag::new(),
        );
        let mut sim = ProgramSimulator::new(router);
        sim.init();
        sim.drain_tasks();
        assert_eq!(sim.model().top().unwrap().page().items().len(), 10);
        assert!(sink.is_empty());
    }
}
