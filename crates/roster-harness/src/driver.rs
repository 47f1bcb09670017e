#![forbid(unsafe_code)]

//! Scripted activation driving.
//!
//! One activation cycle is: tap the control (construction), settle the
//! transition (the UI becomes interactive), render the first frame, then
//! drain the fetch continuation. Taps are strictly sequential — each
//! activation runs to completion before the next tap — so N taps produce
//! N independent, individually attributable samples.

use std::sync::Arc;

use roster_core::{CatalogSource, ParamBag, Scenario};
use roster_profile::{MemorySink, Profiler};
use roster_runtime::ProgramSimulator;
use roster_runtime::event::Event;
use roster_screen::controls::push_self_control;
use roster_screen::{Router, RouterMsg};

/// How many times the driver re-activates the screen per scenario.
pub const SCREEN_TIMES: usize = 3;

/// Frame dimensions the driver renders at.
pub const FRAME_WIDTH: u16 = 80;
/// Frame dimensions the driver renders at.
pub const FRAME_HEIGHT: u16 = 24;

/// Boot the program over `source` with an uninstrumented root screen.
///
/// Runs the root activation to completion (settled, rendered, first page
/// loaded) and returns the sample sink alongside the simulator.
#[must_use]
pub fn boot(source: Arc<dyn CatalogSource>) -> (Arc<MemorySink>, ProgramSimulator<Router>) {
    boot_with_launch(source, ParamBag::new())
}

/// Boot with explicit launch parameters for the root screen.
#[must_use]
pub fn boot_with_launch(
    source: Arc<dyn CatalogSource>,
    launch: ParamBag,
) -> (Arc<MemorySink>, ProgramSimulator<Router>) {
    let sink = Arc::new(MemorySink::new());
    let profiler = Arc::new(Profiler::new(sink.clone()));
    let router = Router::new(source, profiler, launch);
    let mut sim = ProgramSimulator::new(router);
    sim.init();
    complete_activation(&mut sim);
    (sink, sim)
}

/// Tap the scenario's push-self control `times` times, running each
/// activation to completion before the next tap.
pub fn push_self(sim: &mut ProgramSimulator<Router>, scenario: Scenario, times: usize) {
    let control = push_self_control(scenario);
    for _ in 0..times {
        sim.inject_event(Event::tap(control.clone()));
        complete_activation(sim);
    }
}

/// Drive the newest activation through settle, first render, and fetch
/// resumption.
pub fn complete_activation(sim: &mut ProgramSimulator<Router>) {
    sim.settle();
    sim.capture_frame(FRAME_WIDTH, FRAME_HEIGHT);
    sim.drain_tasks();
}

/// Send one message directly (escape hatch for bespoke scripts).
pub fn send(sim: &mut ProgramSimulator<Router>, msg: RouterMsg) {
    sim.send(msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::FixtureSource;

    #[test]
    fn boot_completes_the_root_activation() {
        let (sink, sim) = boot(Arc::new(FixtureSource::synthetic(30)));
        assert!(sink.is_empty());
        let top = sim.model().top().unwrap();
        assert_eq!(top.page().items().len(), 20);
        assert!(top.lifecycle().has_appeared());
        assert!(top.lifecycle().has_rendered());
    }

    #[test]
    fn each_tap_runs_to_completion() {
        let (_sink, mut sim) = boot(Arc::new(FixtureSource::synthetic(30)));
        push_self(&mut sim, Scenario::Appear, 2);
        assert_eq!(sim.model().depth(), 3);
        assert_eq!(sim.pending_task_count(), 0);
        assert!(sim.model().top().unwrap().lifecycle().has_appeared());
    }
}
