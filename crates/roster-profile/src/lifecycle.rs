#![forbid(unsafe_code)]

//! Per-activation lifecycle trigger.
//!
//! One [`Lifecycle`] lives inside one screen activation and fires the
//! profiler at exactly three phase boundaries:
//!
//! - **constructor** — inside [`Lifecycle::new`], before any other work;
//! - **appear** — via [`Lifecycle::appeared`], when the activation's
//!   settle continuation resumes;
//! - **render** — via [`Lifecycle::render_pass`], on the first completed
//!   render pass only.
//!
//! Each boundary is entered at most once; the guards live on the instance
//! itself, never in shared module state. The requested scenario gates
//! emission: an activation with no scenario (or an unrecognized one)
//! passes through every boundary without emitting anything.
//!
//! `render_pass` takes `&self` because it is called from the render path,
//! which only has a shared reference to the model; the one-shot guard is
//! a `Cell` for that reason. The flag flips only after the check-and-emit,
//! so the emission is first-render-only by construction.

use std::cell::Cell;
use std::sync::Arc;

use roster_core::{ActivationParams, Scenario};

use crate::profiler::Profiler;
use crate::sample::Phase;

/// One-shot phase trigger for a single screen activation.
pub struct Lifecycle {
    screen: String,
    scenario: Option<Scenario>,
    instance_id: String,
    profiler: Arc<Profiler>,
    appeared: bool,
    first_render_done: Cell<bool>,
}

impl Lifecycle {
    /// Construct the trigger and enter the `Created` boundary.
    ///
    /// Emits the `constructor` sample immediately when the activation
    /// requested that scenario.
    #[must_use]
    pub fn new(screen: impl Into<String>, params: &ActivationParams, profiler: Arc<Profiler>) -> Self {
        let lifecycle = Self {
            screen: screen.into(),
            scenario: params.scenario,
            instance_id: params.instance_id.clone().unwrap_or_default(),
            profiler,
            appeared: false,
            first_render_done: Cell::new(false),
        };
        lifecycle.emit_if_requested(Phase::Constructor);
        lifecycle
    }

    /// Enter the `Appeared` boundary: the activation transition settled
    /// and the UI is interactive. Later calls are no-ops.
    pub fn appeared(&mut self) {
        if self.appeared {
            return;
        }
        self.appeared = true;
        self.emit_if_requested(Phase::Appear);
    }

    /// Record a completed render pass. The first call enters the
    /// `FirstRendered` boundary; every later call is a no-op.
    pub fn render_pass(&self) {
        if self.first_render_done.get() {
            return;
        }
        self.emit_if_requested(Phase::Render);
        self.first_render_done.set(true);
    }

    /// The scenario this activation was asked to sample, if any.
    #[must_use]
    pub fn scenario(&self) -> Option<Scenario> {
        self.scenario
    }

    /// The activation's correlation token (empty when none was supplied).
    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Whether the `Appeared` boundary has been entered.
    #[must_use]
    pub fn has_appeared(&self) -> bool {
        self.appeared
    }

    /// Whether the first render pass has completed.
    #[must_use]
    pub fn has_rendered(&self) -> bool {
        self.first_render_done.get()
    }

    /// Emit the phase sample iff it is the one the activation's scenario
    /// selects.
    fn emit_if_requested(&self, phase: Phase) {
        if self.scenario.map(Phase::from) == Some(phase) {
            self.profiler.sample(&self.screen, &self.instance_id, phase);
        }
    }
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifecycle")
            .field("screen", &self.screen)
            .field("scenario", &self.scenario)
            .field("instance_id", &self.instance_id)
            .field("appeared", &self.appeared)
            .field("first_render_done", &self.first_render_done.get())
            .finish()
    }
}
