#![forbid(unsafe_code)]

//! Navigation stack and message routing.
//!
//! The router is the program model. Activations live on a stack; input
//! goes to the top one, while fetch and settle resumptions go to the
//! activation that issued them, wherever it is on the stack — or nowhere,
//! if it has been popped. A resumption with no living activation is
//! dropped silently; tearing a screen down never cancels its in-flight
//! work, it only orphans it.

use std::sync::Arc;

use roster_core::{ActivationParams, CatalogItem, CatalogSource, ParamBag, Scenario};
use roster_profile::Profiler;
use roster_runtime::event::Event;
use roster_runtime::frame::Frame;
use roster_runtime::program::{Cmd, Model};

use crate::controls::parse_push_self;
use crate::screen::{ActivationId, CatalogScreen, InputOutcome};

/// Messages driving the router.
#[derive(Debug)]
pub enum RouterMsg {
    /// Raw input forwarded to the top activation.
    Input(Event),
    /// A push-self control was tapped.
    PushSelf(Scenario),
    /// A catalog fetch resumed with a batch.
    PageLoaded {
        activation: ActivationId,
        batch: Vec<CatalogItem>,
    },
    /// A catalog fetch resumed with an error.
    FetchFailed {
        activation: ActivationId,
        error: String,
    },
    /// An activation's transition settled.
    Settled { activation: ActivationId },
    /// Quit the program.
    Quit,
    /// Ignored input.
    Noop,
}

impl From<Event> for RouterMsg {
    fn from(event: Event) -> Self {
        match event {
            Event::Tap(control) => match parse_push_self(&control) {
                Some(scenario) => Self::PushSelf(scenario),
                None => Self::Noop,
            },
            Event::Key(k) if k.is_char('q') => Self::Quit,
            other => Self::Input(other),
        }
    }
}

/// Stack of catalog screen activations.
pub struct Router {
    stack: Vec<CatalogScreen>,
    source: Arc<dyn CatalogSource>,
    profiler: Arc<Profiler>,
    launch: ParamBag,
    next_activation: u64,
    auto_instance: u64,
}

impl Router {
    /// Create a router. `launch` holds the root activation's direct
    /// parameters (possibly empty: an uninstrumented launch).
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>, profiler: Arc<Profiler>, launch: ParamBag) -> Self {
        Self {
            stack: Vec::new(),
            source,
            profiler,
            launch,
            next_activation: 0,
            auto_instance: 0,
        }
    }

    /// Number of activations on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The top activation, if any.
    #[must_use]
    pub fn top(&self) -> Option<&CatalogScreen> {
        self.stack.last()
    }

    fn screen_mut(&mut self, activation: ActivationId) -> Option<&mut CatalogScreen> {
        self.stack
            .iter_mut()
            .find(|s| s.activation() == activation)
    }

    fn push_screen(&mut self, params: &ActivationParams) -> Cmd<RouterMsg> {
        let activation = ActivationId(self.next_activation);
        self.next_activation += 1;
        // Construction is the Created boundary; the constructor sample,
        // if requested, fires inside `new` before the fetch is issued.
        let mut screen = CatalogScreen::new(activation, params, Arc::clone(&self.profiler));
        let offset = screen.start_load();
        self.stack.push(screen);
        tracing::info!(%activation, scenario = ?params.scenario, "screen pushed");
        Cmd::batch(vec![
            self.fetch_cmd(activation, offset),
            Cmd::settle(move || RouterMsg::Settled { activation }),
        ])
    }

    fn fetch_cmd(&self, activation: ActivationId, offset: usize) -> Cmd<RouterMsg> {
        let source = Arc::clone(&self.source);
        Cmd::task(move || match source.fetch(offset) {
            Ok(batch) => RouterMsg::PageLoaded { activation, batch },
            Err(err) => RouterMsg::FetchFailed {
                activation,
                error: err.to_string(),
            },
        })
    }

    fn pop(&mut self) -> Cmd<RouterMsg> {
        if let Some(screen) = self.stack.pop() {
            tracing::info!(activation = %screen.activation(), "screen popped");
        }
        if self.stack.is_empty() {
            Cmd::quit()
        } else {
            Cmd::none()
        }
    }

    fn forward_input(&mut self, event: Event) -> Cmd<RouterMsg> {
        let Some(screen) = self.stack.last_mut() else {
            return Cmd::none();
        };
        let outcome = match event {
            Event::Key(key) => screen.handle_key(key),
            Event::Scroll { delta } => screen.scroll_by(delta),
            _ => InputOutcome::Handled,
        };
        match outcome {
            InputOutcome::Handled => Cmd::none(),
            InputOutcome::Pop => self.pop(),
            InputOutcome::LoadMore => {
                let activation = screen.activation();
                match screen.try_begin_load() {
                    Some(offset) => self.fetch_cmd(activation, offset),
                    // The gate is already held; nothing to issue.
                    None => Cmd::none(),
                }
            }
        }
    }
}

impl Model for Router {
    type Message = RouterMsg;

    fn init(&mut self) -> Cmd<RouterMsg> {
        let params = ActivationParams::resolve(&self.launch, None);
        self.push_screen(&params)
    }

    fn update(&mut self, msg: RouterMsg) -> Cmd<RouterMsg> {
        match msg {
            RouterMsg::Input(event) => self.forward_input(event),
            RouterMsg::PushSelf(scenario) => {
                self.auto_instance += 1;
                let instance_id = format!("run-{}", self.auto_instance);
                // A pushed activation carries its parameters in the route
                // bag, exactly like a navigation push would.
                let bag = ActivationParams::new(scenario, instance_id).to_route_bag();
                let params = ActivationParams::resolve(&ParamBag::new(), Some(&bag));
                self.push_screen(&params)
            }
            RouterMsg::PageLoaded { activation, batch } => {
                match self.screen_mut(activation) {
                    Some(screen) => screen.apply_batch(batch),
                    None => {
                        tracing::debug!(%activation, "dropping stale fetch resumption");
                    }
                }
                Cmd::none()
            }
            RouterMsg::FetchFailed { activation, error } => {
                match self.screen_mut(activation) {
                    Some(screen) => {
                        tracing::warn!(%activation, %error, "catalog fetch failed");
                        screen.fail_load();
                    }
                    None => {
                        tracing::debug!(%activation, "dropping stale fetch failure");
                    }
                }
                Cmd::none()
            }
            RouterMsg::Settled { activation } => {
                match self.screen_mut(activation) {
                    Some(screen) => screen.settled(),
                    None => {
                        tracing::debug!(%activation, "dropping stale settle resumption");
                    }
                }
                Cmd::none()
            }
            RouterMsg::Quit => Cmd::quit(),
            RouterMsg::Noop => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        if let Some(screen) = self.stack.last() {
            screen.render(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{CatalogError, FixtureSource};
    use roster_profile::MemorySink;
    use roster_runtime::ProgramSimulator;
    use roster_runtime::event::{KeyCode, KeyEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        inner: FixtureSource,
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn new(inner: FixtureSource) -> Self {
            Self {
                inner,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CatalogSource for CountingSource {
        fn fetch(&self, offset: usize) -> Result<Vec<CatalogItem>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(offset)
        }
    }

    struct FailingSource;

    impl CatalogSource for FailingSource {
        fn fetch(&self, _offset: usize) -> Result<Vec<CatalogItem>, CatalogError> {
            Err(CatalogError::Transport("socket closed".to_owned()))
        }
    }

    fn sim_with(
        source: Arc<dyn CatalogSource>,
        launch: ParamBag,
    ) -> (Arc<MemorySink>, ProgramSimulator<Router>) {
        let sink = Arc::new(MemorySink::new());
        let profiler = Arc::new(Profiler::new(sink.clone()));
        let router = Router::new(source, profiler, launch);
        (sink, ProgramSimulator::new(router))
    }

    #[test]
    fn init_pushes_root_and_loads_first_page() {
        let (_sink, mut sim) =
            sim_with(Arc::new(FixtureSource::synthetic(45)), ParamBag::new());
        sim.init();
        assert_eq!(sim.model().depth(), 1);
        assert!(sim.model().top().unwrap().page().is_loading());
        sim.drain_tasks();
        let top = sim.model().top().unwrap();
        assert!(!top.page().is_loading());
        assert_eq!(top.page().items().len(), 20);
    }

    #[test]
    fn load_more_is_gated_while_in_flight() {
        let source = Arc::new(CountingSource::new(FixtureSource::synthetic(100)));
        let (_sink, mut sim) = sim_with(source.clone(), ParamBag::new());
        sim.init();
        sim.drain_tasks();
        assert_eq!(source.calls(), 1);

        // Make the viewport known, then scroll deep enough to cross the
        // load line twice while the first fetch is still pending.
        sim.capture_frame(40, 12);
        sim.inject_event(Event::Scroll { delta: 15 });
        sim.inject_event(Event::Scroll { delta: 1 });
        assert_eq!(source.calls(), 1, "second fetch must wait for drain");
        assert_eq!(sim.pending_task_count(), 1);

        sim.drain_tasks();
        assert_eq!(source.calls(), 2);
        // The first batch merged over an empty list, so this cycle
        // re-requested page zero and replaced it; the cursor now counts
        // the 20 previously-held items.
        let top = sim.model().top().unwrap();
        assert_eq!(top.page().offset(), 20);
        assert_eq!(top.page().items().len(), 20);

        // The next cycle fetches past the held items and appends.
        sim.inject_event(Event::Scroll { delta: 1 });
        sim.drain_tasks();
        assert_eq!(source.calls(), 3);
        assert_eq!(sim.model().top().unwrap().page().items().len(), 40);
    }

    #[test]
    fn fetch_failure_clears_gate_and_keeps_items() {
        let (_sink, mut sim) = sim_with(Arc::new(FailingSource), ParamBag::new());
        sim.init();
        sim.drain_tasks();
        let top = sim.model().top().unwrap();
        assert!(!top.page().is_loading());
        assert!(top.page().items().is_empty());
        assert!(sim.is_running());
    }

    #[test]
    fn stale_fetch_resumption_is_dropped() {
        let source = Arc::new(CountingSource::new(FixtureSource::synthetic(40)));
        let (_sink, mut sim) = sim_with(source, ParamBag::new());
        sim.init();
        sim.drain_tasks();

        // Push a second activation; its fetch is pending when it is
        // popped again.
        sim.inject_event(Event::tap("push-self-appear"));
        assert_eq!(sim.model().depth(), 2);
        sim.inject_event(Event::Key(KeyEvent::new(KeyCode::Escape)));
        assert_eq!(sim.model().depth(), 1);

        // The orphaned continuation resumes without a living activation.
        sim.drain_tasks();
        assert!(sim.is_running());
        assert_eq!(sim.model().top().unwrap().page().items().len(), 20);
    }

    #[test]
    fn popping_the_root_quits() {
        let (_sink, mut sim) =
            sim_with(Arc::new(FixtureSource::synthetic(5)), ParamBag::new());
        sim.init();
        sim.drain_tasks();
        sim.inject_event(Event::Key(KeyEvent::new(KeyCode::Escape)));
        assert!(!sim.is_running());
    }

    #[test]
    fn push_self_generates_distinct_instance_ids() {
        let (sink, mut sim) = sim_with(
            Arc::new(FixtureSource::synthetic(5)),
            ParamBag::new(),
        );
        sim.init();
        for _ in 0..3 {
            sim.inject_event(Event::tap("push-self-constructor"));
        }
        let ids: Vec<String> = sink
            .snapshot()
            .into_iter()
            .map(|s| s.instance_id)
            .collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids, ["run-1", "run-2", "run-3"]);
    }

    #[test]
    fn launch_params_instrument_the_root_screen() {
        let mut launch = ParamBag::new();
        launch.insert("scenario".to_owned(), "constructor".to_owned());
        launch.insert("instanceId".to_owned(), "boot-0".to_owned());
        let (sink, mut sim) =
            sim_with(Arc::new(FixtureSource::synthetic(5)), launch);
        sim.init();
        let samples = sink.snapshot();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].instance_id, "boot-0");
    }

    #[test]
    fn unknown_tap_is_ignored() {
        let (_sink, mut sim) =
            sim_with(Arc::new(FixtureSource::synthetic(5)), ParamBag::new());
        sim.init();
        sim.inject_event(Event::tap("character-list"));
        assert_eq!(sim.model().depth(), 1);
        assert!(sim.is_running());
    }
}
