#![forbid(unsafe_code)]

//! Deterministic program simulator.
//!
//! `ProgramSimulator` runs a [`Model`] without any terminal or I/O
//! dependency, for test driving and for the end-to-end harness. Events
//! can be injected, messages sent directly, and frames captured as text.
//!
//! Unlike an interactive loop, [`Cmd::Task`] and [`Cmd::Settle`]
//! continuations are *queued*, not executed inline: [`drain_tasks`]
//! resumes pending background work and [`settle`] resumes pending settle
//! continuations, each exactly once, in FIFO order. That makes every
//! suspension point observable — a test can assert on the in-flight state
//! between issuing a fetch and resuming it.
//!
//! [`drain_tasks`]: ProgramSimulator::drain_tasks
//! [`settle`]: ProgramSimulator::settle

use std::collections::VecDeque;

use crate::event::Event;
use crate::frame::Frame;
use crate::program::{Cmd, Model};

/// Record of a command executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    /// No-op command.
    None,
    /// Quit command.
    Quit,
    /// Message dispatched to the model.
    Msg,
    /// Batch of commands.
    Batch(usize),
    /// Log line emitted.
    Log(String),
    /// Background task queued.
    TaskQueued,
    /// Background task resumed.
    TaskResumed,
    /// Settle continuation queued.
    SettleQueued,
    /// Settle continuation resumed.
    SettleResumed,
}

type Continuation<M> = Box<dyn FnOnce() -> M + Send>;

/// Deterministic driver for [`Model`] implementations.
pub struct ProgramSimulator<M: Model> {
    model: M,
    running: bool,
    pending_tasks: VecDeque<Continuation<M::Message>>,
    pending_settles: VecDeque<Continuation<M::Message>>,
    command_log: Vec<CmdRecord>,
    logs: Vec<String>,
    frames: Vec<String>,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a simulator; the model is not initialized until
    /// [`init`](Self::init) is called.
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            running: true,
            pending_tasks: VecDeque::new(),
            pending_settles: VecDeque::new(),
            command_log: Vec::new(),
            logs: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Call `Model::init()` and execute the returned commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Convert an event to a message and dispatch it through `update`.
    pub fn inject_event(&mut self, event: Event) {
        if !self.running {
            return;
        }
        let msg = M::Message::from(event);
        self.send(msg);
    }

    /// Dispatch a message through `update` and execute returned commands.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Resume every queued background task, in FIFO order, including
    /// tasks queued by the resumptions themselves. Returns the number of
    /// tasks resumed.
    pub fn drain_tasks(&mut self) -> usize {
        let mut resumed = 0;
        while self.running {
            let Some(task) = self.pending_tasks.pop_front() else {
                break;
            };
            resumed += 1;
            self.command_log.push(CmdRecord::TaskResumed);
            let msg = task();
            let cmd = self.model.update(msg);
            self.execute_cmd(cmd);
        }
        resumed
    }

    /// Resume every queued settle continuation, in FIFO order. Returns
    /// the number resumed.
    pub fn settle(&mut self) -> usize {
        let mut resumed = 0;
        while self.running {
            let Some(cont) = self.pending_settles.pop_front() else {
                break;
            };
            resumed += 1;
            self.command_log.push(CmdRecord::SettleResumed);
            let msg = cont();
            let cmd = self.model.update(msg);
            self.execute_cmd(cmd);
        }
        resumed
    }

    /// Number of tasks queued and not yet resumed.
    #[must_use]
    pub fn pending_task_count(&self) -> usize {
        self.pending_tasks.len()
    }

    /// Render the model at the given dimensions, keep the text, and
    /// return it.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> &str {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        self.frames.push(frame.text());
        self.frames.last().expect("frame just pushed")
    }

    /// All captured frames, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Get a reference to the model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Whether the program is still running (`false` after `Cmd::Quit`).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Log lines emitted via `Cmd::Log`.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// The command execution log.
    #[must_use]
    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {
                self.command_log.push(CmdRecord::None);
            }
            Cmd::Quit => {
                self.running = false;
                self.command_log.push(CmdRecord::Quit);
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Log(text) => {
                tracing::debug!(target: "roster_runtime::simulator", "{text}");
                self.command_log.push(CmdRecord::Log(text.clone()));
                self.logs.push(text);
            }
            Cmd::Task(f) => {
                self.command_log.push(CmdRecord::TaskQueued);
                self.pending_tasks.push_back(f);
            }
            Cmd::Settle(f) => {
                self.command_log.push(CmdRecord::SettleQueued);
                self.pending_settles.push_back(f);
            }
        }
    }
}
