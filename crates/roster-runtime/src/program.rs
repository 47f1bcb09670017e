#![forbid(unsafe_code)]

//! Model/Cmd contract.
//!
//! The model owns state, `update` is the only state transition, and side
//! effects travel outward as [`Cmd`] values. The runtime (here, the
//! simulator) executes commands and feeds resulting messages back through
//! `update` — one cooperative sequential context, no locks.

use crate::event::Event;
use crate::frame::Frame;

/// Application state and behavior.
pub trait Model: Sized {
    /// The message type for this model. Must be convertible from input
    /// events so a driver can inject them directly.
    type Message: From<Event> + Send + 'static;

    /// Initialize the model with startup commands.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message, returning commands for
    /// any side effects.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state into a frame.
    fn view(&self, frame: &mut Frame);
}

/// Side effects returned from `init()` and `update()`.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Quit the program.
    Quit,
    /// Execute multiple commands sequentially.
    Batch(Vec<Cmd<M>>),
    /// Send a message back to the model.
    Msg(M),
    /// Emit a log line through the runtime.
    Log(String),
    /// A single-shot deferred continuation for background work.
    ///
    /// The closure runs off the update path and its message resumes the
    /// model exactly once. The model must tolerate the resumption
    /// arriving after the originating state is gone.
    Task(Box<dyn FnOnce() -> M + Send>),
    /// A single-shot continuation resumed after the current activation
    /// transition settles and the UI is interactive.
    Settle(Box<dyn FnOnce() -> M + Send>),
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[inline]
    #[must_use]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    #[must_use]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Create a log command. A newline is appended on output if missing.
    #[inline]
    #[must_use]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    /// Create a batch of commands, collapsing trivial cases.
    #[must_use]
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Self::None))
            .collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    /// Create a background task command.
    #[must_use]
    pub fn task<F>(f: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Task(Box::new(f))
    }

    /// Create a settle continuation command.
    #[must_use]
    pub fn settle<F>(f: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Settle(Box::new(f))
    }

    /// Stable name for tracing.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::Batch(_) => "Batch",
            Self::Msg(_) => "Msg",
            Self::Log(_) => "Log",
            Self::Task(_) => "Task",
            Self::Settle(_) => "Settle",
        }
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Log(s) => f.debug_tuple("Log").field(s).finish(),
            Self::Task(_) => write!(f, "Task"),
            Self::Settle(_) => write!(f, "Settle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_collapses_empty_and_singleton() {
        assert!(matches!(Cmd::<u8>::batch(vec![]), Cmd::None));
        assert!(matches!(Cmd::batch(vec![Cmd::msg(1u8)]), Cmd::Msg(1)));
        assert!(matches!(
            Cmd::batch(vec![Cmd::none(), Cmd::msg(1u8)]),
            Cmd::Msg(1)
        ));
    }

    #[test]
    fn batch_keeps_multiple() {
        let cmd = Cmd::batch(vec![Cmd::msg(1u8), Cmd::msg(2u8)]);
        match cmd {
            Cmd::Batch(cmds) => assert_eq!(cmds.len(), 2),
            other => panic!("expected Batch, got {}", other.type_name()),
        }
    }

    #[test]
    fn type_names_are_stable() {
        assert_eq!(Cmd::<u8>::task(|| 1).type_name(), "Task");
        assert_eq!(Cmd::<u8>::settle(|| 1).type_name(), "Settle");
    }
}
