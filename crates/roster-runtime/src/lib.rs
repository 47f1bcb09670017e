#![forbid(unsafe_code)]

//! Minimal Elm-style runtime for roster screens.
//!
//! The runtime separates state ([`Model`]) from rendering ([`Frame`]) and
//! expresses every side effect as a command ([`Cmd`]). Two command kinds
//! carry single-shot deferred continuations:
//!
//! - [`Cmd::Task`] — background work (a catalog fetch) whose result
//!   resumes the model exactly once;
//! - [`Cmd::Settle`] — work registered at activation time that resumes
//!   once the activation transition has settled and the UI is
//!   interactive.
//!
//! [`ProgramSimulator`] executes models deterministically: continuations
//! are queued, never run inline, and drained explicitly, so tests can
//! observe every intermediate state (an in-flight fetch, an unsettled
//! activation) before resumption.

pub mod event;
pub mod frame;
pub mod program;
pub mod simulator;

pub use event::{Event, KeyCode, KeyEvent, Modifiers};
pub use frame::Frame;
pub use program::{Cmd, Model};
pub use simulator::{CmdRecord, ProgramSimulator};
