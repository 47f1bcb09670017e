#![forbid(unsafe_code)]

//! Screen container and navigation glue for the roster catalog.
//!
//! [`Router`] is the [`roster_runtime::Model`]: it owns a stack of
//! [`CatalogScreen`] activations, maps input to the top activation, and
//! routes deferred continuations (catalog fetches, settle callbacks) back
//! to the activation that issued them — dropping the ones whose
//! activation is gone.
//!
//! The automation surface lives in [`controls`]: one tappable
//! `push-self-<scenario>` control per scenario, which pushes a fresh
//! instrumented activation of the same screen.

pub mod controls;
pub mod router;
pub mod screen;

/// Name the catalog list screen reports in samples.
pub const CATALOG_LIST: &str = "CatalogList";

pub use router::{Router, RouterMsg};
pub use screen::{ActivationId, CatalogScreen, InputOutcome};
