#![forbid(unsafe_code)]

//! Automation control ids.
//!
//! An external driver re-activates the instrumented screen by tapping the
//! `push-self-<scenario>` control. The controls are addressable whether
//! or not anything renders them; the driver only needs the id.

use roster_core::Scenario;

/// Prefix shared by every push-self control.
pub const PUSH_SELF_PREFIX: &str = "push-self-";

/// Control id that pushes a fresh activation with the given scenario.
#[must_use]
pub fn push_self_control(scenario: Scenario) -> String {
    format!("{PUSH_SELF_PREFIX}{scenario}")
}

/// Parse a tapped control id back into its scenario, if it is a
/// push-self control.
#[must_use]
pub fn parse_push_self(control: &str) -> Option<Scenario> {
    control.strip_prefix(PUSH_SELF_PREFIX)?.parse().ok()
}
