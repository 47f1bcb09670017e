#![forbid(unsafe_code)]

//! Scenario selection and activation-parameter resolution.
//!
//! An activation may carry a `scenario` and an `instanceId`, either as
//! direct construction parameters or inside a route-parameter bag when the
//! screen was pushed by navigation. Resolution precedence is fixed: direct
//! parameters win, the route bag is the fallback, and anything else means
//! "absent". An absent or unrecognized scenario is the default
//! non-instrumented path, not an error.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A flat string key/value parameter map (direct params or a route bag).
pub type ParamBag = BTreeMap<String, String>;

/// Parameter key for the requested scenario.
pub const SCENARIO_KEY: &str = "scenario";
/// Parameter key for the sample correlation token.
pub const INSTANCE_ID_KEY: &str = "instanceId";

/// Named activation mode selecting which lifecycle phase, if any, should
/// produce a timing sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Sample at screen construction.
    Constructor,
    /// Sample after the activation transition settles.
    Appear,
    /// Sample on the first completed render pass.
    Render,
}

impl Scenario {
    /// All scenarios, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Constructor, Self::Appear, Self::Render];

    /// Stable wire/parameter name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::Appear => "appear",
            Self::Render => "render",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized scenario name. Callers treat this as "no scenario".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScenario(pub String);

impl fmt::Display for UnknownScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scenario {:?}", self.0)
    }
}

impl std::error::Error for UnknownScenario {}

impl FromStr for Scenario {
    type Err = UnknownScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constructor" => Ok(Self::Constructor),
            "appear" => Ok(Self::Appear),
            "render" => Ok(Self::Render),
            other => Err(UnknownScenario(other.to_owned())),
        }
    }
}

/// Resolved activation context, immutable for the activation's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationParams {
    /// Which phase to sample, if any.
    pub scenario: Option<Scenario>,
    /// Opaque correlation token for sample attribution.
    pub instance_id: Option<String>,
}

impl ActivationParams {
    /// Resolve from direct parameters and an optional route-parameter bag.
    ///
    /// Direct parameters take precedence key-by-key; the route bag fills
    /// the gaps. A scenario string that does not parse resolves to `None`.
    #[must_use]
    pub fn resolve(direct: &ParamBag, route: Option<&ParamBag>) -> Self {
        let lookup = |key: &str| {
            direct
                .get(key)
                .or_else(|| route.and_then(|bag| bag.get(key)))
                .cloned()
        };
        Self {
            scenario: lookup(SCENARIO_KEY).and_then(|s| s.parse().ok()),
            instance_id: lookup(INSTANCE_ID_KEY),
        }
    }

    /// Convenience constructor for a fully specified activation.
    #[must_use]
    pub fn new(scenario: Scenario, instance_id: impl Into<String>) -> Self {
        Self {
            scenario: Some(scenario),
            instance_id: Some(instance_id.into()),
        }
    }

    /// Build the route bag a navigation push would carry for these params.
    #[must_use]
    pub fn to_route_bag(&self) -> ParamBag {
        let mut bag = ParamBag::new();
        if let Some(scenario) = self.scenario {
            bag.insert(SCENARIO_KEY.to_owned(), scenario.as_str().to_owned());
        }
        if let Some(id) = &self.instance_id {
            bag.insert(INSTANCE_ID_KEY.to_owned(), id.clone());
        }
        bag
    }
}
