use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::network::state::NetworkState;
use crate::network::topology::{NodeId, WeightId};

/// Which phase of the iteration a step belongs to.
///
/// Only `Update` steps may change `NetworkState::weights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Intro,
    Forward,
    Error,
    Backward,
    Update,
    Summary,
}

/// Diagram elements a step is about. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub nodes: &'static [NodeId],
    pub weights: &'static [WeightId],
}

impl Highlight {
    pub const NONE: Highlight = Highlight { nodes: &[], weights: &[] };
}

/// What a transition hands back: the next state plus a one-line rendering of
/// the arithmetic it performed. Later steps never read `result`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub state: NetworkState,
    pub result: String,
}

/// Pure state transition. Must be deterministic; reads of derived values
/// that are not there yet surface as `MissingDerivedValue`.
pub type Transition = fn(&NetworkState) -> Result<StepOutcome>;

/// A catalog entry: display metadata composed with a pure transition.
#[derive(Clone, Copy, Serialize)]
pub struct StepDefinition {
    pub title: &'static str,
    /// Prose; may embed inline TeX between `$` signs.
    pub explanation: &'static str,
    /// Display TeX, when the step has a formula worth showing.
    pub formula: Option<&'static str>,
    pub kind: StepKind,
    pub highlight: Highlight,
    #[serde(skip)]
    pub transition: Transition,
}

impl StepDefinition {
    pub fn apply(&self, state: &NetworkState) -> Result<StepOutcome> {
        (self.transition)(state)
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("highlight", &self.highlight)
            .finish_non_exhaustive()
    }
}
