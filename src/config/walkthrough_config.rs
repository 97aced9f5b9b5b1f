use serde::{Deserialize, Serialize};

use crate::network::state::NetworkState;

/// How `Sequencer::previous` treats numeric state.
///
/// - `Recompute`: replay the catalog up to the previous step, so weights and
///   derived values are exactly what they were there. Default.
/// - `ViewOnly` : only move the displayed step back; later weight updates
///   stay applied. Kept for parity with walkthroughs that behave this way, at
///   the cost of `jump_to(k)` and `previous()` disagreeing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviousMode {
    #[default]
    Recompute,
    ViewOnly,
}

/// Settings a `Sequencer` is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkthroughConfig {
    pub initial_state: NetworkState,
    pub previous_mode: PreviousMode,
}

impl WalkthroughConfig {
    pub fn new(initial_state: NetworkState) -> Self {
        WalkthroughConfig { initial_state, previous_mode: PreviousMode::default() }
    }

    pub fn with_previous_mode(mut self, previous_mode: PreviousMode) -> Self {
        self.previous_mode = previous_mode;
        self
    }
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        WalkthroughConfig::new(NetworkState::initial())
    }
}
