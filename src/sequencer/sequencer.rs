use serde::Serialize;

use crate::config::walkthrough_config::{PreviousMode, WalkthroughConfig};
use crate::error::{Result, WalkthroughError};
use crate::network::state::NetworkState;
use crate::network::summary::ErrorSummary;
use crate::sequencer::fold::fold_up_to;
use crate::steps::catalog::Catalog;
use crate::steps::definition::StepDefinition;

/// `(index, state)` after a move, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub index: usize,
    pub total_steps: usize,
    pub state: NetworkState,
}

/// Caller-owned cursor over a catalog.
///
/// Index and state are always replaced together, and a failed move leaves both
/// untouched. Independent walkthroughs need independent sequencers; nothing is
/// shared between instances.
#[derive(Debug, Clone)]
pub struct Sequencer<'c> {
    catalog: &'c Catalog,
    initial: NetworkState,
    previous_mode: PreviousMode,
    index: usize,
    state: NetworkState,
    result: String,
}

impl<'c> Sequencer<'c> {
    /// Starts at step 0 holding the initial state as is; step 0 is not applied.
    ///
    /// Fails if the starting state is invalid or step 0 cannot run against it.
    pub fn new(catalog: &'c Catalog, config: WalkthroughConfig) -> Result<Sequencer<'c>> {
        if catalog.is_empty() {
            return Err(WalkthroughError::EmptyCatalog);
        }
        let WalkthroughConfig { initial_state, previous_mode } = config;
        initial_state.validate()?;
        if previous_mode == PreviousMode::ViewOnly {
            log::warn!("previous() will not roll numeric state back (view-only mode)");
        }
        let mut sequencer = Sequencer {
            catalog,
            initial: initial_state.clone(),
            previous_mode,
            index: 0,
            state: initial_state,
            result: String::new(),
        };
        sequencer.result = sequencer.render_initial()?;
        Ok(sequencer)
    }

    /// Advances one step by applying the next transition to the current state.
    /// No-op on the last step.
    pub fn next(&mut self) -> Result<Snapshot> {
        if self.index + 1 >= self.catalog.len() {
            log::debug!("next(): already at last step {}", self.index);
            return Ok(self.snapshot());
        }
        let target = self.index + 1;
        let step = self.step_at(target)?;
        let outcome = step.apply(&self.state)?;
        log::debug!("next(): {} -> {target} ({})", self.index, step.title);
        self.index = target;
        self.state = outcome.state;
        self.result = outcome.result;
        Ok(self.snapshot())
    }

    /// Moves back one step. No-op on step 0.
    ///
    /// With [`PreviousMode::Recompute`] this is `jump_to(index - 1)`. With
    /// [`PreviousMode::ViewOnly`] only the displayed step changes; weights and
    /// derived values keep whatever later steps produced.
    pub fn previous(&mut self) -> Result<Snapshot> {
        if self.index == 0 {
            log::debug!("previous(): already at step 0");
            return Ok(self.snapshot());
        }
        let target = self.index - 1;
        match self.previous_mode {
            PreviousMode::Recompute => self.jump_to(target),
            PreviousMode::ViewOnly => {
                let folded = fold_up_to(self.catalog, &self.initial, target)?;
                log::debug!("previous(): {} -> {target} (view only)", self.index);
                self.index = target;
                self.result = folded.result;
                Ok(self.snapshot())
            }
        }
    }

    /// Rebuilds the state for `target` by folding from the initial state.
    pub fn jump_to(&mut self, target: usize) -> Result<Snapshot> {
        let total = self.catalog.len();
        if target >= total {
            log::warn!("jump_to({target}) rejected: catalog has {total} steps");
            return Err(WalkthroughError::IndexOutOfRange { index: target, total });
        }
        let folded = fold_up_to(self.catalog, &self.initial, target)?;
        log::debug!("jump_to(): {} -> {target}", self.index);
        self.index = target;
        self.state = folded.state;
        self.result = folded.result;
        Ok(self.snapshot())
    }

    /// Back to step 0 with the stored initial state, without running step 0.
    pub fn reset(&mut self) -> Result<Snapshot> {
        let result = self.render_initial()?;
        log::debug!("reset(): {} -> 0", self.index);
        self.index = 0;
        self.state = self.initial.clone();
        self.result = result;
        Ok(self.snapshot())
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.catalog.steps()[self.index]
    }

    pub fn current_state(&self) -> &NetworkState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn total_steps(&self) -> usize {
        self.catalog.len()
    }

    /// Rendering of the arithmetic behind the displayed step.
    pub fn current_result(&self) -> &str {
        &self.result
    }

    pub fn initial_state(&self) -> &NetworkState {
        &self.initial
    }

    pub fn previous_mode(&self) -> PreviousMode {
        self.previous_mode
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.catalog.len()
    }

    pub fn error_summary(&self) -> ErrorSummary {
        ErrorSummary::from_state(&self.state)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            index: self.index,
            total_steps: self.catalog.len(),
            state: self.state.clone(),
        }
    }

    fn step_at(&self, index: usize) -> Result<&'c StepDefinition> {
        self.catalog.get(index).ok_or(WalkthroughError::IndexOutOfRange {
            index,
            total: self.catalog.len(),
        })
    }

    /// Step 0's text for display. The state it returns is discarded so the
    /// stored initial constant stays authoritative.
    fn render_initial(&self) -> Result<String> {
        let outcome = self.catalog.steps()[0].apply(&self.initial).map_err(|e| {
            log::error!("step 0 ({}) failed: {e}", self.catalog.steps()[0].title);
            e
        })?;
        Ok(outcome.result)
    }
}
