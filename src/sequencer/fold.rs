use crate::error::{Result, WalkthroughError};
use crate::network::state::NetworkState;
use crate::steps::catalog::Catalog;

/// State reached after applying steps `0..=k`, plus the rendering of step `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Folded {
    pub state: NetworkState,
    pub result: String,
}

/// Replays the catalog from `initial` through step `k` inclusive.
///
/// Pure: the same `(catalog, initial, k)` always yields the same `Folded`.
pub fn fold_up_to(catalog: &Catalog, initial: &NetworkState, k: usize) -> Result<Folded> {
    let total = catalog.len();
    if k >= total {
        return Err(WalkthroughError::IndexOutOfRange { index: k, total });
    }

    let mut state = initial.clone();
    let mut result = String::new();
    for (index, step) in catalog.steps()[..=k].iter().enumerate() {
        let outcome = step.apply(&state).map_err(|e| {
            log::error!("step {index} ({}) failed: {e}", step.title);
            e
        })?;
        log::trace!("step {index} ({}): {}", step.title, outcome.result);
        state = outcome.state;
        result = outcome.result;
    }
    Ok(Folded { state, result })
}
