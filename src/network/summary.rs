use serde::Serialize;

use crate::network::quantity::Quantity;
use crate::network::state::NetworkState;

/// What the error chart plots: the total error before training and the
/// latest total error known at this point of the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorSummary {
    pub initial_error: Option<f64>,
    pub current_error: Option<f64>,
}

impl ErrorSummary {
    pub fn from_state(state: &NetworkState) -> ErrorSummary {
        let derived = &state.derived;
        ErrorSummary {
            initial_error: derived.try_get(Quantity::InitialError),
            current_error: derived
                .try_get(Quantity::ErrorTotalUpdated)
                .or_else(|| derived.try_get(Quantity::ErrorTotal)),
        }
    }

    /// `initial - current`, once both are known.
    pub fn reduction(&self) -> Option<f64> {
        Some(self.initial_error? - self.current_error?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_before_error_steps() {
        let summary = ErrorSummary::from_state(&NetworkState::initial());
        assert_eq!(summary.initial_error, None);
        assert_eq!(summary.current_error, None);
        assert_eq!(summary.reduction(), None);
    }

    #[test]
    fn prefers_updated_error() {
        let state = NetworkState::initial().with_derived([
            (Quantity::ErrorTotal, 0.3),
            (Quantity::InitialError, 0.3),
            (Quantity::ErrorTotalUpdated, 0.29),
        ]);
        let summary = ErrorSummary::from_state(&state);
        assert_eq!(summary.current_error, Some(0.29));
        assert!((summary.reduction().unwrap() - 0.01).abs() < 1e-12);
    }
}
