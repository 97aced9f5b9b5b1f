//! Closing step: re-run the forward pass with the updated weights.

use crate::activation::Sigmoid;
use crate::error::Result;
use crate::loss::SquaredError;
use crate::network::quantity::Quantity;
use crate::network::state::{Inputs, NetworkState, Targets, Weights};
use crate::steps::definition::StepOutcome;

/// Total squared error of one forward pass, without recording intermediates.
pub fn forward_error(w: &Weights, i: &Inputs, t: &Targets) -> f64 {
    let out_h1 = Sigmoid::function(w.w1 * i.i1 + w.w2 * i.i2 + w.b1);
    let out_h2 = Sigmoid::function(w.w3 * i.i1 + w.w4 * i.i2 + w.b1);
    let out_o1 = Sigmoid::function(w.w5 * out_h1 + w.w6 * out_h2 + w.b2);
    let out_o2 = Sigmoid::function(w.w7 * out_h1 + w.w8 * out_h2 + w.b2);
    SquaredError::total(&[(t.o1, out_o1), (t.o2, out_o2)])
}

pub fn error_after_update(state: &NetworkState) -> Result<StepOutcome> {
    let before = state.value(Quantity::InitialError)?;
    let after = forward_error(&state.weights, &state.inputs, &state.targets);
    Ok(StepOutcome {
        state: state.with_derived([(Quantity::ErrorTotalUpdated, after)]),
        result: format!(
            "E_total: {before:.9} → {after:.9} (down {:.9})",
            before - after
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_error_of_initial_weights() {
        let s = NetworkState::initial();
        let e = forward_error(&s.weights, &s.inputs, &s.targets);
        assert!((e - 0.298_371_109).abs() < 1e-8, "got {e}");
    }
}
