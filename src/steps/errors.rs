//! Squared error per output unit and the total the backward pass minimises.

use crate::error::Result;
use crate::loss::SquaredError;
use crate::network::quantity::Quantity;
use crate::network::state::NetworkState;
use crate::steps::definition::StepOutcome;

fn unit_error(state: &NetworkState, target: f64, out: Quantity, error: Quantity) -> Result<StepOutcome> {
    let out_value = state.value(out)?;
    let e = SquaredError::loss(target, out_value);
    Ok(StepOutcome {
        state: state.with_derived([(error, e)]),
        result: format!("0.5 * ({target} - {out_value:.4})² = {e:.7}"),
    })
}

pub fn error_o1(state: &NetworkState) -> Result<StepOutcome> {
    unit_error(state, state.targets.o1, Quantity::OutO1, Quantity::ErrorO1)
}

pub fn error_o2(state: &NetworkState) -> Result<StepOutcome> {
    unit_error(state, state.targets.o2, Quantity::OutO2, Quantity::ErrorO2)
}

/// Also pins `initial_error`, the baseline the summary chart compares against.
pub fn error_total(state: &NetworkState) -> Result<StepOutcome> {
    let e_o1 = state.value(Quantity::ErrorO1)?;
    let e_o2 = state.value(Quantity::ErrorO2)?;
    let total = e_o1 + e_o2;
    Ok(StepOutcome {
        state: state.with_derived([
            (Quantity::ErrorTotal, total),
            (Quantity::InitialError, total),
        ]),
        result: format!("{e_o1:.4} + {e_o2:.4} = {total:.7}"),
    })
}
