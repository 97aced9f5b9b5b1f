//! Backward pass: error terms and gradients, computed against the weights
//! of the forward pass. No weight moves here.

use crate::activation::Sigmoid;
use crate::error::Result;
use crate::loss::SquaredError;
use crate::network::quantity::Quantity;
use crate::network::state::NetworkState;
use crate::steps::definition::StepOutcome;

/// `δ = ∂E/∂out · ∂out/∂net` for an output unit.
fn output_delta(state: &NetworkState, target: f64, out: Quantity) -> Result<f64> {
    let out_value = state.value(out)?;
    Ok(SquaredError::derivative(target, out_value) * Sigmoid::derivative_from_output(out_value))
}

/// Error term of a hidden unit: the downstream error terms weighted by the
/// connecting weights, summed over *both* outputs, times the unit's own slope.
fn hidden_delta(
    state: &NetworkState,
    out: Quantity,
    to_o1: f64,
    to_o2: f64,
) -> Result<(f64, f64, f64)> {
    let delta_o1 = state.value(Quantity::DeltaO1)?;
    let delta_o2 = state.value(Quantity::DeltaO2)?;
    let out_value = state.value(out)?;
    let de_dout = delta_o1 * to_o1 + delta_o2 * to_o2;
    let slope = Sigmoid::derivative_from_output(out_value);
    Ok((de_dout, slope, de_dout * slope))
}

pub fn gradient_w5(state: &NetworkState) -> Result<StepOutcome> {
    let out_o1 = state.value(Quantity::OutO1)?;
    let out_h1 = state.value(Quantity::OutH1)?;
    let target = state.targets.o1;
    let delta_o1 = output_delta(state, target, Quantity::OutO1)?;
    let grad = delta_o1 * out_h1;
    Ok(StepOutcome {
        state: state.with_derived([(Quantity::DeltaO1, delta_o1), (Quantity::GradW5, grad)]),
        result: format!(
            "({out_o1:.4} - {target}) * {slope:.4} * {out_h1:.4} = {grad:.7}",
            slope = Sigmoid::derivative_from_output(out_o1),
        ),
    })
}

pub fn gradients_w6_w7_w8(state: &NetworkState) -> Result<StepOutcome> {
    let delta_o1 = state.value(Quantity::DeltaO1)?;
    let out_h1 = state.value(Quantity::OutH1)?;
    let out_h2 = state.value(Quantity::OutH2)?;
    let delta_o2 = output_delta(state, state.targets.o2, Quantity::OutO2)?;

    let grad_w6 = delta_o1 * out_h2;
    let grad_w7 = delta_o2 * out_h1;
    let grad_w8 = delta_o2 * out_h2;
    Ok(StepOutcome {
        state: state.with_derived([
            (Quantity::DeltaO2, delta_o2),
            (Quantity::GradW6, grad_w6),
            (Quantity::GradW7, grad_w7),
            (Quantity::GradW8, grad_w8),
        ]),
        result: format!(
            "δo2 = {delta_o2:.7}; ∂E/∂w6 = {grad_w6:.7}, ∂E/∂w7 = {grad_w7:.7}, ∂E/∂w8 = {grad_w8:.7}"
        ),
    })
}

pub fn delta_h1(state: &NetworkState) -> Result<StepOutcome> {
    let w = &state.weights;
    let (de_dout, slope, delta) = hidden_delta(state, Quantity::OutH1, w.w5, w.w7)?;
    Ok(StepOutcome {
        state: state.with_derived([(Quantity::DeltaH1, delta)]),
        result: format!("(δo1 * {} + δo2 * {}) * {slope:.4} = {de_dout:.7} * {slope:.4} = {delta:.7}", w.w5, w.w7),
    })
}

pub fn gradients_w1_w2(state: &NetworkState) -> Result<StepOutcome> {
    let delta = state.value(Quantity::DeltaH1)?;
    let i = &state.inputs;
    let grad_w1 = delta * i.i1;
    let grad_w2 = delta * i.i2;
    Ok(StepOutcome {
        state: state.with_derived([(Quantity::GradW1, grad_w1), (Quantity::GradW2, grad_w2)]),
        result: format!(
            "∂E/∂w1 = {delta:.7} * {} = {grad_w1:.9}, ∂E/∂w2 = {delta:.7} * {} = {grad_w2:.9}",
            i.i1, i.i2
        ),
    })
}

pub fn delta_h2(state: &NetworkState) -> Result<StepOutcome> {
    let w = &state.weights;
    let (de_dout, slope, delta) = hidden_delta(state, Quantity::OutH2, w.w6, w.w8)?;
    Ok(StepOutcome {
        state: state.with_derived([(Quantity::DeltaH2, delta)]),
        result: format!("(δo1 * {} + δo2 * {}) * {slope:.4} = {de_dout:.7} * {slope:.4} = {delta:.7}", w.w6, w.w8),
    })
}

pub fn gradients_w3_w4(state: &NetworkState) -> Result<StepOutcome> {
    let delta = state.value(Quantity::DeltaH2)?;
    let i = &state.inputs;
    let grad_w3 = delta * i.i1;
    let grad_w4 = delta * i.i2;
    Ok(StepOutcome {
        state: state.with_derived([(Quantity::GradW3, grad_w3), (Quantity::GradW4, grad_w4)]),
        result: format!(
            "∂E/∂w3 = {delta:.7} * {} = {grad_w3:.9}, ∂E/∂w4 = {delta:.7} * {} = {grad_w4:.9}",
            i.i1, i.i2
        ),
    })
}
