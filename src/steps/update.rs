//! Gradient descent: `w_new = w_old - learning_rate * ∂E/∂w`.

use crate::error::Result;
use crate::network::quantity::Quantity;
use crate::network::state::NetworkState;
use crate::network::topology::WeightId;
use crate::steps::definition::StepOutcome;

fn descend(state: &NetworkState, updates: &[(WeightId, Quantity)]) -> Result<StepOutcome> {
    let lr = state.learning_rate;
    let mut moved = Vec::with_capacity(updates.len());
    let mut rendered = Vec::with_capacity(updates.len());
    for &(id, gradient) in updates {
        let old = state.weights.get(id);
        let grad = state.value(gradient)?;
        let new = old - lr * grad;
        rendered.push(format!("{id}: {old} - {lr} * {grad:.7} = {new:.7}"));
        moved.push((id, new));
    }
    Ok(StepOutcome {
        state: state.with_weights(moved),
        result: rendered.join("; "),
    })
}

pub fn update_w5(state: &NetworkState) -> Result<StepOutcome> {
    descend(state, &[(WeightId::W5, Quantity::GradW5)])
}

pub fn update_w6_w7_w8(state: &NetworkState) -> Result<StepOutcome> {
    descend(state, &[
        (WeightId::W6, Quantity::GradW6),
        (WeightId::W7, Quantity::GradW7),
        (WeightId::W8, Quantity::GradW8),
    ])
}

pub fn update_w1_w2(state: &NetworkState) -> Result<StepOutcome> {
    descend(state, &[(WeightId::W1, Quantity::GradW1), (WeightId::W2, Quantity::GradW2)])
}

pub fn update_w3_w4(state: &NetworkState) -> Result<StepOutcome> {
    descend(state, &[(WeightId::W3, Quantity::GradW3), (WeightId::W4, Quantity::GradW4)])
}
