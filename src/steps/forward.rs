//! Forward pass: net inputs and sigmoid activations, hidden layer first.

use crate::activation::Sigmoid;
use crate::error::Result;
use crate::network::quantity::Quantity;
use crate::network::state::NetworkState;
use crate::steps::definition::StepOutcome;

/// Intro step: nothing is computed.
pub fn setup(state: &NetworkState) -> Result<StepOutcome> {
    let i = &state.inputs;
    let t = &state.targets;
    Ok(StepOutcome {
        state: state.clone(),
        result: format!(
            "Inputs ({}, {}), targets ({}, {}), learning rate {}. Step forward to start the forward pass.",
            i.i1, i.i2, t.o1, t.o2, state.learning_rate
        ),
    })
}

/// What feeds a weighted sum: scenario inputs are shown exactly as given,
/// activations computed by earlier steps are rounded to 4 places.
#[derive(Clone, Copy)]
enum Operand {
    Given(f64),
    Computed(f64),
}

impl Operand {
    fn value(self) -> f64 {
        match self {
            Operand::Given(x) | Operand::Computed(x) => x,
        }
    }

    fn render(self) -> String {
        match self {
            Operand::Given(x) => format!("{x}"),
            Operand::Computed(x) => format!("{x:.4}"),
        }
    }
}

/// `net = wa * xa + wb * xb + bias`. Weights and bias print as given.
fn net_input(
    state: &NetworkState,
    target: Quantity,
    (wa, xa): (f64, Operand),
    (wb, xb): (f64, Operand),
    bias: f64,
) -> StepOutcome {
    let net = wa * xa.value() + wb * xb.value() + bias;
    StepOutcome {
        state: state.with_derived([(target, net)]),
        result: format!(
            "({wa} * {}) + ({wb} * {}) + {bias} = {net:.4}",
            xa.render(),
            xb.render(),
        ),
    }
}

fn activation(state: &NetworkState, net: Quantity, out: Quantity) -> Result<StepOutcome> {
    let net_value = state.value(net)?;
    let out_value = Sigmoid::function(net_value);
    Ok(StepOutcome {
        state: state.with_derived([(out, out_value)]),
        result: format!("1 / (1 + e^-{net_value:.4}) = {out_value:.7}"),
    })
}

pub fn net_h1(state: &NetworkState) -> Result<StepOutcome> {
    let w = &state.weights;
    let i = &state.inputs;
    Ok(net_input(state, Quantity::NetH1, (w.w1, Operand::Given(i.i1)), (w.w2, Operand::Given(i.i2)), w.b1))
}

pub fn out_h1(state: &NetworkState) -> Result<StepOutcome> {
    activation(state, Quantity::NetH1, Quantity::OutH1)
}

pub fn net_h2(state: &NetworkState) -> Result<StepOutcome> {
    let w = &state.weights;
    let i = &state.inputs;
    Ok(net_input(state, Quantity::NetH2, (w.w3, Operand::Given(i.i1)), (w.w4, Operand::Given(i.i2)), w.b1))
}

pub fn out_h2(state: &NetworkState) -> Result<StepOutcome> {
    activation(state, Quantity::NetH2, Quantity::OutH2)
}

pub fn net_o1(state: &NetworkState) -> Result<StepOutcome> {
    let w = &state.weights;
    let out_h1 = state.value(Quantity::OutH1)?;
    let out_h2 = state.value(Quantity::OutH2)?;
    Ok(net_input(state, Quantity::NetO1, (w.w5, Operand::Computed(out_h1)), (w.w6, Operand::Computed(out_h2)), w.b2))
}

pub fn out_o1(state: &NetworkState) -> Result<StepOutcome> {
    activation(state, Quantity::NetO1, Quantity::OutO1)
}

pub fn net_o2(state: &NetworkState) -> Result<StepOutcome> {
    let w = &state.weights;
    let out_h1 = state.value(Quantity::OutH1)?;
    let out_h2 = state.value(Quantity::OutH2)?;
    Ok(net_input(state, Quantity::NetO2, (w.w7, Operand::Computed(out_h1)), (w.w8, Operand::Computed(out_h2)), w.b2))
}

pub fn out_o2(state: &NetworkState) -> Result<StepOutcome> {
    activation(state, Quantity::NetO2, Quantity::OutO2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_h1_renders_operands() {
        let outcome = net_h1(&NetworkState::initial()).unwrap();
        assert_eq!(outcome.result, "(0.15 * 0.05) + (0.2 * 0.1) + 0.35 = 0.3775");
        let net = outcome.state.value(Quantity::NetH1).unwrap();
        assert!((net - 0.3775).abs() < 1e-12);
    }

    #[test]
    fn scenario_inputs_render_as_given() {
        let mut state = NetworkState::initial();
        state.inputs.i1 = 0.123;
        let outcome = net_h1(&state).unwrap();
        assert!(outcome.result.starts_with("(0.15 * 0.123) + (0.2 * 0.1) + 0.35 = "), "{}", outcome.result);
        let net = outcome.state.value(Quantity::NetH1).unwrap();
        assert!((net - (0.15 * 0.123 + 0.2 * 0.1 + 0.35)).abs() < 1e-15);
    }

    #[test]
    fn hidden_activations_render_rounded() {
        let state = NetworkState::initial()
            .with_derived([(Quantity::OutH1, 0.593_269_992), (Quantity::OutH2, 0.596_884_378)]);
        let outcome = net_o1(&state).unwrap();
        assert_eq!(outcome.result, "(0.4 * 0.5933) + (0.45 * 0.5969) + 0.6 = 1.1059");
    }

    #[test]
    fn activation_needs_its_net_input() {
        let err = out_h1(&NetworkState::initial()).unwrap_err();
        assert!(err.to_string().contains("net_h1"));
    }

    #[test]
    fn setup_is_identity() {
        let state = NetworkState::initial();
        assert_eq!(setup(&state).unwrap().state, state);
    }
}
