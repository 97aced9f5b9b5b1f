use once_cell::sync::Lazy;

use crate::network::topology::{NodeId, WeightId};
use crate::steps::backward;
use crate::steps::definition::{Highlight, StepDefinition, StepKind};
use crate::steps::errors;
use crate::steps::forward;
use crate::steps::summary;
use crate::steps::update;

/// The standard walkthrough, built once per process.
pub static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::standard);

/// An ordered, immutable list of steps.
///
/// Each transition may only read derived values produced by an earlier
/// entry. That ordering is a property of how the catalog is written; it is not
/// checked here, and a violation shows up as `MissingDerivedValue` when the
/// offending step runs.
#[derive(Debug, Clone)]
pub struct Catalog {
    steps: Vec<StepDefinition>,
}

impl Catalog {
    pub fn new(steps: Vec<StepDefinition>) -> Catalog {
        Catalog { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// One full iteration: setup, forward pass, error, backward pass, weight
    /// updates, and a second forward pass to show the error went down.
    pub fn standard() -> Catalog {
        use NodeId::*;

        let steps = vec![
            // ── Setup ─────────────────────────────────────────────────────
            StepDefinition {
                title: "The Setup",
                explanation: "A network with two inputs, two hidden units and two outputs. Every \
                    connection carries a weight and each of the hidden and output layers has a bias. \
                    The goal is to move the outputs for inputs (0.05, 0.10) towards the targets (0.01, 0.99).",
                formula: None,
                kind: StepKind::Intro,
                highlight: Highlight { nodes: &[I1, I2, H1, H2, O1, O2], weights: &[] },
                transition: forward::setup,
            },
            // ── Forward pass ──────────────────────────────────────────────
            StepDefinition {
                title: "Forward Pass: Net Input for h1",
                explanation: "The net input of $h_1$ is the weighted sum of the inputs plus the hidden-layer bias.",
                formula: Some(r"net_{h1} = w_1 \cdot i_1 + w_2 \cdot i_2 + b_1 \cdot 1"),
                kind: StepKind::Forward,
                highlight: Highlight { nodes: &[I1, I2, H1], weights: &[WeightId::W1, WeightId::W2] },
                transition: forward::net_h1,
            },
            StepDefinition {
                title: "Forward Pass: Output of h1",
                explanation: "The net input is squashed into (0, 1) by the logistic function.",
                formula: Some(r"out_{h1} = \frac{1}{1 + e^{-net_{h1}}}"),
                kind: StepKind::Forward,
                highlight: Highlight { nodes: &[H1], weights: &[] },
                transition: forward::out_h1,
            },
            StepDefinition {
                title: "Forward Pass: Net Input for h2",
                explanation: "Same weighted sum for the second hidden unit, $h_2$.",
                formula: Some(r"net_{h2} = w_3 \cdot i_1 + w_4 \cdot i_2 + b_1 \cdot 1"),
                kind: StepKind::Forward,
                highlight: Highlight { nodes: &[I1, I2, H2], weights: &[WeightId::W3, WeightId::W4] },
                transition: forward::net_h2,
            },
            StepDefinition {
                title: "Forward Pass: Output of h2",
                explanation: "And the same activation for $h_2$.",
                formula: Some(r"out_{h2} = \frac{1}{1 + e^{-net_{h2}}}"),
                kind: StepKind::Forward,
                highlight: Highlight { nodes: &[H2], weights: &[] },
                transition: forward::out_h2,
            },
            StepDefinition {
                title: "Forward Pass: Net Input for o1",
                explanation: "The output layer takes the hidden activations $out_{h1}$ and $out_{h2}$ as its inputs.",
                formula: Some(r"net_{o1} = w_5 \cdot out_{h1} + w_6 \cdot out_{h2} + b_2 \cdot 1"),
                kind: StepKind::Forward,
                highlight: Highlight { nodes: &[H1, H2, O1], weights: &[WeightId::W5, WeightId::W6] },
                transition: forward::net_o1,
            },
            StepDefinition {
                title: "Forward Pass: Output of o1",
                explanation: "The activation of $o_1$ is the network's first prediction.",
                formula: Some(r"out_{o1} = \frac{1}{1 + e^{-net_{o1}}}"),
                kind: StepKind::Forward,
                highlight: Highlight { nodes: &[O1], weights: &[] },
                transition: forward::out_o1,
            },
            StepDefinition {
                title: "Forward Pass: Net Input for o2",
                explanation: "Same again for the second output unit, $o_2$.",
                formula: Some(r"net_{o2} = w_7 \cdot out_{h1} + w_8 \cdot out_{h2} + b_2 \cdot 1"),
                kind: StepKind::Forward,
                highlight: Highlight { nodes: &[H1, H2, O2], weights: &[WeightId::W7, WeightId::W8] },
                transition: forward::net_o2,
            },
            StepDefinition {
                title: "Forward Pass: Output of o2",
                explanation: "The activation of $o_2$ is the second prediction.",
                formula: Some(r"out_{o2} = \frac{1}{1 + e^{-net_{o2}}}"),
                kind: StepKind::Forward,
                highlight: Highlight { nodes: &[O2], weights: &[] },
                transition: forward::out_o2,
            },
            // ── Error ─────────────────────────────────────────────────────
            StepDefinition {
                title: "Error Calculation: E_o1",
                explanation: "How far off is each prediction? Squared error, halved, for $o_1$ first.",
                formula: Some(r"E_{o1} = \frac{1}{2}(target_{o1} - out_{o1})^2"),
                kind: StepKind::Error,
                highlight: Highlight { nodes: &[O1], weights: &[] },
                transition: errors::error_o1,
            },
            StepDefinition {
                title: "Error Calculation: E_o2",
                explanation: "Then the error of $o_2$.",
                formula: Some(r"E_{o2} = \frac{1}{2}(target_{o2} - out_{o2})^2"),
                kind: StepKind::Error,
                highlight: Highlight { nodes: &[O2], weights: &[] },
                transition: errors::error_o2,
            },
            StepDefinition {
                title: "Error Calculation: Total Error",
                explanation: "The network's error is the sum over both outputs. This is the number training drives down.",
                formula: Some(r"E_{total} = E_{o1} + E_{o2}"),
                kind: StepKind::Error,
                highlight: Highlight { nodes: &[O1, O2], weights: &[] },
                transition: errors::error_total,
            },
            // ── Backward pass ─────────────────────────────────────────────
            StepDefinition {
                title: "Backward Pass: Gradient for w5",
                explanation: "The chain rule splits $\\partial E_{total} / \\partial w_5$ into three factors. The first two \
                    form the error term $\\delta_{o1}$, which every weight feeding $o_1$ reuses.",
                formula: Some(r"\frac{\partial E_{total}}{\partial w_5} = \frac{\partial E_{total}}{\partial out_{o1}} \cdot \frac{\partial out_{o1}}{\partial net_{o1}} \cdot \frac{\partial net_{o1}}{\partial w_5} = \delta_{o1} \cdot out_{h1}"),
                kind: StepKind::Backward,
                highlight: Highlight { nodes: &[O1, H1], weights: &[WeightId::W5] },
                transition: backward::gradient_w5,
            },
            StepDefinition {
                title: "Backward Pass: Gradients for w6, w7, w8",
                explanation: "The other output-layer weights follow the same pattern, using $\\delta_{o2}$ for the weights into $o_2$.",
                formula: Some(r"\frac{\partial E}{\partial w_6} = \delta_{o1} \cdot out_{h2} \quad \frac{\partial E}{\partial w_7} = \delta_{o2} \cdot out_{h1} \quad \frac{\partial E}{\partial w_8} = \delta_{o2} \cdot out_{h2}"),
                kind: StepKind::Backward,
                highlight: Highlight { nodes: &[H1, H2, O1, O2], weights: &[WeightId::W6, WeightId::W7, WeightId::W8] },
                transition: backward::gradients_w6_w7_w8,
            },
            StepDefinition {
                title: "Backward Pass: Error Term for h1",
                explanation: "$h_1$ feeds both outputs, so its share of the error is the sum of what flows back from \
                    $o_1$ and $o_2$, each weighted by the connecting weight, before multiplying by its own slope.",
                formula: Some(r"\delta_{h1} = (\delta_{o1} \cdot w_5 + \delta_{o2} \cdot w_7) \cdot out_{h1}(1 - out_{h1})"),
                kind: StepKind::Backward,
                highlight: Highlight { nodes: &[H1, O1, O2], weights: &[WeightId::W5, WeightId::W7] },
                transition: backward::delta_h1,
            },
            StepDefinition {
                title: "Backward Pass: Gradients for w1, w2",
                explanation: "A weight into $h_1$ gets $\\delta_{h1}$ times the input it carries.",
                formula: Some(r"\frac{\partial E}{\partial w_1} = \delta_{h1} \cdot i_1 \quad \frac{\partial E}{\partial w_2} = \delta_{h1} \cdot i_2"),
                kind: StepKind::Backward,
                highlight: Highlight { nodes: &[I1, I2, H1], weights: &[WeightId::W1, WeightId::W2] },
                transition: backward::gradients_w1_w2,
            },
            StepDefinition {
                title: "Backward Pass: Error Term for h2",
                explanation: "Same sum for $h_2$, through $w_6$ and $w_8$.",
                formula: Some(r"\delta_{h2} = (\delta_{o1} \cdot w_6 + \delta_{o2} \cdot w_8) \cdot out_{h2}(1 - out_{h2})"),
                kind: StepKind::Backward,
                highlight: Highlight { nodes: &[H2, O1, O2], weights: &[WeightId::W6, WeightId::W8] },
                transition: backward::delta_h2,
            },
            StepDefinition {
                title: "Backward Pass: Gradients for w3, w4",
                explanation: "And the weights into $h_2$.",
                formula: Some(r"\frac{\partial E}{\partial w_3} = \delta_{h2} \cdot i_1 \quad \frac{\partial E}{\partial w_4} = \delta_{h2} \cdot i_2"),
                kind: StepKind::Backward,
                highlight: Highlight { nodes: &[I1, I2, H2], weights: &[WeightId::W3, WeightId::W4] },
                transition: backward::gradients_w3_w4,
            },
            // ── Updates ───────────────────────────────────────────────────
            StepDefinition {
                title: "Update: w5",
                explanation: "Every gradient is known, so the weights can move. Each one steps against its gradient, \
                    scaled by the learning rate $\\eta$.",
                formula: Some(r"w_5^{new} = w_5 - \eta \cdot \frac{\partial E_{total}}{\partial w_5}"),
                kind: StepKind::Update,
                highlight: Highlight { nodes: &[], weights: &[WeightId::W5] },
                transition: update::update_w5,
            },
            StepDefinition {
                title: "Update: w6, w7, w8",
                explanation: "The rest of the output layer.",
                formula: Some(r"w_k^{new} = w_k - \eta \cdot \frac{\partial E_{total}}{\partial w_k}"),
                kind: StepKind::Update,
                highlight: Highlight { nodes: &[], weights: &[WeightId::W6, WeightId::W7, WeightId::W8] },
                transition: update::update_w6_w7_w8,
            },
            StepDefinition {
                title: "Update: w1, w2",
                explanation: "The hidden-layer weights use the gradients computed from the original output weights.",
                formula: Some(r"w_1^{new} = w_1 - \eta \cdot \delta_{h1} \cdot i_1 \quad w_2^{new} = w_2 - \eta \cdot \delta_{h1} \cdot i_2"),
                kind: StepKind::Update,
                highlight: Highlight { nodes: &[], weights: &[WeightId::W1, WeightId::W2] },
                transition: update::update_w1_w2,
            },
            StepDefinition {
                title: "Update: w3, w4",
                explanation: "The last two weights. One full training iteration is done.",
                formula: Some(r"w_3^{new} = w_3 - \eta \cdot \delta_{h2} \cdot i_1 \quad w_4^{new} = w_4 - \eta \cdot \delta_{h2} \cdot i_2"),
                kind: StepKind::Update,
                highlight: Highlight { nodes: &[], weights: &[WeightId::W3, WeightId::W4] },
                transition: update::update_w3_w4,
            },
            // ── Summary ───────────────────────────────────────────────────
            StepDefinition {
                title: "Summary: Error After One Iteration",
                explanation: "Running the forward pass again with the new weights gives a smaller total error. \
                    Training repeats this cycle, one epoch at a time, until the error is small enough.",
                formula: None,
                kind: StepKind::Summary,
                highlight: Highlight { nodes: &[O1, O2], weights: &[] },
                transition: summary::error_after_update,
            },
        ];

        Catalog::new(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_update_steps_name_no_nodes() {
        for step in CATALOG.steps() {
            if step.kind == StepKind::Update {
                assert!(step.highlight.nodes.is_empty(), "{}", step.title);
                assert!(!step.highlight.weights.is_empty(), "{}", step.title);
            }
        }
    }

    #[test]
    fn standard_catalog_shape() {
        assert_eq!(CATALOG.len(), 23);
        assert_eq!(CATALOG.get(0).map(|s| s.kind), Some(StepKind::Intro));
        assert_eq!(CATALOG.get(22).map(|s| s.kind), Some(StepKind::Summary));
        assert!(CATALOG.get(23).is_none());
    }
}
