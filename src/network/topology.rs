use std::fmt;

use serde::{Deserialize, Serialize};

/// Units of the fixed 2-2-2 network, bias units included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeId {
    I1,
    I2,
    H1,
    H2,
    O1,
    O2,
    /// Constant-1 unit feeding the hidden layer.
    B1,
    /// Constant-1 unit feeding the output layer.
    B2,
}

/// Trainable parameters. `B1` and `B2` are the per-layer bias weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightId {
    W1,
    W2,
    W3,
    W4,
    W5,
    W6,
    W7,
    W8,
    B1,
    B2,
}

impl NodeId {
    pub const ALL: [NodeId; 8] = [
        NodeId::I1, NodeId::I2, NodeId::H1, NodeId::H2,
        NodeId::O1, NodeId::O2, NodeId::B1, NodeId::B2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeId::I1 => "i1",
            NodeId::I2 => "i2",
            NodeId::H1 => "h1",
            NodeId::H2 => "h2",
            NodeId::O1 => "o1",
            NodeId::O2 => "o2",
            NodeId::B1 => "b1",
            NodeId::B2 => "b2",
        }
    }

    /// Column of the diagram the node sits in (0 = inputs, 2 = outputs).
    pub fn layer(self) -> usize {
        match self {
            NodeId::I1 | NodeId::I2 | NodeId::B1 => 0,
            NodeId::H1 | NodeId::H2 | NodeId::B2 => 1,
            NodeId::O1 | NodeId::O2 => 2,
        }
    }
}

impl WeightId {
    pub const ALL: [WeightId; 10] = [
        WeightId::W1, WeightId::W2, WeightId::W3, WeightId::W4,
        WeightId::W5, WeightId::W6, WeightId::W7, WeightId::W8,
        WeightId::B1, WeightId::B2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WeightId::W1 => "w1",
            WeightId::W2 => "w2",
            WeightId::W3 => "w3",
            WeightId::W4 => "w4",
            WeightId::W5 => "w5",
            WeightId::W6 => "w6",
            WeightId::W7 => "w7",
            WeightId::W8 => "w8",
            WeightId::B1 => "b1",
            WeightId::B2 => "b2",
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WeightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One connection of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: WeightId,
}

const fn edge(from: NodeId, to: NodeId, weight: WeightId) -> Edge {
    Edge { from, to, weight }
}

/// Every connection of the network. Bias weights are shared per layer, so
/// `b1` and `b2` each label two edges.
pub const EDGES: [Edge; 12] = [
    edge(NodeId::I1, NodeId::H1, WeightId::W1),
    edge(NodeId::I2, NodeId::H1, WeightId::W2),
    edge(NodeId::I1, NodeId::H2, WeightId::W3),
    edge(NodeId::I2, NodeId::H2, WeightId::W4),
    edge(NodeId::H1, NodeId::O1, WeightId::W5),
    edge(NodeId::H2, NodeId::O1, WeightId::W6),
    edge(NodeId::H1, NodeId::O2, WeightId::W7),
    edge(NodeId::H2, NodeId::O2, WeightId::W8),
    edge(NodeId::B1, NodeId::H1, WeightId::B1),
    edge(NodeId::B1, NodeId::H2, WeightId::B1),
    edge(NodeId::B2, NodeId::O1, WeightId::B2),
    edge(NodeId::B2, NodeId::O2, WeightId::B2),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_weight_labels_an_edge() {
        for w in WeightId::ALL {
            assert!(EDGES.iter().any(|e| e.weight == w), "{w} has no edge");
        }
    }

    #[test]
    fn edges_only_move_forward() {
        for e in EDGES.iter() {
            assert!(e.from.layer() < e.to.layer(), "{:?}", e);
        }
    }
}
