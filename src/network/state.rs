use serde::{Deserialize, Serialize};

use crate::error::{Result, WalkthroughError};
use crate::network::quantity::{Derived, Quantity};
use crate::network::topology::WeightId;

/// Trainable parameters of the 2-2-2 network.
///
/// Fields:
/// - `w1..w4`: input → hidden (`w1`, `w2` feed `h1`; `w3`, `w4` feed `h2`)
/// - `w5..w8`: hidden → output (`w5`, `w6` feed `o1`; `w7`, `w8` feed `o2`)
/// - `b1`    : bias weight shared by both hidden units
/// - `b2`    : bias weight shared by both output units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub w1: f64,
    pub w2: f64,
    pub w3: f64,
    pub w4: f64,
    pub w5: f64,
    pub w6: f64,
    pub w7: f64,
    pub w8: f64,
    pub b1: f64,
    pub b2: f64,
}

impl Weights {
    pub fn get(&self, id: WeightId) -> f64 {
        match id {
            WeightId::W1 => self.w1,
            WeightId::W2 => self.w2,
            WeightId::W3 => self.w3,
            WeightId::W4 => self.w4,
            WeightId::W5 => self.w5,
            WeightId::W6 => self.w6,
            WeightId::W7 => self.w7,
            WeightId::W8 => self.w8,
            WeightId::B1 => self.b1,
            WeightId::B2 => self.b2,
        }
    }

    /// Returns a copy with `id` replaced by `value`.
    pub fn with(mut self, id: WeightId, value: f64) -> Weights {
        let slot = match id {
            WeightId::W1 => &mut self.w1,
            WeightId::W2 => &mut self.w2,
            WeightId::W3 => &mut self.w3,
            WeightId::W4 => &mut self.w4,
            WeightId::W5 => &mut self.w5,
            WeightId::W6 => &mut self.w6,
            WeightId::W7 => &mut self.w7,
            WeightId::W8 => &mut self.w8,
            WeightId::B1 => &mut self.b1,
            WeightId::B2 => &mut self.b2,
        };
        *slot = value;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub i1: f64,
    pub i2: f64,
}

/// Desired activations of `o1` and `o2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub o1: f64,
    pub o2: f64,
}

/// The numeric state of the walkthrough after some prefix of the catalog.
///
/// A value is never mutated once built: transitions produce a fresh state via
/// [`NetworkState::with_derived`] and [`NetworkState::with_weights`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkState {
    pub weights: Weights,
    pub inputs: Inputs,
    pub targets: Targets,
    pub learning_rate: f64,
    #[serde(default)]
    pub derived: Derived,
}

impl NetworkState {
    /// The classic worked example: inputs (0.05, 0.10), targets (0.01, 0.99),
    /// learning rate 0.5.
    pub fn initial() -> NetworkState {
        NetworkState {
            weights: Weights {
                w1: 0.15, w2: 0.20, w3: 0.25, w4: 0.30,
                w5: 0.40, w6: 0.45, w7: 0.50, w8: 0.55,
                b1: 0.35, b2: 0.60,
            },
            inputs: Inputs { i1: 0.05, i2: 0.10 },
            targets: Targets { o1: 0.01, o2: 0.99 },
            learning_rate: 0.5,
            derived: Derived::new(),
        }
    }

    /// Shorthand for `self.derived.get(quantity)`.
    pub fn value(&self, quantity: Quantity) -> Result<f64> {
        self.derived.get(quantity)
    }

    /// New state with the given derived values added (or overwritten).
    pub fn with_derived<I>(&self, values: I) -> NetworkState
    where
        I: IntoIterator<Item = (Quantity, f64)>,
    {
        let mut next = self.clone();
        for (quantity, value) in values {
            next.derived.insert(quantity, value);
        }
        next
    }

    /// New state with the given weights replaced.
    pub fn with_weights<I>(&self, values: I) -> NetworkState
    where
        I: IntoIterator<Item = (WeightId, f64)>,
    {
        let mut next = self.clone();
        for (id, value) in values {
            next.weights = next.weights.with(id, value);
        }
        next
    }

    /// Checks that a state is usable as the starting point of a walkthrough.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(WalkthroughError::InvalidScenario(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        let named = WeightId::ALL
            .iter()
            .map(|&id| (id.as_str(), self.weights.get(id)))
            .chain([
                ("i1", self.inputs.i1),
                ("i2", self.inputs.i2),
                ("o1", self.targets.o1),
                ("o2", self.targets.o2),
            ]);
        for (name, value) in named {
            if !value.is_finite() {
                return Err(WalkthroughError::InvalidScenario(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if !self.derived.is_empty() {
            return Err(WalkthroughError::InvalidScenario(
                "a starting state must not carry derived values".into(),
            ));
        }
        Ok(())
    }

    /// Serializes the state to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Loads and validates a scenario previously written by `save_json`
    /// (or by hand; `derived` may be omitted).
    pub fn load_json(path: &str) -> Result<NetworkState> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let state: NetworkState = serde_json::from_reader(reader)?;
        state.validate()?;
        log::info!("loaded scenario from {path}");
        Ok(state)
    }
}

impl Default for NetworkState {
    fn default() -> Self {
        NetworkState::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_weights_leaves_original_untouched() {
        let base = NetworkState::initial();
        let moved = base.with_weights([(WeightId::W5, 0.1), (WeightId::B2, 0.0)]);
        assert_eq!(base.weights.w5, 0.40);
        assert_eq!(moved.weights.w5, 0.1);
        assert_eq!(moved.weights.b2, 0.0);
        assert_eq!(moved.weights.w6, base.weights.w6);
    }

    #[test]
    fn with_derived_overwrites() {
        let state = NetworkState::initial()
            .with_derived([(Quantity::NetH1, 1.0)])
            .with_derived([(Quantity::NetH1, 2.0)]);
        assert_eq!(state.value(Quantity::NetH1).unwrap(), 2.0);
        assert_eq!(state.derived.len(), 1);
    }

    #[test]
    fn initial_state_is_valid() {
        NetworkState::initial().validate().unwrap();
    }

    #[test]
    fn rejects_non_positive_learning_rate() {
        let mut state = NetworkState::initial();
        state.learning_rate = 0.0;
        assert!(matches!(state.validate(), Err(WalkthroughError::InvalidScenario(_))));
        state.learning_rate = f64::NAN;
        assert!(state.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_weights_and_carried_values() {
        let state = NetworkState::initial().with_weights([(WeightId::W3, f64::INFINITY)]);
        let err = state.validate().unwrap_err();
        assert!(err.to_string().contains("w3"));

        let state = NetworkState::initial().with_derived([(Quantity::OutH1, 0.5)]);
        assert!(state.validate().is_err());
    }

    #[test]
    fn deserializes_without_derived() {
        let json = r#"{
            "weights": {"w1":0.1,"w2":0.2,"w3":0.3,"w4":0.4,"w5":0.5,"w6":0.6,"w7":0.7,"w8":0.8,"b1":0.0,"b2":0.0},
            "inputs": {"i1": 1.0, "i2": 0.0},
            "targets": {"o1": 0.0, "o2": 1.0},
            "learning_rate": 0.1
        }"#;
        let state: NetworkState = serde_json::from_str(json).unwrap();
        assert!(state.derived.is_empty());
        assert_eq!(state.weights.w8, 0.8);
        state.validate().unwrap();
    }
}
