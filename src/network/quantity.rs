use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WalkthroughError};

/// Every scalar the step catalog can derive.
///
/// The set is closed: a step can only introduce one of these, and reading one
/// that no earlier step produced is a `MissingDerivedValue` error naming it.
/// The serialized form is the short key shown in the walkthrough (`net_h1`,
/// `E_total`, `dE_dw5`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quantity {
    #[serde(rename = "net_h1")] NetH1,
    #[serde(rename = "out_h1")] OutH1,
    #[serde(rename = "net_h2")] NetH2,
    #[serde(rename = "out_h2")] OutH2,
    #[serde(rename = "net_o1")] NetO1,
    #[serde(rename = "out_o1")] OutO1,
    #[serde(rename = "net_o2")] NetO2,
    #[serde(rename = "out_o2")] OutO2,
    #[serde(rename = "E_o1")] ErrorO1,
    #[serde(rename = "E_o2")] ErrorO2,
    #[serde(rename = "E_total")] ErrorTotal,
    /// Copy of `E_total` taken before any weight moves; the chart baseline.
    #[serde(rename = "initial_error")] InitialError,
    #[serde(rename = "delta_o1")] DeltaO1,
    #[serde(rename = "delta_o2")] DeltaO2,
    #[serde(rename = "dE_dw1")] GradW1,
    #[serde(rename = "dE_dw2")] GradW2,
    #[serde(rename = "dE_dw3")] GradW3,
    #[serde(rename = "dE_dw4")] GradW4,
    #[serde(rename = "dE_dw5")] GradW5,
    #[serde(rename = "dE_dw6")] GradW6,
    #[serde(rename = "dE_dw7")] GradW7,
    #[serde(rename = "dE_dw8")] GradW8,
    #[serde(rename = "delta_h1")] DeltaH1,
    #[serde(rename = "delta_h2")] DeltaH2,
    /// Total error of a second forward pass run with the updated weights.
    #[serde(rename = "E_total_updated")] ErrorTotalUpdated,
}

impl Quantity {
    pub const ALL: [Quantity; 25] = [
        Quantity::NetH1, Quantity::OutH1, Quantity::NetH2, Quantity::OutH2,
        Quantity::NetO1, Quantity::OutO1, Quantity::NetO2, Quantity::OutO2,
        Quantity::ErrorO1, Quantity::ErrorO2, Quantity::ErrorTotal, Quantity::InitialError,
        Quantity::DeltaO1, Quantity::DeltaO2,
        Quantity::GradW1, Quantity::GradW2, Quantity::GradW3, Quantity::GradW4,
        Quantity::GradW5, Quantity::GradW6, Quantity::GradW7, Quantity::GradW8,
        Quantity::DeltaH1, Quantity::DeltaH2, Quantity::ErrorTotalUpdated,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Quantity::NetH1 => "net_h1",
            Quantity::OutH1 => "out_h1",
            Quantity::NetH2 => "net_h2",
            Quantity::OutH2 => "out_h2",
            Quantity::NetO1 => "net_o1",
            Quantity::OutO1 => "out_o1",
            Quantity::NetO2 => "net_o2",
            Quantity::OutO2 => "out_o2",
            Quantity::ErrorO1 => "E_o1",
            Quantity::ErrorO2 => "E_o2",
            Quantity::ErrorTotal => "E_total",
            Quantity::InitialError => "initial_error",
            Quantity::DeltaO1 => "delta_o1",
            Quantity::DeltaO2 => "delta_o2",
            Quantity::GradW1 => "dE_dw1",
            Quantity::GradW2 => "dE_dw2",
            Quantity::GradW3 => "dE_dw3",
            Quantity::GradW4 => "dE_dw4",
            Quantity::GradW5 => "dE_dw5",
            Quantity::GradW6 => "dE_dw6",
            Quantity::GradW7 => "dE_dw7",
            Quantity::GradW8 => "dE_dw8",
            Quantity::DeltaH1 => "delta_h1",
            Quantity::DeltaH2 => "delta_h2",
            Quantity::ErrorTotalUpdated => "E_total_updated",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Scalars accumulated as the walkthrough advances.
///
/// Entries are inserted or overwritten, never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Derived(BTreeMap<Quantity, f64>);

impl Derived {
    pub fn new() -> Derived {
        Derived(BTreeMap::new())
    }

    /// Reads a value a previous step must have produced.
    pub fn get(&self, quantity: Quantity) -> Result<f64> {
        self.0
            .get(&quantity)
            .copied()
            .ok_or(WalkthroughError::MissingDerivedValue(quantity))
    }

    /// Like `get` but without the error, for display code that tolerates gaps.
    pub fn try_get(&self, quantity: Quantity) -> Option<f64> {
        self.0.get(&quantity).copied()
    }

    pub fn contains(&self, quantity: Quantity) -> bool {
        self.0.contains_key(&quantity)
    }

    pub fn insert(&mut self, quantity: Quantity, value: f64) {
        self.0.insert(quantity, value);
    }

    pub fn keys(&self) -> impl Iterator<Item = Quantity> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Quantity, f64)> + '_ {
        self.0.iter().map(|(q, v)| (*q, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_serialized_form_and_are_unique() {
        for q in Quantity::ALL {
            assert_eq!(serde_json::to_value(q).unwrap(), serde_json::json!(q.key()));
        }
        let mut keys: Vec<&str> = Quantity::ALL.iter().map(|q| q.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Quantity::ALL.len());
    }

    #[test]
    fn missing_value_names_the_key() {
        let derived = Derived::new();
        let err = derived.get(Quantity::NetH1).unwrap_err();
        assert!(matches!(err, WalkthroughError::MissingDerivedValue(Quantity::NetH1)));
        assert!(err.to_string().contains("net_h1"));
    }

    #[test]
    fn serializes_with_short_keys() {
        let mut derived = Derived::new();
        derived.insert(Quantity::ErrorTotal, 0.25);
        let json = serde_json::to_string(&derived).unwrap();
        assert_eq!(json, r#"{"E_total":0.25}"#);
        let back: Derived = serde_json::from_str(&json).unwrap();
        assert_eq!(back, derived);
    }
}
