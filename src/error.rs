use thiserror::Error;

use crate::network::quantity::Quantity;

/// Everything the walkthrough core can fail with.
///
/// `IndexOutOfRange` and `MissingDerivedValue` are usage and catalog bugs
/// respectively; neither is retried. The remaining variants come from loading
/// scenario files.
#[derive(Debug, Error)]
pub enum WalkthroughError {
    #[error("step index {index} is out of range (catalog has {total} steps)")]
    IndexOutOfRange { index: usize, total: usize },

    #[error("derived value `{0}` has not been computed yet; the step catalog is out of order")]
    MissingDerivedValue(Quantity),

    #[error("step catalog is empty")]
    EmptyCatalog,

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WalkthroughError>;
