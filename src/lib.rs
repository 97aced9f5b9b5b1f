pub mod activation;
pub mod config;
pub mod error;
pub mod loss;
pub mod network;
pub mod sequencer;
pub mod steps;

// Convenience re-exports
pub use activation::Sigmoid;
pub use config::{PreviousMode, WalkthroughConfig};
pub use error::{Result, WalkthroughError};
pub use loss::SquaredError;
pub use network::{ErrorSummary, NetworkState, NodeId, Quantity, WeightId};
pub use sequencer::{fold_up_to, Folded, Sequencer, Snapshot};
pub use steps::{Catalog, StepDefinition, StepKind, CATALOG};
