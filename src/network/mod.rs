pub mod quantity;
pub mod state;
pub mod summary;
pub mod topology;

pub use quantity::{Derived, Quantity};
pub use state::{Inputs, NetworkState, Targets, Weights};
pub use summary::ErrorSummary;
pub use topology::{Edge, NodeId, WeightId, EDGES};
