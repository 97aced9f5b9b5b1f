pub mod fold;
pub mod sequencer;

pub use fold::{fold_up_to, Folded};
pub use sequencer::{Sequencer, Snapshot};
