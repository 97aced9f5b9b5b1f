pub mod backward;
pub mod catalog;
pub mod definition;
pub mod errors;
pub mod forward;
pub mod summary;
pub mod update;

pub use catalog::{Catalog, CATALOG};
pub use definition::{Highlight, StepDefinition, StepKind, StepOutcome, Transition};
