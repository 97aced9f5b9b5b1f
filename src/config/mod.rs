pub mod walkthrough_config;

pub use walkthrough_config::{PreviousMode, WalkthroughConfig};
