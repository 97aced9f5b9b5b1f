use std::sync::{Arc, Mutex};

use backprop_walkthrough::Sequencer;

// ---------------------------------------------------------------------------
// Flash messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum FlashKind { Info, Error }

#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

impl FlashMessage {
    pub fn info(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Info, text: text.into() }
    }
    pub fn error(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Error, text: text.into() }
    }
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

/// One walkthrough session. The server owns exactly one; every request goes
/// through the mutex, so moves are applied one at a time.
pub struct StudioState {
    pub sequencer: Sequencer<'static>,
    /// One-shot flash message for the next page render.
    pub flash:     Option<FlashMessage>,
}

impl StudioState {
    pub fn new(sequencer: Sequencer<'static>) -> Self {
        StudioState { sequencer, flash: None }
    }

    /// Takes and returns the current flash message, clearing it.
    pub fn take_flash(&mut self) -> Option<FlashMessage> {
        self.flash.take()
    }
}

/// Shared state type: an `Arc<Mutex<StudioState>>` passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;
