//! Presentation-side state and the queue that feeds it.
//!
//! The pipeline itself never touches the display. Results flow through
//! [`EventSource`] into an [`UpdateLoop`], which owns the [`DisplayState`].

mod queue;
mod state;

pub use queue::{
    DisplayCommand, EventSource, QueueError, RecognitionEvent, UpdateLoop, channel,
};
pub use state::DisplayState;
