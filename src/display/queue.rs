//! Serialized delivery of recognition results to the display.
//!
//! Recognizers report guesses from whatever thread they run on. Each guess is
//! queued as a [`DisplayCommand`] and a single [`UpdateLoop`] turns them into
//! display updates one at a time, in the order they were submitted.

use std::sync::Arc;

use flume::{Receiver, Sender, TryRecvError, TrySendError};
use thiserror::Error;
use tracing::{debug, trace};

use super::state::DisplayState;
use crate::config::Config;
use crate::pipeline::process_with;

/// One guess from the recognition subsystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecognitionEvent {
    pub raw_text: String,
    /// Whether any stroke currently exists on the capture surface.
    pub has_ink: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayCommand {
    Recognized(RecognitionEvent),
    /// The user cleared the canvas.
    Clear,
}

/// Why a command was not queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The [`UpdateLoop`] is gone.
    #[error("display update queue is closed")]
    Closed,
    /// A bounded queue is at capacity; the command was dropped.
    #[error("display update queue is full")]
    Full,
}

/// Producer handle. Clone it into every thread that reports recognition events.
#[derive(Clone, Debug)]
pub struct EventSource {
    sender: Sender<DisplayCommand>,
}

impl EventSource {
    /// Queue a recognizer guess.
    pub fn submit_text(&self, raw_text: impl Into<String>, has_ink: bool) -> Result<(), QueueError> {
        self.submit(DisplayCommand::Recognized(RecognitionEvent {
            raw_text: raw_text.into(),
            has_ink,
        }))
    }

    /// Queue the clear action.
    pub fn submit_clear(&self) -> Result<(), QueueError> {
        self.submit(DisplayCommand::Clear)
    }

    /// Queue a command without waiting on the consumer.
    ///
    /// A bounded queue that is at capacity rejects the command with
    /// [`QueueError::Full`] instead of blocking the caller.
    pub fn submit(&self, command: DisplayCommand) -> Result<(), QueueError> {
        self.sender.try_send(command).map_err(|err| match err {
            TrySendError::Full(_) => QueueError::Full,
            TrySendError::Disconnected(_) => QueueError::Closed,
        })
    }
}

type ChangeCallback = Arc<dyn Fn(&DisplayState) + Send + Sync>;

/// The single consumer that owns the display state.
pub struct UpdateLoop {
    receiver: Receiver<DisplayCommand>,
    state: DisplayState,
    config: Config,
    on_change: Option<ChangeCallback>,
}

/// Create a connected producer/consumer pair.
///
/// The queue is bounded by `config.queue_capacity` when set, with room for at
/// least one command.
pub fn channel(config: Config) -> (EventSource, UpdateLoop) {
    let (sender, receiver) = match config.queue_capacity {
        Some(capacity) => flume::bounded(capacity.max(1)),
        None => flume::unbounded(),
    };

    let updates = UpdateLoop {
        receiver,
        state: DisplayState::default(),
        config,
        on_change: None,
    };

    (EventSource { sender }, updates)
}

impl UpdateLoop {
    /// Set the callback run after every change to the display state.
    pub fn set_on_change(&mut self, callback: impl Fn(&DisplayState) + Send + Sync + 'static) {
        self.on_change = Some(Arc::new(callback));
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Apply commands until every [`EventSource`] is dropped, then return the
    /// final state.
    pub async fn run(mut self) -> DisplayState {
        while let Ok(command) = self.receiver.recv_async().await {
            self.handle(command);
        }
        debug!("all event sources closed, stopping display updates");
        self.state
    }

    /// Apply whatever is queued right now without waiting.
    ///
    /// For hosts that poll from their own frame loop instead of running
    /// [`UpdateLoop::run`]. Returns the number of commands handled.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(command) => {
                    self.handle(command);
                    handled += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return handled,
            }
        }
    }

    fn handle(&mut self, command: DisplayCommand) {
        let changed = match command {
            DisplayCommand::Recognized(event) => {
                let outcome = process_with(&self.config, &event.raw_text, event.has_ink);
                let changed = self.state.apply(outcome);
                trace!(has_ink = event.has_ink, changed, "applied recognition event");
                changed
            }
            DisplayCommand::Clear => {
                debug!("display cleared");
                self.state.clear()
            }
        };

        if changed && let Some(callback) = &self.on_change {
            callback(&self.state);
        }
    }
}
