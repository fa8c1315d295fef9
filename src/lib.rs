//! Turns handwriting-recognizer output into evaluated arithmetic results.
//!
//! Raw recognized text is normalized, parsed, evaluated and formatted into a
//! [`FormattedOutcome`] made of role-tagged segments. See [`process`].

pub mod calculator;
pub mod config;
pub mod display;
pub mod outcome;
pub mod pipeline;

pub use config::Config;
pub use outcome::{FormattedOutcome, Segment, SegmentRole};
pub use pipeline::{process, process_with};
