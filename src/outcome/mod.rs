//! Display-ready results of one pipeline run.

mod segment;

pub use segment::{Segment, SegmentRole};

use serde::Serialize;

/// Prefix in front of a numeric answer.
pub const ANSWER_PREFIX: &str = " = ";

/// Text of the error segment, shared by every failure kind.
pub const ERROR_TEXT: &str = " = Error!";

/// The ordered segments for one recognized expression.
///
/// The expression segment always comes first, followed by exactly one answer
/// or error segment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormattedOutcome {
    segments: Vec<Segment>,
}

impl FormattedOutcome {
    /// An expression that evaluated to `value_text`.
    pub fn answered(expression: impl Into<String>, value_text: &str) -> Self {
        Self {
            segments: vec![
                Segment::new(SegmentRole::Expression, expression),
                Segment::new(SegmentRole::Answer, format!("{ANSWER_PREFIX}{value_text}")),
            ],
        }
    }

    /// An expression that failed to parse or evaluate.
    pub fn failed(expression: impl Into<String>) -> Self {
        Self {
            segments: vec![
                Segment::new(SegmentRole::Expression, expression),
                Segment::new(SegmentRole::Error, ERROR_TEXT),
            ],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Get the expression text.
    pub fn expression(&self) -> &str {
        self.segments
            .first()
            .map(|segment| segment.text.as_str())
            .unwrap_or_default()
    }

    /// Get the answer segment text, if the expression evaluated.
    pub fn answer(&self) -> Option<&str> {
        self.find(SegmentRole::Answer)
    }

    /// Get the error segment text, if the expression failed.
    pub fn error(&self) -> Option<&str> {
        self.find(SegmentRole::Error)
    }

    /// Check if this outcome carries an error marker.
    pub fn is_error(&self) -> bool {
        self.error().is_some()
    }

    /// All segment texts concatenated, e.g. `"2*3 = 6"`.
    pub fn display_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn find(&self, role: SegmentRole) -> Option<&str> {
        self.segments
            .iter()
            .find(|segment| segment.role == role)
            .map(|segment| segment.text.as_str())
    }
}
