use serde::Serialize;

/// What a piece of the displayed result means; the presentation layer picks
/// color and typeface from this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentRole {
    /// The normalized text the user wrote
    Expression,
    /// The rounded numeric result
    Answer,
    /// The error marker
    Error,
}

/// One labeled piece of a displayed result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub role: SegmentRole,
    pub text: String,
}

impl Segment {
    pub fn new(role: SegmentRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}
