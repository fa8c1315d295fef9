//! What the presentation layer is currently showing.

use crate::outcome::FormattedOutcome;

/// The display label, owned by the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DisplayState {
    /// Nothing recognized yet, or cleared.
    #[default]
    Placeholder,
    /// The latest outcome.
    Showing(FormattedOutcome),
}

impl DisplayState {
    /// Apply the result of one pipeline run.
    ///
    /// `None` (no ink on the canvas) keeps the current state, whatever it is.
    /// Returns whether the state changed.
    pub fn apply(&mut self, outcome: Option<FormattedOutcome>) -> bool {
        match outcome {
            Some(outcome) => {
                let changed = self.outcome() != Some(&outcome);
                *self = Self::Showing(outcome);
                changed
            }
            None => false,
        }
    }

    /// Return to the placeholder. Returns whether anything was showing.
    pub fn clear(&mut self) -> bool {
        let changed = self.is_showing();
        *self = Self::Placeholder;
        changed
    }

    pub fn outcome(&self) -> Option<&FormattedOutcome> {
        match self {
            Self::Placeholder => None,
            Self::Showing(outcome) => Some(outcome),
        }
    }

    pub fn is_showing(&self) -> bool {
        matches!(self, Self::Showing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::process;

    #[test]
    fn test_starts_as_placeholder() {
        assert_eq!(DisplayState::default(), DisplayState::Placeholder);
    }

    #[test]
    fn test_apply_shows_latest() {
        let mut state = DisplayState::default();
        assert!(state.apply(process("1+1", true)));
        assert!(state.apply(process("2+2", true)));
        assert_eq!(state.outcome().and_then(|o| o.answer()), Some(" = 4"));
    }

    #[test]
    fn test_none_leaves_state_untouched() {
        let mut state = DisplayState::default();
        assert!(!state.apply(process("1+1", false)));
        assert_eq!(state, DisplayState::Placeholder);

        state.apply(process("1+1", true));
        let before = state.clone();
        assert!(!state.apply(process("9*9", false)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_same_outcome_is_not_a_change() {
        let mut state = DisplayState::default();
        state.apply(process("3x3", true));
        assert!(!state.apply(process("3×3", true)));
    }

    #[test]
    fn test_clear() {
        let mut state = DisplayState::default();
        assert!(!state.clear());
        state.apply(process("1", true));
        assert!(state.clear());
        assert_eq!(state, DisplayState::Placeholder);
    }
}
