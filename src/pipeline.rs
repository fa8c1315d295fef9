//! The entry point run once per recognized-text event.
//!
//! normalize -> parse -> evaluate -> round -> format. Every input, however
//! malformed, maps to an outcome; failures only differ in what gets logged.

use tracing::debug;

use crate::calculator::{
    CalcError, EvaluationError, ParseError, calculate, format_number, normalize, round_to,
};
use crate::config::Config;
use crate::outcome::FormattedOutcome;

/// Run the pipeline with the default configuration.
///
/// Returns `None` when the canvas holds no ink, in which case the caller must
/// leave whatever it is displaying untouched.
pub fn process(raw: &str, has_ink: bool) -> Option<FormattedOutcome> {
    process_with(&Config::default(), raw, has_ink)
}

/// Run the pipeline with an explicit configuration.
pub fn process_with(config: &Config, raw: &str, has_ink: bool) -> Option<FormattedOutcome> {
    if !has_ink {
        return None;
    }

    let normalized = normalize(raw);
    debug!(raw, normalized = %normalized, "processing recognized text");

    let outcome = match calculate(&normalized) {
        Ok(value) => {
            let rounded = round_to(value, config.precision(), config.rounding);
            FormattedOutcome::answered(normalized, &format_number(rounded))
        }
        Err(err) => {
            log_failure(&normalized, err);
            FormattedOutcome::failed(normalized)
        }
    };

    Some(outcome)
}

fn log_failure(normalized: &str, err: CalcError) {
    match err {
        CalcError::Parse(ParseError { kind, position }) => {
            debug!(normalized, ?kind, position, "expression did not parse");
        }
        CalcError::Evaluation(EvaluationError::DivisionByZero) => {
            debug!(normalized, "division by zero");
        }
        CalcError::Evaluation(EvaluationError::InvalidOperation) => {
            debug!(normalized, "result is not a finite number");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::RoundingMode;
    use crate::outcome::SegmentRole;
    use proptest::prelude::*;

    fn outcome(raw: &str) -> FormattedOutcome {
        process(raw, true).expect("ink present")
    }

    #[test]
    fn test_multiplication_letter() {
        let out = outcome("2X3");
        assert_eq!(out.expression(), "2*3");
        assert_eq!(out.answer(), Some(" = 6"));
    }

    #[test]
    fn test_division_by_zero_shows_error() {
        let out = outcome("10÷0");
        assert_eq!(out.expression(), "10/0");
        assert_eq!(out.error(), Some(" = Error!"));
        assert_eq!(out.answer(), None);
    }

    #[test]
    fn test_unbalanced_shows_error() {
        let out = outcome("(1+2");
        assert_eq!(out.expression(), "(1+2");
        assert_eq!(out.error(), Some(" = Error!"));
    }

    #[test]
    fn test_multiplication_glyph() {
        let out = outcome("3.5×2");
        assert_eq!(out.expression(), "3.5*2");
        assert_eq!(out.answer(), Some(" = 7"));
    }

    #[test]
    fn test_no_ink_is_none() {
        assert_eq!(process("anything", false), None);
    }

    #[test]
    fn test_fraction_rounded() {
        assert_eq!(outcome("7/2").answer(), Some(" = 3.5"));
        assert_eq!(outcome("1/3").answer(), Some(" = 0.33"));
        assert_eq!(outcome("-2/3").answer(), Some(" = -0.67"));
    }

    #[test]
    fn test_tiny_negative_rounds_to_plain_zero() {
        assert_eq!(outcome("-1/1000").answer(), Some(" = 0"));
    }

    #[test]
    fn test_empty_and_garbage_are_errors() {
        for raw in ["", "   ", "hello", "\u{0}\u{7f}", "1++", ")("] {
            let out = outcome(raw);
            assert_eq!(out.error(), Some(" = Error!"), "input {raw:?}");
        }
    }

    #[test]
    fn test_expression_keeps_original_spacing() {
        assert_eq!(outcome(" 1 + 1 ").expression(), " 1 + 1 ");
    }

    #[test]
    fn test_configured_precision_and_rounding() {
        let config = Config {
            precision: 0,
            rounding: RoundingMode::HalfEven,
            ..Config::default()
        };
        let out = process_with(&config, "5/2", true).unwrap();
        assert_eq!(out.answer(), Some(" = 2"));

        let config = Config {
            precision: 3,
            ..Config::default()
        };
        let out = process_with(&config, "1/3", true).unwrap();
        assert_eq!(out.answer(), Some(" = 0.333"));
    }

    proptest! {
        #[test]
        fn no_ink_never_produces_outcome(raw in any::<String>()) {
            prop_assert!(process(&raw, false).is_none());
        }

        #[test]
        fn any_text_maps_to_expression_then_one_result(raw in any::<String>()) {
            let out = process(&raw, true).unwrap();
            let roles: Vec<SegmentRole> = out.segments().iter().map(|s| s.role).collect();
            prop_assert_eq!(roles.len(), 2);
            prop_assert_eq!(roles[0], SegmentRole::Expression);
            prop_assert!(matches!(roles[1], SegmentRole::Answer | SegmentRole::Error));
            prop_assert_eq!(out.expression(), normalize(&raw));
        }

        #[test]
        fn answers_are_never_infinite_or_nan(raw in "[0-9+*/() .x÷×-]{0,24}") {
            let out = process(&raw, true).unwrap();
            if let Some(answer) = out.answer() {
                prop_assert!(!answer.contains("inf"));
                prop_assert!(!answer.contains("NaN"));
            }
        }
    }
}
