//! Error types for parsing and evaluating expressions.
//!
//! Every variant here ends up as the same `" = Error!"` segment on screen.
//! The kinds only exist so failures can be told apart in logs and tests.

use thiserror::Error;

/// The reason a normalized string could not be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A character outside the grammar, or a token where an operator was expected.
    #[error("unexpected character")]
    UnexpectedCharacter,
    /// A `(` without its `)` or a `)` without its `(`.
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    /// An operator or group with nothing to operate on.
    #[error("missing operand")]
    MissingOperand,
    /// Nothing but whitespace.
    #[error("empty input")]
    EmptyInput,
    /// A digit run too large to be represented as a finite number.
    #[error("number out of range")]
    NumberOutOfRange,
}

/// A parse failure and the character offset it was detected at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Offset in characters (not bytes) into the normalized text.
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

/// The reason a well-formed expression has no numeric value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("division by zero")]
    DivisionByZero,
    /// A non-finite intermediate value that did not come from dividing by zero.
    #[error("invalid operation")]
    InvalidOperation,
}

/// Either stage of turning normalized text into a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}
