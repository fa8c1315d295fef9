//! Calculator engine for recognized handwriting.
//!
//! This module provides functionality to:
//! - Normalize recognizer output into canonical notation
//! - Parse normalized text into an expression tree
//! - Evaluate the tree and round the result for display

mod error;
mod evaluation;
mod expression;
mod normalize;
mod parser;

pub use error::{CalcError, EvaluationError, ParseError, ParseErrorKind};
pub use evaluation::{RoundingMode, evaluate, format_number, round_to};
pub use expression::{BinaryOpKind, Expression, Node, NodeId, UnaryOpKind};
pub use normalize::normalize;
pub use parser::parse;

/// Parse and evaluate already-normalized text.
pub fn calculate(normalized: &str) -> Result<f64, CalcError> {
    let expr = parse(normalized)?;
    Ok(evaluate(&expr)?)
}
