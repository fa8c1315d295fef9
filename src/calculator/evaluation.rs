//! Numeric evaluation and rounding.

use serde::{Deserialize, Serialize};

use super::error::EvaluationError;
use super::expression::{BinaryOpKind, Expression, Node, UnaryOpKind};

/// Evaluate an expression with `f64` semantics.
///
/// Nodes are visited bottom-up, left to right, and the first failure wins:
/// dividing by exactly zero gives [`EvaluationError::DivisionByZero`], any other
/// infinite or NaN value gives [`EvaluationError::InvalidOperation`].
pub fn evaluate(expr: &Expression) -> Result<f64, EvaluationError> {
    let mut values: Vec<f64> = Vec::with_capacity(expr.len());

    for node in expr.nodes() {
        let value = match *node {
            Node::NumberLiteral(value) => value,
            Node::Group(inner) => values[inner.index()],
            Node::UnaryOp {
                kind: UnaryOpKind::Negate,
                operand,
            } => -values[operand.index()],
            Node::BinaryOp { kind, left, right } => {
                let (l, r) = (values[left.index()], values[right.index()]);
                match kind {
                    BinaryOpKind::Add => l + r,
                    BinaryOpKind::Sub => l - r,
                    BinaryOpKind::Mul => l * r,
                    BinaryOpKind::Div if r == 0.0 => {
                        return Err(EvaluationError::DivisionByZero);
                    }
                    BinaryOpKind::Div => l / r,
                }
            }
        };

        if !value.is_finite() {
            return Err(EvaluationError::InvalidOperation);
        }
        values.push(value);
    }

    values
        .get(expr.root().index())
        .copied()
        .ok_or(EvaluationError::InvalidOperation)
}

/// How ties are broken when rounding the displayed answer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// `2.345 -> 2.35`, `-2.345 -> -2.35` (subject to binary representation).
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding. A deliberate deviation, only used when configured.
    HalfEven,
}

/// Round to `decimals` places with a single scale, round, unscale step.
///
/// Values too large to scale are already integral at that magnitude and are
/// returned unchanged.
pub fn round_to(value: f64, decimals: u32, mode: RoundingMode) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }

    let rounded = match mode {
        RoundingMode::HalfAwayFromZero => scaled.round(),
        RoundingMode::HalfEven => scaled.round_ties_even(),
    };
    rounded / factor
}

/// Format a rounded value for display: shortest form, no trailing zeros.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{value}")
}
