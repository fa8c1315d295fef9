//! Parser for normalized arithmetic text.
//!
//! Grammar, left-associative at each level:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := '-' factor | number | '(' expression ')'
//! number     := digit+ ('.' digit+)?
//! ```
//!
//! Implemented as a shunting-yard over explicit stacks so that nesting depth is
//! limited by memory rather than by the call stack.

use super::error::{ParseError, ParseErrorKind};
use super::expression::{BinaryOpKind, Expression, ExpressionBuilder, NodeId, UnaryOpKind};

#[derive(Clone, Copy, Debug, PartialEq)]
enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Token {
    kind: TokenKind,
    /// Character offset of the token's first character.
    position: usize,
}

/// Split normalized text into tokens, skipping whitespace.
fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let position = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '0'..='9' => {
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                // A fraction needs at least one digit after the point; otherwise
                // the point is left for the next round and rejected there.
                if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
                    i += 1;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }

                let literal: String = chars[position..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or(ParseError::new(ParseErrorKind::NumberOutOfRange, position))?;

                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    position,
                });
                continue;
            }
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedCharacter,
                    position,
                ));
            }
        };

        tokens.push(Token { kind, position });
        i += 1;
    }

    Ok(tokens)
}

/// An operator waiting on the stack for its right-hand side.
#[derive(Clone, Copy, Debug)]
enum Pending {
    Binary(BinaryOpKind),
    Negate,
    /// An open parenthesis and where it was written.
    Open(usize),
}

impl Pending {
    /// Whether this stacked operator must be applied before pushing `incoming`.
    fn binds_before(self, incoming: BinaryOpKind) -> bool {
        match self {
            Self::Negate => true,
            Self::Binary(kind) => kind.precedence() >= incoming.precedence(),
            Self::Open(_) => false,
        }
    }
}

#[derive(Default)]
struct ShuntingYard {
    builder: ExpressionBuilder,
    operands: Vec<NodeId>,
    operators: Vec<Pending>,
}

impl ShuntingYard {
    fn pop_operand(&mut self, position: usize) -> Result<NodeId, ParseError> {
        self.operands
            .pop()
            .ok_or(ParseError::new(ParseErrorKind::MissingOperand, position))
    }

    /// Apply one operator to the operands on top of the stack.
    fn reduce(&mut self, op: Pending, position: usize) -> Result<(), ParseError> {
        let node = match op {
            Pending::Binary(kind) => {
                let right = self.pop_operand(position)?;
                let left = self.pop_operand(position)?;
                self.builder.binary(kind, left, right)
            }
            Pending::Negate => {
                let operand = self.pop_operand(position)?;
                self.builder.unary(UnaryOpKind::Negate, operand)
            }
            Pending::Open(open) => {
                return Err(ParseError::new(ParseErrorKind::UnbalancedParens, open));
            }
        };
        self.operands.push(node);
        Ok(())
    }

    fn push_binary(&mut self, kind: BinaryOpKind, position: usize) -> Result<(), ParseError> {
        while let Some(&top) = self.operators.last() {
            if !top.binds_before(kind) {
                break;
            }
            self.operators.pop();
            self.reduce(top, position)?;
        }
        self.operators.push(Pending::Binary(kind));
        Ok(())
    }

    fn close_group(&mut self, position: usize) -> Result<(), ParseError> {
        loop {
            match self.operators.pop() {
                Some(Pending::Open(_)) => break,
                Some(op) => self.reduce(op, position)?,
                None => {
                    return Err(ParseError::new(ParseErrorKind::UnbalancedParens, position));
                }
            }
        }
        let inner = self.pop_operand(position)?;
        let group = self.builder.group(inner);
        self.operands.push(group);
        Ok(())
    }

    fn finish(mut self, end: usize) -> Result<Expression, ParseError> {
        while let Some(op) = self.operators.pop() {
            self.reduce(op, end)?;
        }
        let root = self.pop_operand(end)?;
        if !self.operands.is_empty() {
            return Err(ParseError::new(ParseErrorKind::UnexpectedCharacter, end));
        }
        Ok(self.builder.finish(root))
    }
}

/// Parse normalized text into an [`Expression`].
///
/// Either the whole input parses or an error is returned; nothing is
/// evaluated along the way.
pub fn parse(text: &str) -> Result<Expression, ParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyInput, 0));
    }

    let mut yard = ShuntingYard::default();
    let mut expect_operand = true;

    for Token { kind, position } in tokens {
        if expect_operand {
            match kind {
                TokenKind::Number(value) => {
                    let id = yard.builder.number(value);
                    yard.operands.push(id);
                    expect_operand = false;
                }
                TokenKind::LParen => yard.operators.push(Pending::Open(position)),
                TokenKind::Minus => yard.operators.push(Pending::Negate),
                TokenKind::Plus | TokenKind::Star | TokenKind::Slash | TokenKind::RParen => {
                    return Err(ParseError::new(ParseErrorKind::MissingOperand, position));
                }
            }
            continue;
        }

        match kind {
            TokenKind::Plus => yard.push_binary(BinaryOpKind::Add, position)?,
            TokenKind::Minus => yard.push_binary(BinaryOpKind::Sub, position)?,
            TokenKind::Star => yard.push_binary(BinaryOpKind::Mul, position)?,
            TokenKind::Slash => yard.push_binary(BinaryOpKind::Div, position)?,
            TokenKind::RParen => {
                yard.close_group(position)?;
                continue;
            }
            TokenKind::Number(_) | TokenKind::LParen => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedCharacter,
                    position,
                ));
            }
        }
        expect_operand = true;
    }

    let end = text.chars().count();
    if expect_operand {
        return Err(ParseError::new(ParseErrorKind::MissingOperand, end));
    }

    yard.finish(end)
}
