//! Parsed arithmetic expressions.
//!
//! Nodes live in a flat arena rather than in boxed children. A node's children
//! always sit at lower indices than the node itself, so evaluation and teardown
//! are plain loops and nesting depth never turns into stack depth.

use std::fmt;

/// Index of a node inside an [`Expression`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOpKind {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOpKind {
    /// The operator as written in normalized text.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Binding strength; higher binds tighter.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOpKind {
    Negate,
}

impl UnaryOpKind {
    pub fn symbol(self) -> char {
        match self {
            Self::Negate => '-',
        }
    }
}

/// A single node of an expression tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node {
    /// Always finite.
    NumberLiteral(f64),
    BinaryOp {
        kind: BinaryOpKind,
        left: NodeId,
        right: NodeId,
    },
    UnaryOp {
        kind: UnaryOpKind,
        operand: NodeId,
    },
    /// A parenthesized sub-expression.
    Group(NodeId),
}

/// A complete expression tree produced by the parser.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Expression {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// All nodes in bottom-up order: every child precedes its parent.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Appends nodes bottom-up and hands out their ids.
#[derive(Debug, Default)]
pub(crate) struct ExpressionBuilder {
    nodes: Vec<Node>,
}

impl ExpressionBuilder {
    pub(crate) fn number(&mut self, value: f64) -> NodeId {
        debug_assert!(value.is_finite());
        self.push(Node::NumberLiteral(value))
    }

    pub(crate) fn binary(&mut self, kind: BinaryOpKind, left: NodeId, right: NodeId) -> NodeId {
        self.push(Node::BinaryOp { kind, left, right })
    }

    pub(crate) fn unary(&mut self, kind: UnaryOpKind, operand: NodeId) -> NodeId {
        self.push(Node::UnaryOp { kind, operand })
    }

    pub(crate) fn group(&mut self, inner: NodeId) -> NodeId {
        self.push(Node::Group(inner))
    }

    pub(crate) fn finish(self, root: NodeId) -> Expression {
        Expression {
            nodes: self.nodes,
            root,
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

/// Pending output while printing without recursion.
enum Piece {
    Node(NodeId),
    Char(char),
}

/// Writes the canonical text form: no whitespace, parentheses only where the
/// tree has a group. Parsing the output yields the same tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Node(self.root)];

        while let Some(piece) = pending.pop() {
            let id = match piece {
                Piece::Char(c) => {
                    write!(f, "{c}")?;
                    continue;
                }
                Piece::Node(id) => id,
            };

            match *self.node(id) {
                Node::NumberLiteral(value) => write!(f, "{value}")?,
                Node::BinaryOp { kind, left, right } => {
                    pending.push(Piece::Node(right));
                    pending.push(Piece::Char(kind.symbol()));
                    pending.push(Piece::Node(left));
                }
                Node::UnaryOp { kind, operand } => {
                    pending.push(Piece::Node(operand));
                    pending.push(Piece::Char(kind.symbol()));
                }
                Node::Group(inner) => {
                    pending.push(Piece::Char(')'));
                    pending.push(Piece::Node(inner));
                    pending.push(Piece::Char('('));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Expression {
        // -(1.5+2)*3
        let mut b = ExpressionBuilder::default();
        let one = b.number(1.5);
        let two = b.number(2.0);
        let sum = b.binary(BinaryOpKind::Add, one, two);
        let group = b.group(sum);
        let neg = b.unary(UnaryOpKind::Negate, group);
        let three = b.number(3.0);
        let root = b.binary(BinaryOpKind::Mul, neg, three);
        b.finish(root)
    }

    #[test]
    fn test_canonical_text() {
        assert_eq!(sample().to_string(), "-(1.5+2)*3");
    }

    #[test]
    fn test_children_precede_parents() {
        let expr = sample();
        for (idx, node) in expr.nodes().iter().enumerate() {
            let children: Vec<NodeId> = match *node {
                Node::NumberLiteral(_) => vec![],
                Node::BinaryOp { left, right, .. } => vec![left, right],
                Node::UnaryOp { operand, .. } => vec![operand],
                Node::Group(inner) => vec![inner],
            };
            assert!(children.iter().all(|child| child.index() < idx));
        }
        assert_eq!(expr.root().index(), expr.len() - 1);
    }

    #[test]
    fn test_deep_nesting_prints_without_recursion() {
        let mut b = ExpressionBuilder::default();
        let mut id = b.number(7.0);
        for _ in 0..200_000 {
            id = b.group(id);
        }
        let text = b.finish(id).to_string();
        assert_eq!(text.len(), 400_001);
        assert!(text.starts_with("(((") && text.ends_with(")))"));
    }
}
