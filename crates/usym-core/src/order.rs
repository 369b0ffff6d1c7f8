//! The canonical total order over expressions.
//!
//! Kinds compare first (`Number < Symbol < Pow < Mul < Add < Function`,
//! the declaration order of [`ExprKind`](crate::ExprKind)). Within a kind:
//! numbers by value, symbols by name, powers by base then exponent, sums
//! and products by their operands pairwise, functions by name then
//! arguments. On an equal prefix the shorter sequence sorts first.

use std::cmp::Ordering;

use crate::arena::ExprArena;
use crate::expr::ExprNode;
use crate::handle::ExprHandle;

impl ExprArena {
    /// Compares two expressions in canonical order.
    ///
    /// Returns `Equal` exactly when `a == b`.
    #[must_use]
    pub fn compare(&self, a: ExprHandle, b: ExprHandle) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }

        let (node_a, node_b) = (self.get(a), self.get(b));
        match node_a.kind().cmp(&node_b.kind()) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match (node_a, node_b) {
            (ExprNode::Integer(x), ExprNode::Integer(y)) => x.cmp(y),
            (ExprNode::Rational(x), ExprNode::Rational(y)) => x.cmp(y),
            (ExprNode::Integer(_) | ExprNode::Rational(_), _) => {
                node_a.as_rational().cmp(&node_b.as_rational())
            }
            (ExprNode::Symbol(x), ExprNode::Symbol(y)) => self.name(*x).cmp(self.name(*y)),
            (ExprNode::Pow { base: b1, exp: e1 }, ExprNode::Pow { base: b2, exp: e2 }) => self
                .compare(*b1, *b2)
                .then_with(|| self.compare(*e1, *e2)),
            (ExprNode::Mul(x), ExprNode::Mul(y)) | (ExprNode::Add(x), ExprNode::Add(y)) => {
                self.compare_slices(x, y)
            }
            (
                ExprNode::Function { name: n1, args: a1 },
                ExprNode::Function { name: n2, args: a2 },
            ) => self
                .name(*n1)
                .cmp(self.name(*n2))
                .then_with(|| self.compare_slices(a1, a2)),
            _ => unreachable!("nodes of equal kind share a variant"),
        }
    }

    /// Lexicographic comparison of operand lists.
    #[must_use]
    pub fn compare_slices(&self, a: &[ExprHandle], b: &[ExprHandle]) -> Ordering {
        for (x, y) in a.iter().zip(b) {
            match self.compare(*x, *y) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        a.len().cmp(&b.len())
    }

    /// Sorts handles into canonical order.
    pub fn sort_canonical(&self, handles: &mut [ExprHandle]) {
        handles.sort_by(|a, b| self.compare(*a, *b));
    }
}
