//! Traversal and rewriting over canonical expressions.
//!
//! Iterators walk the tree lazily without touching the arena. Rewrites
//! rebuild changed nodes through the canonical constructors, so their
//! results are always canonical, and return unchanged sub-expressions as
//! the very same handles.

use std::collections::HashMap;
use std::hash::BuildHasher;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace_span;

use crate::arena::ExprArena;
use crate::error::Result;
use crate::expr::{Args, ExprNode};
use crate::handle::ExprHandle;

/// Depth-first, pre-order iterator over sub-expressions.
///
/// Shared sub-expressions are yielded once per occurrence in the tree.
#[derive(Debug, Clone)]
pub struct PreOrder<'a> {
    arena: &'a ExprArena,
    stack: Vec<ExprHandle>,
}

impl Iterator for PreOrder<'_> {
    type Item = ExprHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        self.stack
            .extend(self.arena.get(handle).children().into_iter().rev());
        Some(handle)
    }
}

/// Depth-first, post-order iterator: children before their parent.
#[derive(Debug, Clone)]
pub struct PostOrder<'a> {
    arena: &'a ExprArena,
    stack: Vec<(ExprHandle, bool)>,
}

impl Iterator for PostOrder<'_> {
    type Item = ExprHandle;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (handle, expanded) = self.stack.pop()?;
            let node = self.arena.get(handle);
            if expanded || node.is_atom() {
                return Some(handle);
            }
            self.stack.push((handle, true));
            self.stack
                .extend(node.children().into_iter().rev().map(|c| (c, false)));
        }
    }
}

impl ExprArena {
    /// Visits `expr` and its sub-expressions in pre-order.
    ///
    /// Each call starts a fresh walk.
    #[must_use]
    pub fn visit(&self, expr: ExprHandle) -> PreOrder<'_> {
        PreOrder {
            arena: self,
            stack: vec![expr],
        }
    }

    /// Visits `expr` and its sub-expressions in post-order.
    #[must_use]
    pub fn post_order(&self, expr: ExprHandle) -> PostOrder<'_> {
        PostOrder {
            arena: self,
            stack: vec![(expr, false)],
        }
    }

    /// Collects the distinct symbols occurring in `expr`.
    #[must_use]
    pub fn free_symbols(&self, expr: ExprHandle) -> FxHashSet<ExprHandle> {
        let mut symbols = FxHashSet::default();
        self.walk_distinct(expr, |arena, handle| {
            if matches!(arena.get(handle), ExprNode::Symbol(_)) {
                symbols.insert(handle);
            }
            true
        });
        symbols
    }

    /// Returns true if `target` occurs as a sub-expression of `expr`.
    #[must_use]
    pub fn contains(&self, expr: ExprHandle, target: ExprHandle) -> bool {
        let mut found = false;
        self.walk_distinct(expr, |_, handle| {
            found |= handle == target;
            !found
        });
        found
    }

    /// Counts how often each sub-expression occurs in the tree of `expr`.
    #[must_use]
    pub fn node_counts(&self, expr: ExprHandle) -> FxHashMap<ExprHandle, usize> {
        let mut counts = FxHashMap::default();
        for handle in self.visit(expr) {
            *counts.entry(handle).or_insert(0) += 1;
        }
        counts
    }

    /// Replaces sub-expressions simultaneously.
    ///
    /// Every occurrence of a key of `mapping` in the original `expr` is
    /// replaced by its value; replacements are not searched again. Keys are
    /// usually symbols. The result is rebuilt canonically.
    ///
    /// # Errors
    ///
    /// Propagates construction errors, e.g. substituting `x -> 0` into
    /// `x^-1`.
    pub fn substitute<S: BuildHasher>(
        &mut self,
        expr: ExprHandle,
        mapping: &HashMap<ExprHandle, ExprHandle, S>,
    ) -> Result<ExprHandle> {
        if mapping.is_empty() {
            return Ok(expr);
        }
        let _span = trace_span!("substitute", %expr, keys = mapping.len()).entered();
        let mut memo = FxHashMap::default();
        self.substitute_rec(expr, mapping, &mut memo)
    }

    /// Replaces every occurrence of `from` in `expr` by `to`.
    ///
    /// # Errors
    ///
    /// See [`ExprArena::substitute`].
    pub fn replace(
        &mut self,
        expr: ExprHandle,
        from: ExprHandle,
        to: ExprHandle,
    ) -> Result<ExprHandle> {
        let mut mapping = FxHashMap::default();
        mapping.insert(from, to);
        self.substitute(expr, &mapping)
    }

    /// Rewrites `expr` bottom-up.
    ///
    /// Children are rewritten first, the node is rebuilt canonically from
    /// the rewritten children, and `f` is applied to the rebuilt node; its
    /// return value replaces the node. `f` sees atoms too.
    ///
    /// # Errors
    ///
    /// Propagates errors from `f` and from canonical reconstruction.
    pub fn map_bottom_up<F>(&mut self, expr: ExprHandle, mut f: F) -> Result<ExprHandle>
    where
        F: FnMut(&mut ExprArena, ExprHandle) -> Result<ExprHandle>,
    {
        let mut memo = FxHashMap::default();
        self.map_rec(expr, &mut f, &mut memo)
    }

    fn substitute_rec<S: BuildHasher>(
        &mut self,
        expr: ExprHandle,
        mapping: &HashMap<ExprHandle, ExprHandle, S>,
        memo: &mut FxHashMap<ExprHandle, ExprHandle>,
    ) -> Result<ExprHandle> {
        if let Some(&replacement) = mapping.get(&expr) {
            return Ok(replacement);
        }
        if let Some(&done) = memo.get(&expr) {
            return Ok(done);
        }

        let children = self.get(expr).children();
        let mut rewritten = Args::with_capacity(children.len());
        for &child in &children {
            rewritten.push(self.substitute_rec(child, mapping, memo)?);
        }
        let result = if rewritten == children {
            expr
        } else {
            self.rebuild(expr, rewritten)?
        };
        memo.insert(expr, result);
        Ok(result)
    }

    fn map_rec<F>(
        &mut self,
        expr: ExprHandle,
        f: &mut F,
        memo: &mut FxHashMap<ExprHandle, ExprHandle>,
    ) -> Result<ExprHandle>
    where
        F: FnMut(&mut ExprArena, ExprHandle) -> Result<ExprHandle>,
    {
        if let Some(&done) = memo.get(&expr) {
            return Ok(done);
        }

        let children = self.get(expr).children();
        let mut rewritten = Args::with_capacity(children.len());
        for &child in &children {
            rewritten.push(self.map_rec(child, f, memo)?);
        }
        let rebuilt = if rewritten == children {
            expr
        } else {
            self.rebuild(expr, rewritten)?
        };
        let result = f(self, rebuilt)?;
        memo.insert(expr, result);
        Ok(result)
    }

    /// Rebuilds `expr` with new children through the canonical constructors.
    fn rebuild(&mut self, expr: ExprHandle, children: Args) -> Result<ExprHandle> {
        match self.get(expr) {
            ExprNode::Add(_) => Ok(self.add(children)),
            ExprNode::Mul(_) => self.mul(children),
            ExprNode::Pow { .. } => self.pow(children[0], children[1]),
            ExprNode::Function { name, .. } => {
                let name = *name;
                Ok(self.apply_id(name, children))
            }
            ExprNode::Integer(_) | ExprNode::Rational(_) | ExprNode::Symbol(_) => Ok(expr),
        }
    }

    /// Walks each distinct node once; `f` returns false to stop the walk.
    fn walk_distinct(&self, expr: ExprHandle, mut f: impl FnMut(&Self, ExprHandle) -> bool) {
        let mut seen = FxHashSet::default();
        let mut stack = vec![expr];
        while let Some(handle) = stack.pop() {
            if !seen.insert(handle) {
                continue;
            }
            if !f(self, handle) {
                return;
            }
            stack.extend(self.get(handle).children());
        }
    }
}
