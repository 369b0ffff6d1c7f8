//! Arena storage and hash-consing for canonical expressions.
//!
//! Every node lives in one contiguous `Vec`; the intern map guarantees that
//! each distinct canonical structure is stored exactly once, so handle
//! equality is structural equality.

use hashbrown::HashMap;
use tracing::trace;
use usym_integers::{Integer, Rational};

use crate::config::ArenaConfig;
use crate::error::{ExprError, Result};
use crate::expr::{ExprKind, ExprNode, NameId};
use crate::handle::ExprHandle;
use crate::intern::NameTable;

/// Counters describing an arena's contents and interning traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Distinct nodes stored.
    pub nodes: usize,
    /// Distinct names stored.
    pub names: usize,
    /// Intern requests answered by an existing node.
    pub intern_hits: u64,
    /// Intern requests that stored a new node.
    pub intern_misses: u64,
}

/// The interning store and construction context for expressions.
///
/// Handles are only meaningful for the arena that produced them. Reading a
/// shared `&ExprArena` from many threads is safe; construction needs
/// `&mut self` (see [`SharedArena`](crate::SharedArena) for a lockable
/// variant).
#[derive(Debug, Default)]
pub struct ExprArena {
    /// Storage for all expression nodes.
    nodes: Vec<ExprNode>,
    /// Interning table: maps node content to its handle.
    intern_map: HashMap<ExprNode, ExprHandle>,
    /// Symbol and function names.
    names: NameTable,
    config: ArenaConfig,
    hits: u64,
    misses: u64,
}

impl ExprArena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arena with the given configuration.
    #[must_use]
    pub fn with_config(config: ArenaConfig) -> Self {
        Self {
            nodes: Vec::with_capacity(config.node_capacity),
            intern_map: HashMap::with_capacity(config.node_capacity),
            names: NameTable::with_capacity(config.name_capacity),
            config,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the arena configuration.
    #[must_use]
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Returns the canonical handle for a candidate node.
    ///
    /// Callers must pass a node that already satisfies every canonical
    /// invariant; only the canonicalizer does so.
    pub(crate) fn intern(&mut self, node: ExprNode) -> ExprHandle {
        if let Some(&handle) = self.intern_map.get(&node) {
            self.hits += 1;
            return handle;
        }

        let index = u32::try_from(self.nodes.len()).expect("arena capacity exceeded");
        let handle = ExprHandle::new(index);
        trace!(%handle, kind = ?node.kind(), "interned node");
        self.nodes.push(node.clone());
        self.intern_map.insert(node, handle);
        self.misses += 1;
        handle
    }

    /// Gets the node at the given handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not produced by this arena.
    #[must_use]
    pub fn get(&self, handle: ExprHandle) -> &ExprNode {
        &self.nodes[handle.index() as usize]
    }

    /// Returns the variant discriminator of an expression.
    #[must_use]
    pub fn kind(&self, handle: ExprHandle) -> ExprKind {
        self.get(handle).kind()
    }

    /// Returns the numeric value of a constant expression.
    #[must_use]
    pub fn as_rational(&self, handle: ExprHandle) -> Option<Rational> {
        self.get(handle).as_rational()
    }

    /// Resolves a name id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not produced by this arena.
    #[must_use]
    pub fn name(&self, id: NameId) -> &str {
        match self.names.get(id) {
            Some(name) => name,
            None => panic!("name id {id} does not belong to this arena"),
        }
    }

    /// Returns the name of a symbol expression.
    #[must_use]
    pub fn symbol_name(&self, handle: ExprHandle) -> Option<&str> {
        match self.get(handle) {
            ExprNode::Symbol(id) => Some(self.name(*id)),
            _ => None,
        }
    }

    /// Returns the name of a function application.
    #[must_use]
    pub fn function_name(&self, handle: ExprHandle) -> Option<&str> {
        match self.get(handle) {
            ExprNode::Function { name, .. } => Some(self.name(*name)),
            _ => None,
        }
    }

    /// Looks up an existing symbol without creating it.
    #[must_use]
    pub fn find_symbol(&self, name: &str) -> Option<ExprHandle> {
        let id = self.names.lookup(name)?;
        self.intern_map.get(&ExprNode::Symbol(id)).copied()
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns size and interning counters.
    #[must_use]
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            nodes: self.nodes.len(),
            names: self.names.len(),
            intern_hits: self.hits,
            intern_misses: self.misses,
        }
    }

    // === Atom constructors ===

    /// Creates a symbol expression.
    pub fn symbol(&mut self, name: &str) -> ExprHandle {
        let id = self.names.intern(name);
        self.intern(ExprNode::Symbol(id))
    }

    /// Creates an integer constant.
    pub fn integer(&mut self, value: impl Into<Integer>) -> ExprHandle {
        self.intern(ExprNode::Integer(value.into()))
    }

    /// Creates a rational constant `numerator / denominator`.
    ///
    /// Collapses to an integer constant when the reduced denominator is 1.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::InvalidRational`] if the denominator is zero.
    pub fn rational(
        &mut self,
        numerator: impl Into<Integer>,
        denominator: impl Into<Integer>,
    ) -> Result<ExprHandle> {
        let value = Rational::checked_new(numerator.into(), denominator.into())
            .ok_or(ExprError::InvalidRational)?;
        Ok(self.number(value))
    }

    /// Creates a numeric constant from an exact value.
    pub fn number(&mut self, value: Rational) -> ExprHandle {
        match value.to_integer() {
            Some(n) => self.intern(ExprNode::Integer(n)),
            None => self.intern(ExprNode::Rational(value)),
        }
    }

    pub(crate) fn intern_name(&mut self, name: &str) -> NameId {
        self.names.intern(name)
    }
}
