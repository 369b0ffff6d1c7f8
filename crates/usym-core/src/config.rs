//! Arena configuration.

/// Tuning knobs for an [`ExprArena`](crate::ExprArena).
///
/// None of these change which canonical form an expression takes relative
/// to other expressions in the same arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Nodes to pre-allocate.
    pub node_capacity: usize,
    /// Names to pre-allocate.
    pub name_capacity: usize,
    /// Largest `|k|` for which `q^k` with numeric `q` is folded to a
    /// constant. Larger powers stay as unevaluated `Pow` nodes.
    pub max_fold_exponent: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            node_capacity: 0,
            name_capacity: 0,
            max_fold_exponent: 4096,
        }
    }
}

impl ArenaConfig {
    /// Sets the node capacity.
    #[must_use]
    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }

    /// Sets the name capacity.
    #[must_use]
    pub fn with_name_capacity(mut self, capacity: usize) -> Self {
        self.name_capacity = capacity;
        self
    }

    /// Sets the numeric folding limit for integer exponents.
    #[must_use]
    pub fn with_max_fold_exponent(mut self, limit: u32) -> Self {
        self.max_fold_exponent = limit;
        self
    }
}
