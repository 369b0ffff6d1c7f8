//! A lockable arena for concurrent construction.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::arena::{ArenaStats, ExprArena};
use crate::config::ArenaConfig;

/// An [`ExprArena`] shared between threads.
///
/// Construction runs under the write lock, so interning a given structure
/// from any number of threads yields one handle. Inspection runs under the
/// read lock and proceeds concurrently. Clones share the same store.
#[derive(Clone, Default)]
pub struct SharedArena {
    inner: Arc<RwLock<ExprArena>>,
}

impl SharedArena {
    /// Creates an empty shared arena.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    /// Creates a shared arena with the given configuration.
    #[must_use]
    pub fn with_config(config: ArenaConfig) -> Self {
        debug!(?config, "creating shared arena");
        Self {
            inner: Arc::new(RwLock::new(ExprArena::with_config(config))),
        }
    }

    /// Wraps an existing arena.
    #[must_use]
    pub fn from_arena(arena: ExprArena) -> Self {
        Self {
            inner: Arc::new(RwLock::new(arena)),
        }
    }

    /// Runs a construction closure with exclusive access.
    pub fn write<R>(&self, f: impl FnOnce(&mut ExprArena) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Runs an inspection closure with shared access.
    pub fn read<R>(&self, f: impl FnOnce(&ExprArena) -> R) -> R {
        f(&self.inner.read())
    }

    /// Returns the number of stored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if no nodes are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns size and interning counters.
    #[must_use]
    pub fn stats(&self) -> ArenaStats {
        self.inner.read().stats()
    }
}

impl std::fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedArena")
            .field("stats", &self.stats())
            .finish()
    }
}
