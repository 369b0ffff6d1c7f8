//! Name interning.
//!
//! Symbol and function names are stored once and referred to by
//! [`NameId`]. Ids only index the table; ordering always compares the
//! strings themselves.

use hashbrown::HashMap;

use crate::expr::NameId;

/// Bidirectional table between names and their ids.
#[derive(Debug, Default)]
pub struct NameTable {
    ids: HashMap<Box<str>, NameId>,
    names: Vec<Box<str>>,
}

impl NameTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: HashMap::with_capacity(capacity),
            names: Vec::with_capacity(capacity),
        }
    }

    /// Interns a name, returning its id.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct names are interned.
    pub fn intern(&mut self, name: &str) -> NameId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }

        let id = NameId::try_from(self.names.len()).expect("name table capacity exceeded");
        self.ids.insert(name.into(), id);
        self.names.push(name.into());
        id
    }

    /// Resolves an id back to its name.
    #[must_use]
    pub fn get(&self, id: NameId) -> Option<&str> {
        self.names.get(id as usize).map(AsRef::as_ref)
    }

    /// Looks up the id of a name without interning it.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<NameId> {
        self.ids.get(name).copied()
    }

    /// Returns the number of interned names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no names have been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
