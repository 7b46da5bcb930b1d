//! Row-selection state for batch printing.
//!
//! Selection is transient UI-local state: it is created when a transaction
//! list is loaded, discarded when the list is reloaded, and never persisted.
//! It is keyed by transaction id rather than row index so that reordering or
//! reloading rows can never mis-attribute a selection.

use std::collections::HashSet;

use crate::database_id::TransactionId;

/// Which rows of a transaction list are currently marked for batch printing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<TransactionId>,
}

impl Selection {
    /// Create an empty selection, as on a fresh data load.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the selection state of one row. Other rows are unaffected.
    pub fn toggle(&mut self, id: TransactionId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Whether the given row is currently selected.
    pub fn is_selected(&self, id: TransactionId) -> bool {
        self.selected.contains(&id)
    }

    /// Whether no row is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drop all selections, as when the underlying list is reloaded.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// The selected ids, ordered by their position in `row_order`.
    ///
    /// Selected ids that no longer appear in `row_order` are omitted.
    pub fn ids_in_order(&self, row_order: &[TransactionId]) -> Vec<TransactionId> {
        row_order
            .iter()
            .copied()
            .filter(|id| self.selected.contains(id))
            .collect()
    }
}
