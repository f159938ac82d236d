use std::collections::BTreeSet;

use crate::domain::entities::dataset::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub id: RecordId,
    pub column: String,
    pub value: String,
}

impl CellEdit {
    pub fn new(id: RecordId, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Ids edited since the last import or reset.
///
/// Membership only grows; an edit that restores the imported value does not
/// unmark the row. The set is emptied wholesale by [`ModifiedSet::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifiedSet {
    ids: BTreeSet<RecordId>,
}

impl ModifiedSet {
    pub fn mark(&mut self, id: RecordId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &BTreeSet<RecordId> {
        &self.ids
    }
}
