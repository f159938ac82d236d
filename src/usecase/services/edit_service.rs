use tracing::debug;

use crate::domain::entities::dataset::Dataset;
use crate::domain::entities::edit::{CellEdit, ModifiedSet};

/// Writes one cell of `working` and marks its record as modified.
///
/// An edit addressed to an id that no longer exists is dropped without
/// error; it can only come from a stale view. Returns whether the edit was
/// applied.
pub fn apply_cell_edit(working: &mut Dataset, modified: &mut ModifiedSet, edit: CellEdit) -> bool {
    let CellEdit { id, column, value } = edit;
    match working.set_cell(id, &column, value) {
        Ok(()) => {
            modified.mark(id);
            debug!(%id, %column, "cell edited");
            true
        }
        Err(err) => {
            debug!(%err, "edit ignored");
            false
        }
    }
}
