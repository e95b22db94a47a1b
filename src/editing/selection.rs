// Selection layer operations
//
// These mutate the scanlines in place and then push the inverse of whatever
// happened to the live pixels, so they skip PlayfieldModel::execute.

use crate::command::{PixelUpdate, UpdatePixels};
use crate::model::{PlayfieldModel, ScanlineModel};

/// Apply `op` to every line, refresh it, and record an inverse for the
/// pixels it changed
///
/// `restore_lit` is the status the inverse writes back; the code is the
/// line's own foreground or background code accordingly.
fn apply_to_lines<F>(pf: &mut PlayfieldModel, restore_lit: bool, mut op: F) -> usize
where
    F: FnMut(&mut ScanlineModel) -> Vec<usize>,
{
    let mut updates = Vec::new();

    for (y, line) in pf.lines_mut().iter_mut().enumerate() {
        let mods = op(line);
        line.refresh();

        let code = if restore_lit {
            line.palette_code()
        } else {
            line.bg_palette_code()
        };
        updates.extend(mods.into_iter().map(|x| PixelUpdate::new(x, y, restore_lit, code)));
    }

    let changed = updates.len();
    if changed > 0 {
        pf.push_undo(UpdatePixels::new(updates));
        pf.need_save = true;
    }
    changed
}

/// Stash the selected lit pixels into the overlay without removing them
pub fn copy_selection(pf: &mut PlayfieldModel) {
    for line in pf.lines_mut() {
        line.copy_selection();
    }
}

/// Move the selected lit pixels into the overlay
///
/// Returns the number of live pixels cleared.
pub fn cut_selection(pf: &mut PlayfieldModel) -> usize {
    apply_to_lines(pf, true, ScanlineModel::cut_selection)
}

/// Erase the selected pixels from both planes
///
/// Returns the number of live pixels cleared.
pub fn delete_selection(pf: &mut PlayfieldModel) -> usize {
    apply_to_lines(pf, true, ScanlineModel::delete_selection)
}

/// Commit the overlay into the live pixels and drop the selection
///
/// Returns the number of live pixels lit by the commit.
pub fn clear_selection(pf: &mut PlayfieldModel) -> usize {
    apply_to_lines(pf, false, ScanlineModel::clear_selection)
}
