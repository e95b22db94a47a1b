// Bucket tool: foreground flood fill and background fill
//
// Colors are per scanline, so both fills resolve to a set of lines whose
// palette code is replaced, not to individual pixels.

use crate::command::{CommandGroup, UpdateLineBackgroundPaletteCode, UpdateLinePaletteCode};
use crate::model::{PIXEL_COUNT, PlayfieldModel};
use std::collections::BTreeSet;

/// Lines reached by the lit region 4-connected to `(x, y)`
///
/// Two adjacent lit pixels are connected when their lines show the same
/// color under the playfield's color system. Neither axis wraps. The seed
/// line is always part of the result; other lines are added when the walk
/// steps onto them vertically.
pub fn foreground_fill_lines(pf: &PlayfieldModel, x: usize, y: usize) -> BTreeSet<usize> {
    let lines = pf.lines();
    let height = lines.len();
    let system = pf.color_system;

    let mut touched = BTreeSet::from([y]);
    let mut visited = vec![[false; PIXEL_COUNT]; height];
    let mut stack = vec![(y, x)];

    while let Some((j, i)) = stack.pop() {
        if visited[j][i] {
            continue;
        }
        visited[j][i] = true;

        let color = lines[j].color(system);
        let connected =
            |row: usize, col: usize| lines[row].pixels[col] && lines[row].color(system) == color;

        if j > 0 && connected(j - 1, i) {
            touched.insert(j - 1);
            stack.push((j - 1, i));
        }
        if i > 0 && connected(j, i - 1) {
            stack.push((j, i - 1));
        }
        if i + 1 < PIXEL_COUNT && connected(j, i + 1) {
            stack.push((j, i + 1));
        }
        if j + 1 < height && connected(j + 1, i) {
            touched.insert(j + 1);
            stack.push((j + 1, i));
        }
    }

    touched
}

/// Build the foreground fill from a lit seed pixel
///
/// Returns `None` when the seed pixel is unlit. The group holds one child
/// per touched line, in line order, even for lines already showing the
/// drawing color.
pub fn foreground_fill(pf: &PlayfieldModel, x: usize, y: usize) -> Option<CommandGroup> {
    if !pf.lines()[y].pixels[x] {
        return None;
    }

    let code = pf.palette_code();
    Some(
        foreground_fill_lines(pf, x, y)
            .into_iter()
            .map(|j| UpdateLinePaletteCode::new(j, code).into())
            .collect(),
    )
}

/// Contiguous lines around `y` sharing line `y`'s background code
///
/// Lines above come first (nearest first), then lines below, then `y`.
pub fn background_fill_lines(pf: &PlayfieldModel, y: usize) -> Vec<usize> {
    let lines = pf.lines();
    let seed = lines[y].bg_palette_code();
    let same = |j: &usize| lines[*j].bg_palette_code() == seed;

    let mut result: Vec<usize> = (0..y).rev().take_while(same).collect();
    result.extend((y + 1..lines.len()).take_while(same));
    result.push(y);
    result
}

/// Build the background fill from an unlit seed pixel
///
/// Returns `None` when the seed pixel is lit.
pub fn background_fill(pf: &PlayfieldModel, x: usize, y: usize) -> Option<CommandGroup> {
    if pf.lines()[y].pixels[x] {
        return None;
    }

    let code = pf.bg_palette_code();
    Some(
        background_fill_lines(pf, y)
            .into_iter()
            .map(|j| UpdateLineBackgroundPaletteCode::new(j, code).into())
            .collect(),
    )
}

/// Run the foreground fill; returns true if any line changed
pub fn fill_foreground(pf: &mut PlayfieldModel, x: usize, y: usize) -> bool {
    let Some(group) = foreground_fill(pf, x, y) else {
        return false;
    };
    log::debug!("Foreground fill from ({}, {}) over {} lines", x, y, group.len());

    let changed = pf.execute(group);
    pf.need_save |= changed;
    changed
}

/// Run the background fill; returns true if any line changed
pub fn fill_background(pf: &mut PlayfieldModel, x: usize, y: usize) -> bool {
    let Some(group) = background_fill(pf, x, y) else {
        return false;
    };
    log::debug!("Background fill from ({}, {}) over {} lines", x, y, group.len());

    let changed = pf.execute(group);
    pf.need_save |= changed;
    changed
}
