// Circular moves of the selection layer
//
// Only `selection` and `overlay` move; live pixels stay where they are.
// Vertical moves also carry a foreground code along with the overlay so the
// staged shape keeps its color while crossing lines.

use crate::model::{PIXEL_COUNT, PlayfieldModel, ScanlineModel};

type Layer = ([bool; PIXEL_COUNT], [bool; PIXEL_COUNT]);

fn take_layer(line: &ScanlineModel) -> Layer {
    (line.selection, line.overlay)
}

fn put_layer(line: &mut ScanlineModel, (selection, overlay): Layer) {
    line.selection = selection;
    line.overlay = overlay;
}

/// Move the layer of line `from` onto line `to`
///
/// Line `to` takes the foreground code of `from` when `from` carries overlay
/// content, otherwise it keeps its own.
fn shift_line(lines: &mut [ScanlineModel], from: usize, to: usize) {
    let color = if lines[from].has_overlay() {
        lines[from].palette_code()
    } else {
        lines[to].palette_code()
    };

    let layer = take_layer(&lines[from]);
    put_layer(&mut lines[to], layer);
    lines[to].palette_code.set(color);
}

pub fn rotate_right(pf: &mut PlayfieldModel) {
    for line in pf.lines_mut() {
        line.rotate_right();
        line.refresh();
    }
}

pub fn rotate_left(pf: &mut PlayfieldModel) {
    for line in pf.lines_mut() {
        line.rotate_left();
        line.refresh();
    }
}

/// Move the layer up one line; line 0 wraps to the bottom
///
/// The wrapped line picks its color after line 0 has already received the
/// layer of line 1, so it tests line 0's *new* overlay.
pub fn rotate_up(pf: &mut PlayfieldModel) {
    let lines = pf.lines_mut();
    let count = lines.len();
    if count < 2 {
        return;
    }

    let first = take_layer(&lines[0]);
    for j in 1..count {
        shift_line(lines, j, j - 1);
    }

    let last = count - 1;
    let color = if lines[0].has_overlay() {
        lines[0].palette_code()
    } else {
        lines[last].palette_code()
    };
    put_layer(&mut lines[last], first);
    lines[last].palette_code.set(color);
}

/// Move the layer down one line; the last line wraps to the top
///
/// Mirrors `rotate_up`: the wrap tests the last line after it has received
/// the layer of the line above it.
pub fn rotate_down(pf: &mut PlayfieldModel) {
    let lines = pf.lines_mut();
    let count = lines.len();
    if count < 2 {
        return;
    }

    let last = count - 1;
    let bottom = take_layer(&lines[last]);
    for j in (0..last).rev() {
        shift_line(lines, j, j + 1);
    }

    let color = if lines[last].has_overlay() {
        lines[last].palette_code()
    } else {
        lines[0].palette_code()
    };
    put_layer(&mut lines[0], bottom);
    lines[0].palette_code.set(color);
}
