// Text tool: stamping symbols into the selection layer

use crate::model::{PIXEL_COUNT, PlayfieldModel};
use crate::symbol::{Font, Symbol};
use std::collections::BTreeSet;

/// Gap in pixels between two stamped characters
pub const LETTER_SPACING: usize = 1;

/// Stage `symbol` with its top-left corner at `(x, y)`
///
/// Both axes wrap around the playfield. Returns the lines touched.
fn position_symbol(pf: &mut PlayfieldModel, x: usize, y: usize, symbol: &Symbol) -> BTreeSet<usize> {
    let count = pf.scanline_count();
    let mut touched = BTreeSet::new();
    if count == 0 {
        return touched;
    }

    for &(i, j) in &symbol.pixels {
        let b = (y % count + j % count) % count;
        let a = (x % PIXEL_COUNT + i % PIXEL_COUNT) % PIXEL_COUNT;
        let mirrored = pf.neighbor(a);

        let line = &mut pf.lines_mut()[b];
        line.overlay[a] = true;
        line.selection[a] = true;
        if let Some(n) = mirrored {
            line.overlay[n] = true;
            line.selection[n] = true;
        }

        touched.insert(b);
    }

    touched
}

/// Re-apply the codes of the touched lines so they get redrawn
fn refresh_lines(pf: &mut PlayfieldModel, touched: &BTreeSet<usize>) {
    for &j in touched {
        let line = &mut pf.lines_mut()[j];
        let bg = line.bg_palette_code();
        line.bg_palette_code.silent_set(bg);
        line.refresh();
    }
}

/// Stage a single symbol at `(x, y)`
pub fn draw_symbol(pf: &mut PlayfieldModel, x: usize, y: usize, symbol: &Symbol) {
    let touched = position_symbol(pf, x, y, symbol);
    refresh_lines(pf, &touched);
}

/// Stage `text` starting at `(x, y)`
///
/// Characters missing from the font (after the lowercase fallback) are
/// skipped without advancing. Returns the number of characters stamped.
pub fn draw_text(pf: &mut PlayfieldModel, x: usize, y: usize, font: &Font, text: &str) -> usize {
    let mut touched = BTreeSet::new();
    let mut cursor = x % PIXEL_COUNT;
    let mut stamped = 0;

    for c in text.chars() {
        let Some(symbol) = font.glyph(c) else {
            log::warn!("Font '{}' has no glyph for {:?}", font.name, c);
            continue;
        };

        touched.extend(position_symbol(pf, cursor, y, symbol));
        cursor = (cursor + symbol.width % PIXEL_COUNT + LETTER_SPACING) % PIXEL_COUNT;
        stamped += 1;
    }

    refresh_lines(pf, &touched);
    stamped
}
