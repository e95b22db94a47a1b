// Pen, eraser, line, clear and color picker actions

use crate::command::{PixelUpdate, UpdatePixels};
use crate::model::{PIXEL_COUNT, PlayfieldModel};

/// Pixel `x` plus its symmetry neighbor, if any
fn with_neighbor(pf: &PlayfieldModel, x: usize) -> impl Iterator<Item = usize> {
    std::iter::once(x).chain(pf.neighbor(x))
}

/// Run a pixel batch and flag the playfield as modified
fn submit(pf: &mut PlayfieldModel, updates: Vec<PixelUpdate>) -> bool {
    pf.need_save = true;
    pf.execute(UpdatePixels::new(updates))
}

/// Light `(x, y)` and its neighbor with the drawing foreground code
pub fn draw(pf: &mut PlayfieldModel, x: usize, y: usize) -> bool {
    let code = pf.palette_code();
    let updates = with_neighbor(pf, x)
        .map(|i| PixelUpdate::new(i, y, true, code))
        .collect();
    submit(pf, updates)
}

/// Unlight `(x, y)` and its neighbor with the drawing background code
pub fn erase(pf: &mut PlayfieldModel, x: usize, y: usize) -> bool {
    let code = pf.bg_palette_code();
    let updates = with_neighbor(pf, x)
        .map(|i| PixelUpdate::new(i, y, false, code))
        .collect();
    submit(pf, updates)
}

/// Light every pixel of line `y`
pub fn draw_horizontal_line(pf: &mut PlayfieldModel, y: usize) -> bool {
    let code = pf.palette_code();
    let updates = (0..PIXEL_COUNT)
        .map(|i| PixelUpdate::new(i, y, true, code))
        .collect();
    submit(pf, updates)
}

/// Light column `x` (and its neighbor) on every line
pub fn draw_vertical_line(pf: &mut PlayfieldModel, x: usize) -> bool {
    let code = pf.palette_code();
    let columns: Vec<usize> = with_neighbor(pf, x).collect();
    let updates = (0..pf.scanline_count())
        .flat_map(|j| columns.iter().map(move |&i| PixelUpdate::new(i, j, true, code)))
        .collect();
    submit(pf, updates)
}

/// Unlight the whole playfield with the drawing background code
pub fn clear(pf: &mut PlayfieldModel) -> bool {
    let command = UpdatePixels::clear_all(pf.scanline_count(), pf.bg_palette_code());
    pf.need_save = true;
    pf.execute(command)
}

/// Adopt the foreground code of line `y` if `(x, y)` is lit
///
/// Returns the picked code.
pub fn pick_foreground(pf: &mut PlayfieldModel, x: usize, y: usize) -> Option<u8> {
    let line = &pf.lines()[y];
    if !line.pixels[x] {
        return None;
    }

    let code = line.palette_code();
    pf.palette_code.set(code);
    Some(code)
}

/// Adopt the background code of line `y`
pub fn pick_background(pf: &mut PlayfieldModel, y: usize) -> u8 {
    let code = pf.lines()[y].bg_palette_code();
    pf.bg_palette_code.set(code);
    code
}

/// Mark `(x, y)` and its neighbor as selected
pub fn select(pf: &mut PlayfieldModel, x: usize, y: usize) {
    let columns: Vec<usize> = with_neighbor(pf, x).collect();
    let line = &mut pf.lines_mut()[y];
    for i in columns {
        line.selection[i] = true;
    }
    line.refresh();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorSystem, PlayfieldMode};

    fn create_test_playfield(mode: PlayfieldMode) -> PlayfieldModel {
        let mut pf = PlayfieldModel::new("draw", mode, ColorSystem::NTSC, 3);
        pf.palette_code.set(0x1E);
        pf.bg_palette_code.set(0x84);
        pf
    }

    #[test]
    fn test_draw_mirrors_pixel() {
        let mut pf = create_test_playfield(PlayfieldMode::Mirror);
        assert!(draw(&mut pf, 2, 1));

        let line = &pf.lines()[1];
        assert!(line.pixels[2]);
        assert!(line.pixels[37]);
        assert_eq!(line.palette_code(), 0x1E);
        assert!(pf.need_save);
    }

    #[test]
    fn test_draw_symmetric_pixel() {
        let mut pf = create_test_playfield(PlayfieldMode::Symmetric);
        draw(&mut pf, 25, 0);
        assert!(pf.lines()[0].pixels[5]);
        assert!(pf.lines()[0].pixels[25]);
    }

    #[test]
    fn test_draw_neighbor_of_zero_in_symmetric_mode() {
        let mut pf = create_test_playfield(PlayfieldMode::Symmetric);
        draw(&mut pf, 20, 0);
        assert!(pf.lines()[0].pixels[0]);
    }

    #[test]
    fn test_erase_and_undo() {
        let mut pf = create_test_playfield(PlayfieldMode::Asymmetric);
        draw(&mut pf, 7, 2);
        assert!(erase(&mut pf, 7, 2));
        assert!(!pf.lines()[2].pixels[7]);
        assert_eq!(pf.lines()[2].bg_palette_code(), 0x84);

        pf.undo();
        assert!(pf.lines()[2].pixels[7]);
        assert_eq!(pf.lines()[2].bg_palette_code(), 0x00);
    }

    #[test]
    fn test_lines() {
        let mut pf = create_test_playfield(PlayfieldMode::Mirror);
        draw_horizontal_line(&mut pf, 0);
        assert!(pf.lines()[0].pixels.iter().all(|&lit| lit));

        draw_vertical_line(&mut pf, 3);
        for line in &pf.lines()[1..] {
            assert!(line.pixels[3] && line.pixels[36]);
            assert_eq!(line.pixels.iter().filter(|&&lit| lit).count(), 2);
        }
    }

    #[test]
    fn test_clear_is_one_undo_step() {
        let mut pf = create_test_playfield(PlayfieldMode::Asymmetric);
        draw_horizontal_line(&mut pf, 0);
        draw_horizontal_line(&mut pf, 2);

        assert!(clear(&mut pf));
        assert!(pf.lines().iter().all(|line| line.pixels.iter().all(|&lit| !lit)));

        pf.undo();
        assert!(pf.lines()[0].pixels.iter().all(|&lit| lit));
        assert!(pf.lines()[2].pixels.iter().all(|&lit| lit));
    }

    #[test]
    fn test_pick_colors() {
        let mut pf = create_test_playfield(PlayfieldMode::Asymmetric);
        pf.lines_mut()[1].update(Some(0x44), Some(0x0A));

        assert_eq!(pick_foreground(&mut pf, 0, 1), None);
        pf.lines_mut()[1].pixels[0] = true;
        assert_eq!(pick_foreground(&mut pf, 0, 1), Some(0x44));
        assert_eq!(pf.palette_code(), 0x44);

        assert_eq!(pick_background(&mut pf, 1), 0x0A);
        assert_eq!(pf.bg_palette_code(), 0x0A);
        assert!(!pf.can_undo());
    }

    #[test]
    fn test_select_marks_neighbor() {
        let mut pf = create_test_playfield(PlayfieldMode::Symmetric);
        select(&mut pf, 4, 1);
        assert!(pf.lines()[1].selection[4]);
        assert!(pf.lines()[1].selection[24]);
        assert!(!pf.lines()[1].pixels[4]);
    }
}
