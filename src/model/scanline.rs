// ScanlineModel - one row of the playfield

use crate::model::registers::PlayfieldRegisters;
use crate::model::{ColorSystem, HALF_PIXEL_COUNT, PIXEL_COUNT};
use crate::observable::Observable;

/// One 40-pixel row with its selection/overlay planes and palette codes
///
/// Three parallel planes are kept per row:
/// - `pixels`: the committed, lit/unlit playfield bits
/// - `selection`: pixels marked by the selection tool
/// - `overlay`: content detached from `pixels` while a selection is being
///   cut, copied, moved or stamped, not yet committed
///
/// Both palette codes notify on every write so that writing a code back to
/// itself refreshes whatever renders the row.
#[derive(Debug)]
pub struct ScanlineModel {
    pub pixels: [bool; PIXEL_COUNT],
    pub selection: [bool; PIXEL_COUNT],
    pub overlay: [bool; PIXEL_COUNT],
    pub palette_code: Observable<u8>,
    pub bg_palette_code: Observable<u8>,
}

impl ScanlineModel {
    /// Create an empty row with the given foreground and background codes
    pub fn new(palette_code: u8, bg_palette_code: u8) -> Self {
        Self {
            pixels: [false; PIXEL_COUNT],
            selection: [false; PIXEL_COUNT],
            overlay: [false; PIXEL_COUNT],
            palette_code: Observable::always_notify(palette_code),
            bg_palette_code: Observable::always_notify(bg_palette_code),
        }
    }

    pub fn palette_code(&self) -> u8 {
        self.palette_code.value()
    }

    pub fn bg_palette_code(&self) -> u8 {
        self.bg_palette_code.value()
    }

    /// True when any pixel of the overlay plane is set
    pub fn has_overlay(&self) -> bool {
        self.overlay.iter().any(|&staged| staged)
    }

    pub fn has_selection(&self) -> bool {
        self.selection.iter().any(|&selected| selected)
    }

    /// Whether pixel `i` is drawn in the foreground color
    pub fn shows_foreground(&self, i: usize) -> bool {
        self.pixels[i] || self.overlay[i]
    }

    /// Commit the overlay back into the live pixels and drop the selection
    ///
    /// Returns the indices whose live pixel went from unlit to lit.
    pub fn clear_selection(&mut self) -> Vec<usize> {
        let mut mods = Vec::new();
        for i in 0..PIXEL_COUNT {
            if self.selection[i] {
                self.selection[i] = false;
                if self.overlay[i] {
                    self.overlay[i] = false;
                    if !self.pixels[i] {
                        self.pixels[i] = true;
                        mods.push(i);
                    }
                }
            }
        }
        mods
    }

    /// Stash the selected lit pixels into the overlay, leaving them in place
    pub fn copy_selection(&mut self) {
        for i in 0..PIXEL_COUNT {
            if self.selection[i] && self.pixels[i] {
                self.overlay[i] = true;
            }
        }
    }

    /// Move the selected lit pixels into the overlay
    ///
    /// Returns the indices whose live pixel was cleared.
    pub fn cut_selection(&mut self) -> Vec<usize> {
        let mut mods = Vec::new();
        for i in 0..PIXEL_COUNT {
            if self.selection[i] && self.pixels[i] {
                self.overlay[i] = true;
                self.pixels[i] = false;
                mods.push(i);
            }
        }
        mods
    }

    /// Erase every selected pixel from both planes and drop the selection
    ///
    /// Returns the indices whose live pixel was cleared.
    pub fn delete_selection(&mut self) -> Vec<usize> {
        let mut mods = Vec::new();
        for i in 0..PIXEL_COUNT {
            if self.selection[i] {
                self.overlay[i] = false;
                if self.pixels[i] {
                    self.pixels[i] = false;
                    mods.push(i);
                }
            }
            self.selection[i] = false;
        }
        mods
    }

    /// Shift selection and overlay one pixel to the right, wrapping around
    pub fn rotate_right(&mut self) {
        self.selection.rotate_right(1);
        self.overlay.rotate_right(1);
    }

    /// Shift selection and overlay one pixel to the left, wrapping around
    pub fn rotate_left(&mut self) {
        self.selection.rotate_left(1);
        self.overlay.rotate_left(1);
    }

    /// Apply staged palette codes
    ///
    /// When both codes change, the background is written silently so that
    /// observers are notified once, by the foreground write.
    pub fn update(&mut self, color: Option<u8>, bg_color: Option<u8>) {
        match (color, bg_color) {
            (Some(color), Some(bg_color)) => {
                self.bg_palette_code.silent_set(bg_color);
                self.palette_code.set(color);
            }
            (Some(color), None) => self.palette_code.set(color),
            (None, Some(bg_color)) => self.bg_palette_code.set(bg_color),
            (None, None) => {}
        }
    }

    /// Write the foreground code back to itself to notify observers
    pub fn refresh(&mut self) {
        let code = self.palette_code.value();
        self.palette_code.set(code);
    }

    pub fn color(&self, system: ColorSystem) -> u32 {
        system.rgb(self.palette_code.value())
    }

    pub fn bg_color(&self, system: ColorSystem) -> u32 {
        system.rgb(self.bg_palette_code.value())
    }

    /// Registers driving the left half of the screen (pixels 0..20)
    pub fn registers(&self) -> PlayfieldRegisters {
        PlayfieldRegisters::pack(&self.pixels[..HALF_PIXEL_COUNT])
    }

    /// Registers driving the right half of the screen (pixels 20..40)
    pub fn neighbor_registers(&self) -> PlayfieldRegisters {
        PlayfieldRegisters::pack(&self.pixels[HALF_PIXEL_COUNT..])
    }

    pub fn pf0(&self) -> u8 {
        self.registers().pf0
    }

    pub fn pf1(&self) -> u8 {
        self.registers().pf1
    }

    pub fn pf2(&self) -> u8 {
        self.registers().pf2
    }

    pub fn pf0_neighbor(&self) -> u8 {
        self.neighbor_registers().pf0
    }

    pub fn pf1_neighbor(&self) -> u8 {
        self.neighbor_registers().pf1
    }

    pub fn pf2_neighbor(&self) -> u8 {
        self.neighbor_registers().pf2
    }
}

impl Default for ScanlineModel {
    fn default() -> Self {
        Self::new(0x00, 0x00)
    }
}
