// PlayfieldModel - the editable grid of scanlines

use crate::command::{Command, CommandManager};
use crate::model::{ColorSystem, PIXEL_COUNT, PlayfieldMode, ScanlineModel, neighbor};
use crate::observable::Observable;
use std::path::PathBuf;

/// Width of one pixel cell at zoom 1
pub const CELL_WIDTH: u32 = 12;

/// Height of one pixel cell at zoom 1
pub const CELL_HEIGHT: u32 = 2;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 40;

/// Parameters for a new, empty playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayfield {
    pub name: String,
    pub mode: PlayfieldMode,
    pub color_system: ColorSystem,
    /// Defaults to the color system's visible scanlines
    pub scanlines: Option<usize>,
}

impl NewPlayfield {
    pub fn new(name: impl Into<String>, mode: PlayfieldMode, color_system: ColorSystem) -> Self {
        Self {
            name: name.into(),
            mode,
            color_system,
            scanlines: None,
        }
    }

    pub fn with_scanlines(mut self, scanlines: usize) -> Self {
        self.scanlines = Some(scanlines);
        self
    }

    pub fn scanline_count(&self) -> usize {
        self.scanlines
            .unwrap_or_else(|| self.color_system.default_scanlines())
    }
}

/// The playfield: scanlines, symmetry mode, zoom and undo/redo history
///
/// The playfield-wide palette codes are the current drawing colors. They are
/// copied into scanlines created with the playfield and are not kept in sync
/// afterwards; each scanline owns its own codes.
#[derive(Debug)]
pub struct PlayfieldModel {
    pub name: String,
    pub mode: PlayfieldMode,
    pub color_system: ColorSystem,
    pub filename: Option<PathBuf>,
    pub need_save: bool,
    pub zoom: Observable<u8>,
    pub palette_code: Observable<u8>,
    pub bg_palette_code: Observable<u8>,
    scanlines: Vec<ScanlineModel>,
    history: CommandManager,
}

impl PlayfieldModel {
    /// Create a playfield of `scanline_count` empty lines
    pub fn new(
        name: impl Into<String>,
        mode: PlayfieldMode,
        color_system: ColorSystem,
        scanline_count: usize,
    ) -> Self {
        let palette_code = Observable::new(0x00);
        let bg_palette_code = Observable::new(0x00);
        let scanlines = (0..scanline_count)
            .map(|_| ScanlineModel::new(palette_code.value(), bg_palette_code.value()))
            .collect();

        Self::with_scanlines(name, mode, color_system, scanlines)
            .with_codes(palette_code, bg_palette_code)
    }

    /// Build a playfield around existing scanlines
    pub fn with_scanlines(
        name: impl Into<String>,
        mode: PlayfieldMode,
        color_system: ColorSystem,
        scanlines: Vec<ScanlineModel>,
    ) -> Self {
        Self {
            name: name.into(),
            mode,
            color_system,
            filename: None,
            need_save: false,
            zoom: Observable::new(MIN_ZOOM),
            palette_code: Observable::new(0x00),
            bg_palette_code: Observable::new(0x00),
            scanlines,
            history: CommandManager::new(),
        }
    }

    fn with_codes(mut self, palette_code: Observable<u8>, bg_palette_code: Observable<u8>) -> Self {
        self.palette_code = palette_code;
        self.bg_palette_code = bg_palette_code;
        self
    }

    pub fn from_new(params: &NewPlayfield) -> Self {
        Self::new(
            params.name.clone(),
            params.mode,
            params.color_system,
            params.scanline_count(),
        )
    }

    pub fn scanline_count(&self) -> usize {
        self.scanlines.len()
    }

    pub fn lines(&self) -> &[ScanlineModel] {
        &self.scanlines
    }

    pub fn lines_mut(&mut self) -> &mut [ScanlineModel] {
        &mut self.scanlines
    }

    pub fn line(&self, y: usize) -> Option<&ScanlineModel> {
        self.scanlines.get(y)
    }

    pub fn line_mut(&mut self, y: usize) -> Option<&mut ScanlineModel> {
        self.scanlines.get_mut(y)
    }

    /// Current drawing foreground code
    pub fn palette_code(&self) -> u8 {
        self.palette_code.value()
    }

    /// Current drawing background code
    pub fn bg_palette_code(&self) -> u8 {
        self.bg_palette_code.value()
    }

    pub fn neighbor(&self, x: usize) -> Option<usize> {
        neighbor(self.mode, x)
    }

    /// Run a command, recording its inverse for undo
    ///
    /// Returns true if the command changed anything.
    pub fn execute(&mut self, command: impl Into<Command>) -> bool {
        let command = command.into();
        self.history.execute(&command, &mut self.scanlines)
    }

    /// Record the inverse of a mutation already applied to the scanlines
    pub fn push_undo(&mut self, inverse: impl Into<Command>) {
        self.history.push_undo(inverse.into());
    }

    pub fn undo(&mut self) -> Option<String> {
        self.history.undo(&mut self.scanlines)
    }

    pub fn redo(&mut self) -> Option<String> {
        self.history.redo(&mut self.scanlines)
    }

    pub fn history(&self) -> &CommandManager {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn zoom(&self) -> u8 {
        self.zoom.value()
    }

    /// Set the zoom, clamped to the supported range
    pub fn set_zoom(&mut self, zoom: u8) -> u8 {
        self.zoom.set(zoom.clamp(MIN_ZOOM, MAX_ZOOM));
        self.zoom.value()
    }

    pub fn zoom_in(&mut self) -> u8 {
        let zoom = self.zoom.value();
        if zoom < MAX_ZOOM {
            self.zoom.set(zoom + 1);
        }
        self.zoom.value()
    }

    pub fn zoom_out(&mut self) -> u8 {
        let zoom = self.zoom.value();
        if zoom > MIN_ZOOM {
            self.zoom.set(zoom - 1);
        }
        self.zoom.value()
    }

    /// Canvas width at the current zoom
    pub fn width(&self) -> u32 {
        PIXEL_COUNT as u32 * CELL_WIDTH * u32::from(self.zoom())
    }

    /// Canvas height at the current zoom
    pub fn height(&self) -> u32 {
        self.scanline_count() as u32 * CELL_HEIGHT * u32::from(self.zoom())
    }

    /// Resolve a canvas position to `(x, y)`, or `None` outside the grid
    pub fn cell_at(&self, px: i32, py: i32) -> Option<(usize, usize)> {
        if px < 0 || py < 0 {
            return None;
        }

        let zoom = u32::from(self.zoom());
        let x = (px as u32 / (CELL_WIDTH * zoom)) as usize;
        let y = (py as u32 / (CELL_HEIGHT * zoom)) as usize;

        (x < PIXEL_COUNT && y < self.scanline_count()).then_some((x, y))
    }
}
