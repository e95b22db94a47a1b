// Types for project persistence

use serde::{Deserialize, Serialize};

/// Bytes per persisted scanline: 5 packed pixel bytes, foreground, background
pub const SCANLINE_RECORD_LEN: usize = 7;

/// Index of the foreground code within a scanline record
pub const RECORD_COLOR: usize = 5;

/// Index of the background code within a scanline record
pub const RECORD_BG_COLOR: usize = 6;

/// One persisted scanline
pub type ScanlineRecord = [u8; SCANLINE_RECORD_LEN];

/// On-disk project layout
///
/// `mode` and `color_system` are kept as names here and resolved when the
/// playfield is rebuilt, so that an unknown name is reported as such rather
/// than as a JSON error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectFile {
    /// Version of the application that wrote the file
    pub version: String,
    pub name: String,
    pub mode: String,
    pub color_system: String,
    /// One record per scanline, top to bottom
    pub scanlines: Vec<ScanlineRecord>,
}
