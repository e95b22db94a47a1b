// Playfield data model
//
// A playfield is a vertical stack of scanlines, each holding 40 pixels split
// into two 20-pixel halves. Every half maps onto the TIA's PF0/PF1/PF2
// registers, and every scanline carries its own foreground (COLUPF) and
// background (COLUBK) palette codes.
//
// Architecture:
// - ScanlineModel: pixels, selection and overlay planes of one row
// - registers: PF0/PF1/PF2 bit layout
// - PlayfieldModel: the grid, symmetry mode, zoom and undo/redo history
// - palette: NTSC/PAL/SECAM color tables

pub mod palette;
pub mod playfield;
pub mod registers;
pub mod scanline;

pub use playfield::{CELL_HEIGHT, CELL_WIDTH, MAX_ZOOM, MIN_ZOOM, NewPlayfield, PlayfieldModel};
pub use scanline::ScanlineModel;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of pixels in one scanline
pub const PIXEL_COUNT: usize = 40;

/// Number of pixels driven by one PF0/PF1/PF2 register triple
pub const HALF_PIXEL_COUNT: usize = PIXEL_COUNT / 2;

/// How the right half of the screen relates to the left half
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayfieldMode {
    /// Both halves are drawn independently
    Asymmetric,
    /// The right half repeats the left half
    Symmetric,
    /// The right half is the left half reflected
    Mirror,
}

impl PlayfieldMode {
    pub const ALL: [PlayfieldMode; 3] = [
        PlayfieldMode::Asymmetric,
        PlayfieldMode::Symmetric,
        PlayfieldMode::Mirror,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlayfieldMode::Asymmetric => "Asymmetric",
            PlayfieldMode::Symmetric => "Symmetric",
            PlayfieldMode::Mirror => "Mirror",
        }
    }

    /// Mode with exactly this name, as written in project files
    pub fn from_name(name: &str) -> Option<Self> {
        PlayfieldMode::ALL.into_iter().find(|mode| mode.name() == name)
    }
}

impl fmt::Display for PlayfieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayfieldMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayfieldMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown playfield mode '{}'", s))
    }
}

/// Television standard, which selects the palette and default height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSystem {
    NTSC,
    PAL,
    SECAM,
}

impl ColorSystem {
    pub const ALL: [ColorSystem; 3] = [ColorSystem::NTSC, ColorSystem::PAL, ColorSystem::SECAM];

    pub fn name(&self) -> &'static str {
        match self {
            ColorSystem::NTSC => "NTSC",
            ColorSystem::PAL => "PAL",
            ColorSystem::SECAM => "SECAM",
        }
    }

    /// Color system with exactly this name, as written in project files
    pub fn from_name(name: &str) -> Option<Self> {
        ColorSystem::ALL.into_iter().find(|system| system.name() == name)
    }

    /// Visible scanlines offered for a new playfield
    pub fn default_scanlines(&self) -> usize {
        match self {
            ColorSystem::NTSC => 192,
            ColorSystem::PAL | ColorSystem::SECAM => 242,
        }
    }
}

impl fmt::Display for ColorSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorSystem::ALL
            .into_iter()
            .find(|system| system.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown color system '{}'", s))
    }
}

/// Pixel index aliased to `x` by the symmetry mode
///
/// Drawing at `x` also draws at the returned index so that the stored grid
/// matches what the hardware shows on the right half of the screen.
pub fn neighbor(mode: PlayfieldMode, x: usize) -> Option<usize> {
    match mode {
        PlayfieldMode::Asymmetric => None,
        PlayfieldMode::Mirror => Some(PIXEL_COUNT - 1 - x),
        PlayfieldMode::Symmetric => Some(if x < HALF_PIXEL_COUNT {
            x + HALF_PIXEL_COUNT
        } else {
            x - HALF_PIXEL_COUNT
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_exact_but_parsing_is_lenient() {
        assert_eq!(PlayfieldMode::from_name("Mirror"), Some(PlayfieldMode::Mirror));
        assert_eq!(PlayfieldMode::from_name("mirror"), None);
        assert_eq!("mirror".parse::<PlayfieldMode>(), Ok(PlayfieldMode::Mirror));

        assert_eq!(ColorSystem::from_name("SECAM"), Some(ColorSystem::SECAM));
        assert_eq!(ColorSystem::from_name("ntsc"), None);
        assert_eq!("ntsc".parse::<ColorSystem>(), Ok(ColorSystem::NTSC));
    }

    #[test]
    fn test_neighbor_asymmetric() {
        for x in 0..PIXEL_COUNT {
            assert_eq!(neighbor(PlayfieldMode::Asymmetric, x), None);
        }
    }

    #[test]
    fn test_neighbor_mirror() {
        assert_eq!(neighbor(PlayfieldMode::Mirror, 0), Some(39));
        assert_eq!(neighbor(PlayfieldMode::Mirror, 39), Some(0));
        assert_eq!(neighbor(PlayfieldMode::Mirror, 19), Some(20));
    }

    #[test]
    fn test_neighbor_symmetric() {
        assert_eq!(neighbor(PlayfieldMode::Symmetric, 5), Some(25));
        assert_eq!(neighbor(PlayfieldMode::Symmetric, 25), Some(5));
        assert_eq!(neighbor(PlayfieldMode::Symmetric, 0), Some(20));
        assert_eq!(neighbor(PlayfieldMode::Symmetric, 39), Some(19));
    }

    #[test]
    fn test_neighbor_is_an_involution() {
        for mode in [PlayfieldMode::Symmetric, PlayfieldMode::Mirror] {
            for x in 0..PIXEL_COUNT {
                let n = neighbor(mode, x).unwrap();
                assert_eq!(neighbor(mode, n), Some(x));
            }
        }
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("mirror".parse::<PlayfieldMode>(), Ok(PlayfieldMode::Mirror));
        assert_eq!("PAL".parse::<ColorSystem>(), Ok(ColorSystem::PAL));
        assert!("Diagonal".parse::<PlayfieldMode>().is_err());
    }

    #[test]
    fn test_default_scanlines() {
        assert_eq!(ColorSystem::NTSC.default_scanlines(), 192);
        assert_eq!(ColorSystem::PAL.default_scanlines(), 242);
        assert_eq!(ColorSystem::SECAM.default_scanlines(), 242);
    }
}
