// PF0/PF1/PF2 register encoding
//
// The TIA scans the playfield registers in an unusual order:
//   PF0 bits 4..7  -> pixels 0..3   (low nibble unused)
//   PF1 bits 7..0  -> pixels 4..11  (most significant bit first)
//   PF2 bits 0..7  -> pixels 12..19 (least significant bit first)
// The same layout drives the right half of the screen from pixels 20..39.

use crate::model::HALF_PIXEL_COUNT;

/// Register bytes for one 20-pixel half of a scanline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayfieldRegisters {
    pub pf0: u8,
    pub pf1: u8,
    pub pf2: u8,
}

impl PlayfieldRegisters {
    /// Pack 20 pixels into register bytes
    ///
    /// # Panics
    /// Panics if `half` holds fewer than 20 pixels.
    pub fn pack(half: &[bool]) -> Self {
        let half = &half[..HALF_PIXEL_COUNT];

        let pf0 = half[0..4]
            .iter()
            .enumerate()
            .filter(|(_, lit)| **lit)
            .fold(0u8, |acc, (i, _)| acc | (0x10 << i));

        let pf1 = half[4..12]
            .iter()
            .enumerate()
            .filter(|(_, lit)| **lit)
            .fold(0u8, |acc, (i, _)| acc | (0x80 >> i));

        let pf2 = half[12..20]
            .iter()
            .enumerate()
            .filter(|(_, lit)| **lit)
            .fold(0u8, |acc, (i, _)| acc | (0x01 << i));

        Self { pf0, pf1, pf2 }
    }

    pub fn bytes(&self) -> [u8; 3] {
        [self.pf0, self.pf1, self.pf2]
    }
}
