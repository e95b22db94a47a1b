// Assembly export
//
// Two layouts are produced, both as `.byte` directives with `$XX` hex:
// - row templates: one line per scanline, columns in the order named by the
//   template (e.g. PF0_PF1_PF2_COLUPF_COLUBK)
// - register blocks: one labelled block per register, 8 bytes per line
//
// The packed PF0_COLUxx columns use the unused low nibble of PF0 to carry a
// color: the high nibble of the code on the left half, the low nibble on the
// right half.

use crate::model::{PlayfieldMode, PlayfieldModel, ScanlineModel};
use std::fmt;
use std::str::FromStr;

/// Values written per `.byte` line of a register block
pub const BYTES_PER_ROW: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

/// One byte column of a row template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Pf0,
    Pf1,
    Pf2,
    Pf0Neighbor,
    Pf1Neighbor,
    Pf2Neighbor,
    Colupf,
    Colubk,
    Pf0Colupf,
    Pf0NeighborColupf,
    Pf0Colubk,
    Pf0NeighborColubk,
}

impl Column {
    fn value(self, line: &ScanlineModel) -> u8 {
        let color = line.palette_code();
        let bg_color = line.bg_palette_code();

        match self {
            Column::Pf0 => line.pf0(),
            Column::Pf1 => line.pf1(),
            Column::Pf2 => line.pf2(),
            Column::Pf0Neighbor => line.pf0_neighbor(),
            Column::Pf1Neighbor => line.pf1_neighbor(),
            Column::Pf2Neighbor => line.pf2_neighbor(),
            Column::Colupf => color,
            Column::Colubk => bg_color,
            Column::Pf0Colupf => line.pf0() | ((color & 0xF0) >> 4),
            Column::Pf0NeighborColupf => line.pf0_neighbor() | (color & 0x0F),
            Column::Pf0Colubk => line.pf0() | ((bg_color & 0xF0) >> 4),
            Column::Pf0NeighborColubk => line.pf0_neighbor() | (bg_color & 0x0F),
        }
    }
}

/// Named column layouts for row export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsmTemplate {
    Pf,
    PfPf,
    PfColupfColubk,
    PfColupf,
    PfColubk,
    PfPfColupfColubk,
    PfPfColupf,
    PfPfColubk,
    PackedColupf,
    PackedColubk,
    PackedColupfColubk,
    PackedColubkColupf,
    ColupfColubkPf,
    ColupfPf,
    ColubkPf,
    ColupfColubkPfPf,
    ColupfPfPf,
    ColubkPfPf,
}

impl AsmTemplate {
    pub const ALL: [AsmTemplate; 18] = [
        AsmTemplate::Pf,
        AsmTemplate::PfPf,
        AsmTemplate::PfColupfColubk,
        AsmTemplate::PfColupf,
        AsmTemplate::PfColubk,
        AsmTemplate::PfPfColupfColubk,
        AsmTemplate::PfPfColupf,
        AsmTemplate::PfPfColubk,
        AsmTemplate::PackedColupf,
        AsmTemplate::PackedColubk,
        AsmTemplate::PackedColupfColubk,
        AsmTemplate::PackedColubkColupf,
        AsmTemplate::ColupfColubkPf,
        AsmTemplate::ColupfPf,
        AsmTemplate::ColubkPf,
        AsmTemplate::ColupfColubkPfPf,
        AsmTemplate::ColupfPfPf,
        AsmTemplate::ColubkPfPf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AsmTemplate::Pf => "PF0_PF1_PF2",
            AsmTemplate::PfPf => "PF0_PF1_PF2_PF0_PF1_PF2",
            AsmTemplate::PfColupfColubk => "PF0_PF1_PF2_COLUPF_COLUBK",
            AsmTemplate::PfColupf => "PF0_PF1_PF2_COLUPF",
            AsmTemplate::PfColubk => "PF0_PF1_PF2_COLUBK",
            AsmTemplate::PfPfColupfColubk => "PF0_PF1_PF2_PF0_PF1_PF2_COLUPF_COLUBK",
            AsmTemplate::PfPfColupf => "PF0_PF1_PF2_PF0_PF1_PF2_COLUPF",
            AsmTemplate::PfPfColubk => "PF0_PF1_PF2_PF0_PF1_PF2_COLUBK",
            AsmTemplate::PackedColupf => "PF0_COLUPF_PF1_PF2_PF0_COLUPF_PF1_PF2",
            AsmTemplate::PackedColubk => "PF0_COLUBK_PF1_PF2_PF0_COLUBK_PF1_PF2",
            AsmTemplate::PackedColupfColubk => "PF0_COLUPF_PF1_PF2_PF0_COLUPF_PF1_PF2_COLUBK",
            AsmTemplate::PackedColubkColupf => "PF0_COLUBK_PF1_PF2_PF0_COLUBK_PF1_PF2_COLUPF",
            AsmTemplate::ColupfColubkPf => "COLUPF_COLUBK_PF0_PF1_PF2",
            AsmTemplate::ColupfPf => "COLUPF_PF0_PF1_PF2",
            AsmTemplate::ColubkPf => "COLUBK_PF0_PF1_PF2",
            AsmTemplate::ColupfColubkPfPf => "COLUPF_COLUBK_PF0_PF1_PF2_PF0_PF1_PF2",
            AsmTemplate::ColupfPfPf => "COLUPF_PF0_PF1_PF2_PF0_PF1_PF2",
            AsmTemplate::ColubkPfPf => "COLUBK_PF0_PF1_PF2_PF0_PF1_PF2",
        }
    }

    fn columns(&self) -> &'static [Column] {
        use Column::*;

        match self {
            AsmTemplate::Pf => &[Pf0, Pf1, Pf2],
            AsmTemplate::PfPf => &[Pf0, Pf1, Pf2, Pf0Neighbor, Pf1Neighbor, Pf2Neighbor],
            AsmTemplate::PfColupfColubk => &[Pf0, Pf1, Pf2, Colupf, Colubk],
            AsmTemplate::PfColupf => &[Pf0, Pf1, Pf2, Colupf],
            AsmTemplate::PfColubk => &[Pf0, Pf1, Pf2, Colubk],
            AsmTemplate::PfPfColupfColubk => &[
                Pf0,
                Pf1,
                Pf2,
                Pf0Neighbor,
                Pf1Neighbor,
                Pf2Neighbor,
                Colupf,
                Colubk,
            ],
            AsmTemplate::PfPfColupf => {
                &[Pf0, Pf1, Pf2, Pf0Neighbor, Pf1Neighbor, Pf2Neighbor, Colupf]
            }
            AsmTemplate::PfPfColubk => {
                &[Pf0, Pf1, Pf2, Pf0Neighbor, Pf1Neighbor, Pf2Neighbor, Colubk]
            }
            AsmTemplate::PackedColupf => {
                &[Pf0Colupf, Pf1, Pf2, Pf0NeighborColupf, Pf1Neighbor, Pf2Neighbor]
            }
            AsmTemplate::PackedColubk => {
                &[Pf0Colubk, Pf1, Pf2, Pf0NeighborColubk, Pf1Neighbor, Pf2Neighbor]
            }
            AsmTemplate::PackedColupfColubk => &[
                Pf0Colupf,
                Pf1,
                Pf2,
                Pf0NeighborColupf,
                Pf1Neighbor,
                Pf2Neighbor,
                Colubk,
            ],
            AsmTemplate::PackedColubkColupf => &[
                Pf0Colubk,
                Pf1,
                Pf2,
                Pf0NeighborColubk,
                Pf1Neighbor,
                Pf2Neighbor,
                Colupf,
            ],
            AsmTemplate::ColupfColubkPf => &[Colupf, Colubk, Pf0, Pf1, Pf2],
            AsmTemplate::ColupfPf => &[Colupf, Pf0, Pf1, Pf2],
            AsmTemplate::ColubkPf => &[Colubk, Pf0, Pf1, Pf2],
            AsmTemplate::ColupfColubkPfPf => &[
                Colupf,
                Colubk,
                Pf0,
                Pf1,
                Pf2,
                Pf0Neighbor,
                Pf1Neighbor,
                Pf2Neighbor,
            ],
            AsmTemplate::ColupfPfPf => {
                &[Colupf, Pf0, Pf1, Pf2, Pf0Neighbor, Pf1Neighbor, Pf2Neighbor]
            }
            AsmTemplate::ColubkPfPf => {
                &[Colubk, Pf0, Pf1, Pf2, Pf0Neighbor, Pf1Neighbor, Pf2Neighbor]
            }
        }
    }

    /// The `.byte` line for scanline `y`
    pub fn row(&self, y: usize, line: &ScanlineModel) -> String {
        let bytes: Vec<String> = self
            .columns()
            .iter()
            .map(|column| hex_byte(column.value(line)))
            .collect();
        format!("\t.byte {}\t; {}", bytes.join(", "), y)
    }
}

impl fmt::Display for AsmTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AsmTemplate {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AsmTemplate::ALL
            .into_iter()
            .find(|template| template.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ExportError::UnknownTemplate(s.to_string()))
    }
}

fn hex_byte(value: u8) -> String {
    format!("${:02X}", value)
}

/// First line of every export
pub fn header(version: &str) -> String {
    format!("\t; auto-generated by Playfield Pixel Perfect Pro {}", version)
}

/// One `.byte` line per scanline, in the template's column order
pub fn export_rows(pf: &PlayfieldModel, template: AsmTemplate, version: &str) -> Vec<String> {
    let mut data = vec![
        header(version),
        format!("\t; {}", template.name()),
        "Data:".to_string(),
    ];
    data.extend(
        pf.lines()
            .iter()
            .enumerate()
            .map(|(y, line)| template.row(y, line)),
    );
    data
}

fn byte_rows(values: &[u8]) -> impl Iterator<Item = String> + '_ {
    values.chunks(BYTES_PER_ROW).map(|chunk| {
        let bytes: Vec<String> = chunk.iter().map(|&v| hex_byte(v)).collect();
        format!("\t.byte {}", bytes.join(", "))
    })
}

/// One labelled block per register
///
/// In Asymmetric mode the right-half bytes follow each line's left-half
/// bytes in the PF blocks; the other modes only need the left half.
pub fn export_registers(pf: &PlayfieldModel, version: &str) -> Vec<String> {
    let asymmetric = pf.mode == PlayfieldMode::Asymmetric;
    let mut pf0 = Vec::new();
    let mut pf1 = Vec::new();
    let mut pf2 = Vec::new();
    let mut colupf = Vec::new();
    let mut colubk = Vec::new();

    for line in pf.lines() {
        let left = line.registers();
        pf0.push(left.pf0);
        pf1.push(left.pf1);
        pf2.push(left.pf2);

        if asymmetric {
            let right = line.neighbor_registers();
            pf0.push(right.pf0);
            pf1.push(right.pf1);
            pf2.push(right.pf2);
        }

        colupf.push(line.palette_code());
        colubk.push(line.bg_palette_code());
    }

    let mut data = vec![header(version)];
    for (label, values) in [
        ("DataPF0:", &pf0),
        ("\nDataPF1:", &pf1),
        ("\nDataPF2:", &pf2),
        ("\nDataCOLUPF:", &colupf),
        ("\nDataCOLUBK:", &colubk),
    ] {
        data.push(label.to_string());
        data.extend(byte_rows(values));
    }
    data
}
