// Serialization utilities for project persistence
//
// Pixels are stored with plain MSB-first linear packing: pixel `i` lives in
// byte `i / 8`, bit `7 - i % 8`. This is unrelated to the PF0/PF1/PF2
// register layout used by the assembly export.

use crate::model::{ColorSystem, PIXEL_COUNT, PlayfieldMode, PlayfieldModel, ScanlineModel};
use crate::project::ProjectError;
use crate::project::types::*;

/// Number of bytes holding the packed pixels of one scanline
pub const PACKED_PIXEL_BYTES: usize = PIXEL_COUNT / 8;

/// Pack 40 pixels into 5 bytes, MSB first
pub fn pack_pixels(pixels: &[bool; PIXEL_COUNT]) -> [u8; PACKED_PIXEL_BYTES] {
    let mut bytes = [0u8; PACKED_PIXEL_BYTES];
    for (i, _) in pixels.iter().enumerate().filter(|(_, lit)| **lit) {
        bytes[i / 8] |= 0x80 >> (i % 8);
    }
    bytes
}

/// Unpack 5 bytes into 40 pixels, MSB first
pub fn unpack_pixels(bytes: &[u8]) -> [bool; PIXEL_COUNT] {
    std::array::from_fn(|i| bytes[i / 8] & (0x80 >> (i % 8)) != 0)
}

/// Persisted form of one scanline
pub fn scanline_to_record(line: &ScanlineModel) -> ScanlineRecord {
    let mut record = [0u8; SCANLINE_RECORD_LEN];
    record[..PACKED_PIXEL_BYTES].copy_from_slice(&pack_pixels(&line.pixels));
    record[RECORD_COLOR] = line.palette_code();
    record[RECORD_BG_COLOR] = line.bg_palette_code();
    record
}

/// Rebuild a scanline from its persisted form
pub fn scanline_from_record(record: &ScanlineRecord) -> ScanlineModel {
    let mut line = ScanlineModel::new(record[RECORD_COLOR], record[RECORD_BG_COLOR]);
    line.pixels = unpack_pixels(&record[..PACKED_PIXEL_BYTES]);
    line
}

/// Capture the persisted state of a playfield
///
/// Only pixels and codes are kept; selection, overlay, zoom and history are
/// not persisted.
pub fn serialize_playfield(pf: &PlayfieldModel, version: &str) -> ProjectFile {
    ProjectFile {
        version: version.to_string(),
        name: pf.name.clone(),
        mode: pf.mode.name().to_string(),
        color_system: pf.color_system.name().to_string(),
        scanlines: pf.lines().iter().map(scanline_to_record).collect(),
    }
}

/// Rebuild a playfield from its persisted state
pub fn deserialize_playfield(file: &ProjectFile) -> Result<PlayfieldModel, ProjectError> {
    let mode = PlayfieldMode::from_name(&file.mode)
        .ok_or_else(|| ProjectError::UnknownMode(file.mode.clone()))?;
    let color_system = ColorSystem::from_name(&file.color_system)
        .ok_or_else(|| ProjectError::UnknownColorSystem(file.color_system.clone()))?;

    let scanlines = file.scanlines.iter().map(scanline_from_record).collect();

    Ok(PlayfieldModel::with_scanlines(
        file.name.clone(),
        mode,
        color_system,
        scanlines,
    ))
}

/// Serialize a playfield to project JSON
pub fn serialize_to_json(pf: &PlayfieldModel, version: &str) -> Result<String, ProjectError> {
    serde_json::to_string(&serialize_playfield(pf, version)).map_err(ProjectError::Json)
}

/// Deserialize a playfield from project JSON
///
/// Any structural problem (missing field, wrong record length, byte out of
/// range) is reported as a format error.
pub fn deserialize_from_json(json: &str) -> Result<PlayfieldModel, ProjectError> {
    let file: ProjectFile = serde_json::from_str(json)
        .map_err(|e| ProjectError::Format(format!("Failed to parse project: {}", e)))?;
    deserialize_playfield(&file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_is_msb_first() {
        let mut pixels = [false; PIXEL_COUNT];
        pixels[0] = true;
        pixels[9] = true;
        pixels[39] = true;

        assert_eq!(pack_pixels(&pixels), [0x80, 0x40, 0x00, 0x00, 0x01]);
        assert_eq!(unpack_pixels(&[0x80, 0x40, 0x00, 0x00, 0x01]), pixels);
    }

    #[test]
    fn test_linear_packing_differs_from_registers() {
        let mut line = ScanlineModel::new(0x1E, 0x84);
        line.pixels[0] = true;
        line.pixels[2] = true;

        assert_eq!(scanline_to_record(&line), [0xA0, 0, 0, 0, 0, 0x1E, 0x84]);
        assert_eq!(line.pf0(), 0x50);
    }

    #[test]
    fn test_playfield_round_trip() {
        let mut pf = PlayfieldModel::new("logo", PlayfieldMode::Mirror, ColorSystem::PAL, 3);
        pf.lines_mut()[1].pixels[17] = true;
        pf.lines_mut()[2].update(Some(0x2A), Some(0x90));

        let json = serialize_to_json(&pf, "202104.A").unwrap();
        let loaded = deserialize_from_json(&json).unwrap();

        assert_eq!(loaded.name, "logo");
        assert_eq!(loaded.mode, PlayfieldMode::Mirror);
        assert_eq!(loaded.color_system, ColorSystem::PAL);
        assert_eq!(
            serialize_playfield(&loaded, "202104.A"),
            serialize_playfield(&pf, "202104.A")
        );
    }

    #[test]
    fn test_document_layout() {
        let pf = PlayfieldModel::new("x", PlayfieldMode::Asymmetric, ColorSystem::NTSC, 1);
        let json = serialize_to_json(&pf, "v1").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], "v1");
        assert_eq!(value["mode"], "Asymmetric");
        assert_eq!(value["color_system"], "NTSC");
        assert_eq!(value["scanlines"][0].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_malformed_documents() {
        let cases = [
            "not json",
            r#"{"version": "1", "name": "x", "mode": "Mirror", "color_system": "NTSC"}"#,
            r#"{"version": "1", "name": "x", "mode": "Mirror", "color_system": "NTSC", "scanlines": [[0, 0, 0]]}"#,
            r#"{"version": "1", "name": "x", "mode": "Mirror", "color_system": "NTSC", "scanlines": [[0, 0, 0, 0, 0, 0, 256]]}"#,
        ];
        for case in cases {
            assert!(matches!(
                deserialize_from_json(case),
                Err(ProjectError::Format(_))
            ));
        }

        let unknown_mode = r#"{"version": "1", "name": "x", "mode": "Diagonal", "color_system": "NTSC", "scanlines": []}"#;
        assert!(matches!(
            deserialize_from_json(unknown_mode),
            Err(ProjectError::UnknownMode(_))
        ));

        let unknown_system = r#"{"version": "1", "name": "x", "mode": "Mirror", "color_system": "MESECAM", "scanlines": []}"#;
        let err = deserialize_from_json(unknown_system).unwrap_err();
        assert!(matches!(err, ProjectError::UnknownColorSystem(_)));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_names_must_match_exactly() {
        let lowercase_mode = r#"{"version": "1", "name": "x", "mode": "mirror", "color_system": "NTSC", "scanlines": []}"#;
        assert!(matches!(
            deserialize_from_json(lowercase_mode),
            Err(ProjectError::UnknownMode(mode)) if mode == "mirror"
        ));

        let lowercase_system = r#"{"version": "1", "name": "x", "mode": "Mirror", "color_system": "ntsc", "scanlines": []}"#;
        assert!(matches!(
            deserialize_from_json(lowercase_system),
            Err(ProjectError::UnknownColorSystem(system)) if system == "ntsc"
        ));
    }
}
