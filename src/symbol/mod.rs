// Fonts and symbols for the text tool
//
// A font file is a JSON object mapping a character to its glyph:
//
//   { "A": { "width": 3, "height": 5, "pixels": { "0": [1], "1": [0, 2] } } }
//
// `pixels` maps a row offset to the column offsets lit on that row. Font
// files carry the `.font` extension and are registered under their file
// stem.

use crate::model::PIXEL_COUNT;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension of font files
pub const FONT_EXTENSION: &str = "font";

/// Widest glyph accepted: one full scanline
pub const MAX_GLYPH_WIDTH: usize = PIXEL_COUNT;

/// Tallest glyph accepted
pub const MAX_GLYPH_HEIGHT: usize = 256;

/// Font error types
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Invalid font '{font}': {reason}")]
    Format { font: String, reason: String },

    #[error("Font {0} not found")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FontResult<T> = Result<T, FontError>;

/// A glyph: lit `(x, y)` offsets relative to its top-left corner
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Symbol {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<(usize, usize)>,
}

impl Symbol {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: Vec::new(),
        }
    }

    /// Add a lit pixel at column `x`, row `y`
    pub fn add(mut self, x: usize, y: usize) -> Self {
        self.pixels.push((x, y));
        self
    }
}

/// On-disk glyph layout
#[derive(Debug, Deserialize)]
struct GlyphData {
    width: usize,
    height: usize,
    #[serde(default)]
    pixels: BTreeMap<String, Vec<usize>>,
}

/// A named set of glyphs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Font {
    pub name: String,
    glyphs: BTreeMap<char, Symbol>,
}

impl Font {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            glyphs: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, c: char, symbol: Symbol) {
        self.glyphs.insert(c, symbol);
    }

    /// Glyph for `c`, falling back to its lowercase form
    pub fn glyph(&self, c: char) -> Option<&Symbol> {
        self.glyphs.get(&c).or_else(|| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => self.glyphs.get(&l),
                _ => None,
            }
        })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }

    /// Parse a font from its JSON text
    pub fn from_json(name: &str, json: &str) -> FontResult<Self> {
        let format_error = |reason: String| FontError::Format {
            font: name.to_string(),
            reason,
        };

        let data: BTreeMap<String, GlyphData> =
            serde_json::from_str(json).map_err(|e| format_error(e.to_string()))?;

        let mut font = Font::new(name);
        for (key, glyph) in data {
            let mut chars = key.chars();
            let c = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(format_error(format!("glyph key '{}' is not one character", key))),
            };

            if glyph.width > MAX_GLYPH_WIDTH || glyph.height > MAX_GLYPH_HEIGHT {
                return Err(format_error(format!(
                    "glyph '{}' is {}x{}, larger than {}x{}",
                    key, glyph.width, glyph.height, MAX_GLYPH_WIDTH, MAX_GLYPH_HEIGHT
                )));
            }

            let mut symbol = Symbol::new(glyph.width, glyph.height);
            for (row, columns) in glyph.pixels {
                let y: usize = row
                    .trim()
                    .parse()
                    .ok()
                    .filter(|&y| y < MAX_GLYPH_HEIGHT)
                    .ok_or_else(|| format_error(format!("glyph '{}' has row '{}'", key, row)))?;
                for x in columns {
                    if x >= MAX_GLYPH_WIDTH {
                        return Err(format_error(format!(
                            "glyph '{}' has column {} on row {}",
                            key, x, y
                        )));
                    }
                    symbol = symbol.add(x, y);
                }
            }

            font.insert(c, symbol);
        }

        Ok(font)
    }

    /// Load a font file, named after its file stem
    pub fn load(path: &Path) -> FontResult<Self> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&name, &json)
    }
}

/// Fonts available to the text tool, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    fonts: BTreeMap<String, Font>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every font found in `dirs`; missing directories are skipped
    pub fn from_dirs(dirs: &[PathBuf]) -> Self {
        let mut registry = Self::new();
        for dir in dirs {
            let loaded = registry.load_dir(dir);
            if loaded > 0 {
                log::info!("Loaded {} fonts from {}", loaded, dir.display());
            }
        }
        registry
    }

    /// Load the `.font` files directly inside `dir`
    ///
    /// Unreadable or malformed files are logged and skipped, as are fonts
    /// whose name is already registered. Returns the number of fonts loaded.
    pub fn load_dir(&mut self, dir: &Path) -> usize {
        if !dir.is_dir() {
            return 0;
        }

        let mut loaded = 0;
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|s| s.to_str()) != Some(FONT_EXTENSION)
            {
                continue;
            }

            match Font::load(path) {
                Ok(font) if self.fonts.contains_key(&font.name) => {
                    log::debug!("Font '{}' already loaded, skipping {}", font.name, path.display());
                }
                Ok(font) => {
                    log::debug!("Font '{}' has {} glyphs", font.name, font.len());
                    self.insert(font);
                    loaded += 1;
                }
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        loaded
    }

    /// Register a font, replacing any font with the same name
    pub fn insert(&mut self, font: Font) {
        self.fonts.insert(font.name.clone(), font);
    }

    pub fn get(&self, name: &str) -> FontResult<&Font> {
        self.fonts
            .get(name)
            .ok_or_else(|| FontError::NotFound(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TINY: &str = r#"{
        "a": { "width": 2, "height": 2, "pixels": { "0": [0, 1], "1": [1] } },
        "-": { "width": 1, "height": 1, "pixels": { "0": [0] } }
    }"#;

    #[test]
    fn test_parse_font() {
        let font = Font::from_json("tiny", TINY).unwrap();
        assert_eq!(font.len(), 2);

        let a = font.glyph('a').unwrap();
        assert_eq!(a.width, 2);
        assert_eq!(a.pixels, vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_lowercase_fallback() {
        let font = Font::from_json("tiny", TINY).unwrap();
        assert!(font.glyph('A').is_some());
        assert!(font.glyph('b').is_none());
        assert!(font.glyph('B').is_none());
    }

    #[test]
    fn test_malformed_fonts() {
        assert!(matches!(
            Font::from_json("bad", "[1, 2]"),
            Err(FontError::Format { .. })
        ));
        assert!(matches!(
            Font::from_json("bad", r#"{"ab": {"width": 1, "height": 1, "pixels": {}}}"#),
            Err(FontError::Format { .. })
        ));
        assert!(matches!(
            Font::from_json("bad", r#"{"a": {"width": 1, "height": 1, "pixels": {"x": [0]}}}"#),
            Err(FontError::Format { .. })
        ));
        assert!(matches!(
            Font::from_json("bad", r#"{"a": {"height": 1}}"#),
            Err(FontError::Format { .. })
        ));
    }

    #[test]
    fn test_oversized_glyphs_are_rejected() {
        let cases = [
            r#"{"a": {"width": 18446744073709551615, "height": 1, "pixels": {"0": [0]}}}"#,
            r#"{"a": {"width": 41, "height": 1, "pixels": {}}}"#,
            r#"{"a": {"width": 1, "height": 257, "pixels": {}}}"#,
            r#"{"a": {"width": 1, "height": 1, "pixels": {"0": [18446744073709551615]}}}"#,
            r#"{"a": {"width": 1, "height": 1, "pixels": {"0": [40]}}}"#,
            r#"{"a": {"width": 1, "height": 1, "pixels": {"256": [0]}}}"#,
        ];
        for case in cases {
            assert!(
                matches!(Font::from_json("big", case), Err(FontError::Format { .. })),
                "accepted {}",
                case
            );
        }

        let widest = r#"{"a": {"width": 40, "height": 256, "pixels": {"255": [39]}}}"#;
        assert_eq!(Font::from_json("ok", widest).unwrap().glyph('a').unwrap().pixels, vec![(39, 255)]);
    }

    #[test]
    fn test_registry_loads_font_files_only() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tiny.font"), TINY).unwrap();
        std::fs::write(dir.path().join("broken.font"), "{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), TINY).unwrap();

        let registry = FontRegistry::from_dirs(&[dir.path().to_path_buf()]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["tiny"]);
        assert!(registry.get("tiny").is_ok());
        assert!(matches!(registry.get("big"), Err(FontError::NotFound(_))));
    }

    #[test]
    fn test_missing_directory_is_skipped() {
        let registry = FontRegistry::from_dirs(&[PathBuf::from("/nonexistent/fonts")]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_first_directory_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::write(first.path().join("tiny.font"), TINY).unwrap();
        std::fs::write(
            second.path().join("tiny.font"),
            r#"{"z": {"width": 1, "height": 1, "pixels": {"0": [0]}}}"#,
        )
        .unwrap();

        let registry =
            FontRegistry::from_dirs(&[first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("tiny").unwrap(),
            &Font::from_json("tiny", TINY).unwrap()
        );
    }
}
