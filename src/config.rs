// Editor configuration
//
// Built-in defaults, optionally overridden from the environment:
//   FONTS_DIR   first directory searched for `.font` files (default ".")
//   PPP_ZOOM    initial zoom factor, 1..=40

use crate::model::{MAX_ZOOM, MIN_ZOOM};
use std::path::PathBuf;

/// Version string written into projects and export headers
pub const APP_VERSION: &str = "202104.A";

pub const FONTS_DIR_VAR: &str = "FONTS_DIR";
pub const ZOOM_VAR: &str = "PPP_ZOOM";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub version: String,
    /// Searched in order; a font found in an earlier directory wins
    pub fonts_dirs: Vec<PathBuf>,
    pub default_zoom: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: APP_VERSION.to_string(),
            fonts_dirs: default_fonts_dirs(PathBuf::from(".")),
            default_zoom: MIN_ZOOM,
        }
    }
}

fn default_fonts_dirs(first: PathBuf) -> Vec<PathBuf> {
    let mut dirs = vec![first];
    if let Some(data_dir) = dirs::data_dir() {
        dirs.push(data_dir.join("playfield-pro").join("fonts"));
    }
    dirs
}

impl EditorConfig {
    /// Defaults with the process environment applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides read through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(FONTS_DIR_VAR).filter(|dir| !dir.is_empty()) {
            config.fonts_dirs = default_fonts_dirs(PathBuf::from(dir));
        }

        if let Some(value) = lookup(ZOOM_VAR) {
            config.default_zoom = parse_zoom(&value)?;
        }

        Ok(config)
    }
}

fn parse_zoom(value: &str) -> Result<u8, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: ZOOM_VAR,
        value: value.to_string(),
        reason,
    };

    let zoom: u8 = value.trim().parse().map_err(|e| invalid(format!("{}", e)))?;
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(invalid(format!("expected {}..={}", MIN_ZOOM, MAX_ZOOM)));
    }
    Ok(zoom)
}
