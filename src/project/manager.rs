// Project manager for loading and saving playfields

use crate::model::{NewPlayfield, PlayfieldModel};
use crate::project::serialization::*;
use std::path::Path;

/// Project error types
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Invalid project format: {0}")]
    Format(String),

    #[error("Unknown playfield mode: {0}")]
    UnknownMode(String),

    #[error("Unknown color system: {0}")]
    UnknownColorSystem(String),

    #[error("Project validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProjectError {
    /// Whether the file content, rather than the file system, is at fault
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ProjectError::Format(_)
                | ProjectError::UnknownMode(_)
                | ProjectError::UnknownColorSystem(_)
                | ProjectError::Json(_)
        )
    }
}

/// Project manager - handles creating, saving and loading playfields
#[derive(Debug, Clone)]
pub struct ProjectManager {
    /// Application version written into saved projects
    version: String,
}

impl ProjectManager {
    /// Create a new project manager
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Create a new, empty playfield
    pub fn create(&self, params: &NewPlayfield) -> Result<PlayfieldModel, ProjectError> {
        if params.name.trim().is_empty() {
            return Err(ProjectError::ValidationFailed(
                "Playfield name cannot be empty".to_string(),
            ));
        }

        if params.scanline_count() == 0 {
            return Err(ProjectError::ValidationFailed(
                "Playfield needs at least one scanline".to_string(),
            ));
        }

        Ok(PlayfieldModel::from_new(params))
    }

    /// Save a playfield as project JSON
    ///
    /// On success the playfield remembers the path and is no longer marked
    /// as modified.
    pub fn save<P: AsRef<Path>>(
        &self,
        pf: &mut PlayfieldModel,
        path: P,
    ) -> Result<(), ProjectError> {
        let path = path.as_ref();
        let json = serialize_to_json(pf, &self.version)?;
        std::fs::write(path, json)?;

        pf.filename = Some(path.to_path_buf());
        pf.need_save = false;

        log::info!(
            "Saved playfield '{}' ({} scanlines) to {}",
            pf.name,
            pf.scanline_count(),
            path.display()
        );
        Ok(())
    }

    /// Load a playfield from project JSON
    ///
    /// The file is validated completely before the playfield is built.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<PlayfieldModel, ProjectError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let mut pf = deserialize_from_json(&json)?;
        pf.filename = Some(path.to_path_buf());

        log::info!(
            "Loaded playfield '{}' ({} scanlines) from {}",
            pf.name,
            pf.scanline_count(),
            path.display()
        );
        Ok(pf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorSystem, PlayfieldMode};
    use tempfile::TempDir;

    #[test]
    fn test_create_rejects_empty_name() {
        let manager = ProjectManager::new("test");
        let params = NewPlayfield::new("  ", PlayfieldMode::Mirror, ColorSystem::NTSC);
        assert!(matches!(
            manager.create(&params),
            Err(ProjectError::ValidationFailed(_))
        ));

        let params = NewPlayfield::new("ok", PlayfieldMode::Mirror, ColorSystem::NTSC).with_scanlines(0);
        assert!(manager.create(&params).is_err());
    }

    #[test]
    fn test_create_uses_default_height() {
        let manager = ProjectManager::new("test");
        let params = NewPlayfield::new("title", PlayfieldMode::Symmetric, ColorSystem::SECAM);
        let pf = manager.create(&params).unwrap();
        assert_eq!(pf.scanline_count(), 242);
        assert_eq!(pf.mode, PlayfieldMode::Symmetric);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("title.pppp");
        let manager = ProjectManager::new("202104.A");

        let mut pf = PlayfieldModel::new("title", PlayfieldMode::Asymmetric, ColorSystem::NTSC, 4);
        pf.lines_mut()[3].pixels[39] = true;
        pf.need_save = true;

        manager.save(&mut pf, &path).unwrap();
        assert!(!pf.need_save);
        assert_eq!(pf.filename.as_deref(), Some(path.as_path()));

        let loaded = manager.load(&path).unwrap();
        assert_eq!(loaded.scanline_count(), 4);
        assert!(loaded.lines()[3].pixels[39]);
        assert_eq!(loaded.filename.as_deref(), Some(path.as_path()));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"version\":\"202104.A\""));
    }

    #[test]
    fn test_load_missing_file() {
        let manager = ProjectManager::new("test");
        let err = manager.load("/nonexistent/file.pppp").unwrap_err();
        assert!(matches!(err, ProjectError::Io(_)));
        assert!(!err.is_format_error());
    }
}
