// Project persistence for playfields
//
// A project is a single JSON document holding the playfield name, symmetry
// mode, color system and one 7-byte record per scanline.

pub mod manager;
pub mod serialization;
pub mod types;

pub use manager::{ProjectError, ProjectManager};
pub use serialization::{deserialize_from_json, serialize_to_json};
pub use types::{ProjectFile, ScanlineRecord};

/// Default file extension of saved projects
pub const PROJECT_EXTENSION: &str = "pppp";
