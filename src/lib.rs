// Playfield Pixel Perfect Pro - Library exports for the CLI, tests and benchmarks

pub mod command;
pub mod config;
pub mod editing;
pub mod export;
pub mod model;
pub mod observable;
pub mod project;
pub mod symbol;

// Re-export commonly used types for convenience
pub use command::{Command, CommandGroup, CommandManager, UndoableCommand, UpdatePixels};
pub use config::{ConfigError, EditorConfig};
pub use editing::{Editor, Modifiers, MouseButton, PointerEvent, Tool, WheelEvent};
pub use export::{AsmTemplate, ExportError, export_registers, export_rows};
pub use model::{ColorSystem, NewPlayfield, PlayfieldMode, PlayfieldModel, ScanlineModel};
pub use observable::Observable;
pub use project::{ProjectError, ProjectManager};
pub use symbol::{Font, FontError, FontRegistry, Symbol};
