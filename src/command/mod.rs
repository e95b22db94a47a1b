// Command Pattern for Undo/Redo functionality
//
// Every mutation of the playfield goes through a Command. Executing a command
// performs the mutation and returns the exact inverse command, or nothing if
// the target already matched. The inverse is what lands on the undo stack, so
// no snapshots or diffs are needed.
//
// Architecture:
// - UndoableCommand trait: execute() returning the inverse, description()
// - Command: closed set of variants (UpdatePixels, UpdateLinePaletteCode,
//   UpdateLineBackgroundPaletteCode, CommandGroup)
// - BoundedStack: fixed-capacity stack dropping the oldest entry
// - CommandManager: undo/redo stacks
//
// Commands address scanlines by index and run against a slice of
// ScanlineModel; callers validate coordinates before building commands.

pub mod commands;
pub mod manager;
pub mod stack;
pub mod trait_def;

pub use commands::{
    CommandGroup, PixelUpdate, UpdateLineBackgroundPaletteCode, UpdateLinePaletteCode,
    UpdatePixels,
};
pub use manager::CommandManager;
pub use stack::BoundedStack;
pub use trait_def::{Command, UndoableCommand};
