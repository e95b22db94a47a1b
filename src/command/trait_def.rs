// UndoableCommand trait definition

use crate::command::commands::{
    CommandGroup, UpdateLineBackgroundPaletteCode, UpdateLinePaletteCode, UpdatePixels,
};
use crate::model::ScanlineModel;

/// Trait for commands that support undo/redo
///
/// `execute()` mutates the scanlines and returns the command that restores
/// the previous state, or `None` when nothing changed. Undoing is simply
/// executing that inverse, whose own inverse is the redo.
///
/// Execution never fails: indices are validated by whoever builds the
/// command.
///
/// # Example
/// ```
/// use playfield_pro::command::{Command, UndoableCommand, UpdateLinePaletteCode};
/// use playfield_pro::model::ScanlineModel;
///
/// let mut lines = vec![ScanlineModel::new(0x00, 0x00)];
/// let command = UpdateLinePaletteCode::new(0, 0x1E);
///
/// let inverse = command.execute(&mut lines).unwrap();
/// assert_eq!(lines[0].palette_code(), 0x1E);
///
/// inverse.execute(&mut lines);
/// assert_eq!(lines[0].palette_code(), 0x00);
///
/// // already matches: nothing to undo
/// assert!(Command::from(UpdateLinePaletteCode::new(0, 0x00))
///     .execute(&mut lines)
///     .is_none());
/// ```
pub trait UndoableCommand {
    /// Execute the command, returning its inverse if anything changed
    fn execute(&self, lines: &mut [ScanlineModel]) -> Option<Command>;

    /// Get a human-readable description of the command
    ///
    /// Used for UI display (e.g., "Undo: Set line 3 color to $1E")
    fn description(&self) -> String;
}

/// The closed set of playfield commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    UpdatePixels(UpdatePixels),
    UpdateLinePaletteCode(UpdateLinePaletteCode),
    UpdateLineBackgroundPaletteCode(UpdateLineBackgroundPaletteCode),
    Group(CommandGroup),
}

impl UndoableCommand for Command {
    fn execute(&self, lines: &mut [ScanlineModel]) -> Option<Command> {
        match self {
            Command::UpdatePixels(command) => command.execute(lines),
            Command::UpdateLinePaletteCode(command) => command.execute(lines),
            Command::UpdateLineBackgroundPaletteCode(command) => command.execute(lines),
            Command::Group(command) => command.execute(lines),
        }
    }

    fn description(&self) -> String {
        match self {
            Command::UpdatePixels(command) => command.description(),
            Command::UpdateLinePaletteCode(command) => command.description(),
            Command::UpdateLineBackgroundPaletteCode(command) => command.description(),
            Command::Group(command) => command.description(),
        }
    }
}

impl From<UpdatePixels> for Command {
    fn from(command: UpdatePixels) -> Self {
        Command::UpdatePixels(command)
    }
}

impl From<UpdateLinePaletteCode> for Command {
    fn from(command: UpdateLinePaletteCode) -> Self {
        Command::UpdateLinePaletteCode(command)
    }
}

impl From<UpdateLineBackgroundPaletteCode> for Command {
    fn from(command: UpdateLineBackgroundPaletteCode) -> Self {
        Command::UpdateLineBackgroundPaletteCode(command)
    }
}

impl From<CommandGroup> for Command {
    fn from(command: CommandGroup) -> Self {
        Command::Group(command)
    }
}
