// Edit history of a playfield
//
// Every recorded entry is the inverse of an edit to the scanlines. Undo
// replays an inverse and files the inverse of that replay for redo.

use crate::command::stack::BoundedStack;
use crate::command::trait_def::{Command, UndoableCommand};
use crate::model::ScanlineModel;

/// Edits kept before the oldest one can no longer be undone
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Undo and redo history over a slice of scanlines
///
/// Holds two bounded stacks of inverse commands. Recording a new edit empties
/// the redo stack. Edits that change no pixel or code are not recorded. Past
/// the capacity the oldest inverse is dropped.
#[derive(Debug)]
pub struct CommandManager {
    undo_stack: BoundedStack<Command>,
    redo_stack: BoundedStack<Command>,
}

impl CommandManager {
    /// History holding the last [`DEFAULT_MAX_HISTORY`] edits
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY)
    }

    /// History holding the last `max_history` edits
    pub fn with_capacity(max_history: usize) -> Self {
        Self {
            undo_stack: BoundedStack::new(max_history),
            redo_stack: BoundedStack::new(max_history),
        }
    }

    /// Apply `command` to the scanlines and record its inverse
    ///
    /// Returns false when no pixel or code changed.
    pub fn execute(&mut self, command: &Command, lines: &mut [ScanlineModel]) -> bool {
        match command.execute(lines) {
            Some(inverse) => {
                self.push_undo(inverse);
                true
            }
            None => {
                log::debug!("No-op command skipped: {}", command.description());
                false
            }
        }
    }

    /// Record an inverse for a mutation that was already applied
    pub fn push_undo(&mut self, inverse: Command) {
        if let Some(dropped) = self.undo_stack.push(inverse) {
            log::debug!("History full, dropped: {}", dropped.description());
        }
        self.redo_stack.clear();
    }

    /// Replay the latest inverse, returning its description
    pub fn undo(&mut self, lines: &mut [ScanlineModel]) -> Option<String> {
        let Some(command) = self.undo_stack.pop() else {
            log::debug!("Nothing to undo");
            return None;
        };

        let description = command.description();
        if let Some(redo) = command.execute(lines) {
            self.redo_stack.push(redo);
        }
        log::debug!("Undo: {}", description);

        Some(description)
    }

    /// Replay the edit undone last, returning its description
    pub fn redo(&mut self, lines: &mut [ScanlineModel]) -> Option<String> {
        let Some(command) = self.redo_stack.pop() else {
            log::debug!("Nothing to redo");
            return None;
        };

        let description = command.description();
        if let Some(undo) = command.execute(lines) {
            self.undo_stack.push(undo);
        }
        log::debug!("Redo: {}", description);

        Some(description)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// What the next undo would do, e.g. "Erase pixel (3, 2)"
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.peek().map(|cmd| cmd.description())
    }

    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.peek().map(|cmd| cmd.description())
    }

    /// Forget every edit, e.g. after loading a project
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new()
    }
}
