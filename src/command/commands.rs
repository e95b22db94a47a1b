// Concrete command implementations

use crate::command::trait_def::{Command, UndoableCommand};
use crate::model::{PIXEL_COUNT, ScanlineModel};
use std::collections::{BTreeMap, BTreeSet};

/// One pixel write: light or clear `(x, y)` and use `code` for the color
/// matching the new status (foreground when lit, background when unlit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelUpdate {
    pub x: usize,
    pub y: usize,
    pub status: bool,
    pub code: u8,
}

impl PixelUpdate {
    pub fn new(x: usize, y: usize, status: bool, code: u8) -> Self {
        Self { x, y, status, code }
    }
}

/// Codes staged for one line while a batch of pixel updates is applied
#[derive(Debug, Default, Clone, Copy)]
struct StagedCodes {
    color: Option<u8>,
    bg_color: Option<u8>,
}

/// Command to write a batch of pixels
///
/// Palette codes are per line, so color changes are staged while walking the
/// batch and applied once per affected line afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePixels {
    pub updates: Vec<PixelUpdate>,
}

impl UpdatePixels {
    pub fn new(updates: Vec<PixelUpdate>) -> Self {
        Self { updates }
    }

    /// A batch holding a single pixel write
    pub fn single(x: usize, y: usize, status: bool, code: u8) -> Self {
        Self::new(vec![PixelUpdate::new(x, y, status, code)])
    }

    /// Clear every pixel of `scanline_count` lines, using `code` as background
    pub fn clear_all(scanline_count: usize, code: u8) -> Self {
        let updates = (0..scanline_count)
            .flat_map(|y| (0..PIXEL_COUNT).map(move |x| PixelUpdate::new(x, y, false, code)))
            .collect();
        Self::new(updates)
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

impl UndoableCommand for UpdatePixels {
    fn execute(&self, lines: &mut [ScanlineModel]) -> Option<Command> {
        let mut inverse = Vec::new();
        let mut staged: BTreeMap<usize, StagedCodes> = BTreeMap::new();

        for update in &self.updates {
            let line = &mut lines[update.y];
            let current = line.pixels[update.x];
            let color = line.palette_code();
            let bg_color = line.bg_palette_code();

            if current != update.status {
                let codes = staged.entry(update.y).or_default();
                if update.status {
                    codes.color = Some(update.code);
                } else {
                    codes.bg_color = Some(update.code);
                }

                inverse.push(PixelUpdate::new(
                    update.x,
                    update.y,
                    current,
                    if current { color } else { bg_color },
                ));
                line.pixels[update.x] = update.status;
            } else if update.status {
                if color != update.code {
                    staged.entry(update.y).or_default().color = Some(update.code);
                    inverse.push(PixelUpdate::new(update.x, update.y, current, color));
                }
            } else if bg_color != update.code {
                staged.entry(update.y).or_default().bg_color = Some(update.code);
                inverse.push(PixelUpdate::new(update.x, update.y, current, bg_color));
            }
        }

        if inverse.is_empty() {
            return None;
        }

        // A status flip stages the code of the *new* status while its inverse
        // entry carries the code of the old one. Lines whose other code has no
        // inverse entry to bring it back get an explicit restore.
        let fg_restored: BTreeSet<usize> =
            inverse.iter().filter(|u| u.status).map(|u| u.y).collect();
        let bg_restored: BTreeSet<usize> =
            inverse.iter().filter(|u| !u.status).map(|u| u.y).collect();
        let mut restores: Vec<Command> = Vec::new();

        for (&y, codes) in &staged {
            let line = &mut lines[y];
            let color = line.palette_code();
            let bg_color = line.bg_palette_code();

            if let Some(code) = codes.color
                && code != color
                && !fg_restored.contains(&y)
            {
                restores.push(UpdateLinePaletteCode::new(y, color).into());
            }
            if let Some(code) = codes.bg_color
                && code != bg_color
                && !bg_restored.contains(&y)
            {
                restores.push(UpdateLineBackgroundPaletteCode::new(y, bg_color).into());
            }

            line.update(codes.color, codes.bg_color);
        }

        let inverse = Command::UpdatePixels(UpdatePixels::new(inverse));
        if restores.is_empty() {
            Some(inverse)
        } else {
            let mut group = CommandGroup::new();
            group.push(inverse);
            for restore in restores {
                group.push(restore);
            }
            Some(group.into())
        }
    }

    fn description(&self) -> String {
        match self.updates.as_slice() {
            [single] => format!(
                "{} pixel ({}, {})",
                if single.status { "Draw" } else { "Erase" },
                single.x,
                single.y
            ),
            updates => format!("Update {} pixels", updates.len()),
        }
    }
}

/// Command to set one line's foreground palette code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateLinePaletteCode {
    pub y: usize,
    pub code: u8,
}

impl UpdateLinePaletteCode {
    pub fn new(y: usize, code: u8) -> Self {
        Self { y, code }
    }
}

impl UndoableCommand for UpdateLinePaletteCode {
    fn execute(&self, lines: &mut [ScanlineModel]) -> Option<Command> {
        let line = &mut lines[self.y];
        let previous = line.palette_code();
        if previous == self.code {
            return None;
        }

        line.palette_code.set(self.code);
        Some(UpdateLinePaletteCode::new(self.y, previous).into())
    }

    fn description(&self) -> String {
        format!("Set line {} color to ${:02X}", self.y, self.code)
    }
}

/// Command to set one line's background palette code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateLineBackgroundPaletteCode {
    pub y: usize,
    pub code: u8,
}

impl UpdateLineBackgroundPaletteCode {
    pub fn new(y: usize, code: u8) -> Self {
        Self { y, code }
    }
}

impl UndoableCommand for UpdateLineBackgroundPaletteCode {
    fn execute(&self, lines: &mut [ScanlineModel]) -> Option<Command> {
        let line = &mut lines[self.y];
        let previous = line.bg_palette_code();
        if previous == self.code {
            return None;
        }

        line.bg_palette_code.set(self.code);
        Some(UpdateLineBackgroundPaletteCode::new(self.y, previous).into())
    }

    fn description(&self) -> String {
        format!("Set line {} background to ${:02X}", self.y, self.code)
    }
}

/// Ordered list of commands executed as one undo step
///
/// The inverse group replays the children's inverses in the *same* order as
/// the children ran. That restores the original state only when the children
/// touch disjoint state, which holds for the line-by-line groups built by the
/// fill operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandGroup {
    pub commands: Vec<Command>,
}

impl CommandGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: impl Into<Command>) -> &mut Self {
        self.commands.push(command.into());
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }
}

impl FromIterator<Command> for CommandGroup {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl UndoableCommand for CommandGroup {
    fn execute(&self, lines: &mut [ScanlineModel]) -> Option<Command> {
        let inverse: CommandGroup = self
            .commands
            .iter()
            .filter_map(|command| command.execute(lines))
            .collect();

        if inverse.is_empty() {
            None
        } else {
            Some(inverse.into())
        }
    }

    fn description(&self) -> String {
        match self.commands.as_slice() {
            [single] => single.description(),
            commands => format!("{} changes", commands.len()),
        }
    }
}
