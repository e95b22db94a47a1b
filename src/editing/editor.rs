// Editor - input dispatch for one playfield
//
// Pointer events arrive in canvas coordinates and are resolved to a cell
// before being routed by (tool, button, modifiers) to an editing operation.

use crate::config::EditorConfig;
use crate::editing::{draw, fill, rotate, selection, text};
use crate::model::{CELL_HEIGHT, CELL_WIDTH, PlayfieldModel};
use crate::symbol::{FontRegistry, FontResult};

/// Lines moved per vertical drag step of the selection
const DRAG_ROWS_PER_STEP: usize = 4;

/// Where text is stamped by [`Editor::insert_text`]
const TEXT_ORIGIN: (usize, usize) = (1, 1);

/// Toolbox tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Pen,
    Brush,
    Bucket,
    Eraser,
    Line,
    ColorPicker,
    Selection,
}

/// Button held during a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    None,
    Left,
    Right,
    Middle,
}

/// Keyboard modifiers held during an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
    };
    pub const ALT: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: true,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// A press or move of the pointer, in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(x: i32, y: i32, button: MouseButton, modifiers: Modifiers) -> Self {
        Self {
            x,
            y,
            button,
            modifiers,
        }
    }
}

/// A wheel turn; positive `delta` is away from the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    pub x: i32,
    pub y: i32,
    pub delta: i32,
    pub modifiers: Modifiers,
}

/// Direction of a selection move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Editing session over one playfield
#[derive(Debug)]
pub struct Editor {
    playfield: PlayfieldModel,
    fonts: FontRegistry,
    tool: Tool,
    prev_drag: (Option<i32>, Option<i32>),
}

impl Editor {
    pub fn new(playfield: PlayfieldModel, fonts: FontRegistry) -> Self {
        Self {
            playfield,
            fonts,
            tool: Tool::default(),
            prev_drag: (None, None),
        }
    }

    /// Open `playfield` with the configured zoom and the fonts found in the
    /// configured directories
    pub fn from_config(mut playfield: PlayfieldModel, config: &EditorConfig) -> Self {
        playfield.set_zoom(config.default_zoom);
        Self::new(playfield, FontRegistry::from_dirs(&config.fonts_dirs))
    }

    pub fn playfield(&self) -> &PlayfieldModel {
        &self.playfield
    }

    pub fn playfield_mut(&mut self) -> &mut PlayfieldModel {
        &mut self.playfield
    }

    pub fn into_playfield(self) -> PlayfieldModel {
        self.playfield
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools; leaving the selection tool commits the selection
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        if tool != Tool::Selection {
            self.commit_selection();
        }
    }

    /// Handle a button press
    ///
    /// Returns true if the event was bound to an action.
    pub fn press(&mut self, event: PointerEvent) -> bool {
        let Some((x, y)) = self.playfield.cell_at(event.x, event.y) else {
            return false;
        };

        use Tool::*;

        let tool = self.tool;
        let mods = event.modifiers;
        let plain = mods.is_empty();
        let pf = &mut self.playfield;

        match (tool, event.button) {
            (Pen, MouseButton::Left) if plain => {
                draw::draw(pf, x, y);
            }
            (Pen, MouseButton::Right) if plain => {
                draw::erase(pf, x, y);
            }
            (Eraser, MouseButton::Left) => {
                draw::erase(pf, x, y);
            }
            (Bucket, MouseButton::Left) | (Pen, MouseButton::Left)
                if tool == Bucket || mods == Modifiers::CTRL =>
            {
                fill::fill_foreground(pf, x, y);
            }
            (Bucket, MouseButton::Right) | (Pen, MouseButton::Right)
                if tool == Bucket || mods == Modifiers::CTRL =>
            {
                fill::fill_background(pf, x, y);
            }
            (Line, MouseButton::Left) | (Pen, MouseButton::Middle) if plain => {
                draw::draw_horizontal_line(pf, y);
            }
            (Line, MouseButton::Left) | (Pen, MouseButton::Middle) if mods == Modifiers::CTRL => {
                draw::draw_vertical_line(pf, x);
            }
            (ColorPicker, MouseButton::Left) | (Pen, MouseButton::Left)
                if tool == ColorPicker || mods == Modifiers::ALT =>
            {
                draw::pick_foreground(pf, x, y);
            }
            (ColorPicker, MouseButton::Right) | (Pen, MouseButton::Right)
                if tool == ColorPicker || mods == Modifiers::ALT =>
            {
                draw::pick_background(pf, y);
            }
            (Selection, MouseButton::Left) if plain => {
                draw::select(pf, x, y);
            }
            (Selection, MouseButton::Right) => {
                self.commit_selection();
            }
            _ => return false,
        }

        true
    }

    /// Handle a pointer move
    ///
    /// Returns true if the event was bound to an action.
    pub fn drag(&mut self, event: PointerEvent) -> bool {
        use Tool::*;

        let tool = self.tool;
        let plain = event.modifiers.is_empty();
        let shift = event.modifiers == Modifiers::SHIFT;

        // Moving a selection with the middle button tracks the raw cell
        // position, even outside the canvas.
        if tool == Selection && event.button == MouseButton::Middle {
            if plain {
                self.drag_selection(event);
            }
            return plain;
        }

        let Some((x, y)) = self.playfield.cell_at(event.x, event.y) else {
            return false;
        };
        let pf = &mut self.playfield;

        match (tool, event.button) {
            (Pen, MouseButton::None) if shift => {
                draw::draw(pf, x, y);
            }
            (Eraser, MouseButton::None) if shift => {
                draw::erase(pf, x, y);
            }
            (Brush, MouseButton::Left) if plain => {
                draw::draw(pf, x, y);
            }
            (Brush, MouseButton::Right) if plain => {
                draw::erase(pf, x, y);
            }
            (Selection, MouseButton::Left) if plain => {
                draw::select(pf, x, y);
            }
            _ => return false,
        }

        true
    }

    /// Handle a wheel turn
    pub fn wheel(&mut self, event: WheelEvent) -> bool {
        if self.playfield.cell_at(event.x, event.y).is_none() || event.delta == 0 {
            return false;
        }

        let up = event.delta > 0;
        if event.modifiers == Modifiers::CTRL {
            if up {
                self.playfield.zoom_in();
            } else {
                self.playfield.zoom_out();
            }
            return true;
        }

        if self.tool != Tool::Selection {
            return false;
        }

        match (event.modifiers, up) {
            (Modifiers::NONE, true) => self.move_selection(Direction::Up),
            (Modifiers::NONE, false) => self.move_selection(Direction::Down),
            (Modifiers::SHIFT, true) => self.move_selection(Direction::Left),
            (Modifiers::SHIFT, false) => self.move_selection(Direction::Right),
            _ => return false,
        }

        true
    }

    /// Status bar text for the cell under the pointer
    pub fn status(&self, px: i32, py: i32) -> Option<String> {
        let (x, y) = self.playfield.cell_at(px, py)?;
        let line = &self.playfield.lines()[y];

        Some(if line.pixels[x] {
            format!("X={}, Y={}  Color={:02X}", x, y, line.palette_code())
        } else {
            format!("X={}, Y={}", x, y)
        })
    }

    fn drag_selection(&mut self, event: PointerEvent) {
        let zoom = i32::from(self.playfield.zoom());
        // Truncates toward zero: the first cell above or left of the canvas
        // counts as cell 0.
        let x = event.x / (CELL_WIDTH as i32 * zoom);
        let y = event.y / (CELL_HEIGHT as i32 * zoom);
        let (prev_x, prev_y) = self.prev_drag;

        if let Some(prev_x) = prev_x {
            if x > prev_x {
                rotate::rotate_right(&mut self.playfield);
            } else if x < prev_x {
                rotate::rotate_left(&mut self.playfield);
            }
        }

        if let Some(prev_y) = prev_y {
            if y > prev_y {
                for _ in 0..DRAG_ROWS_PER_STEP {
                    rotate::rotate_down(&mut self.playfield);
                }
            } else if y < prev_y {
                for _ in 0..DRAG_ROWS_PER_STEP {
                    rotate::rotate_up(&mut self.playfield);
                }
            }
        }

        self.prev_drag = (Some(x), Some(y));
    }

    /// Commit the overlay into the live pixels and end any drag
    pub fn commit_selection(&mut self) -> usize {
        self.prev_drag = (None, None);
        selection::clear_selection(&mut self.playfield)
    }

    pub fn copy_selection(&mut self) {
        selection::copy_selection(&mut self.playfield);
    }

    pub fn cut_selection(&mut self) -> usize {
        selection::cut_selection(&mut self.playfield)
    }

    pub fn delete_selection(&mut self) -> usize {
        selection::delete_selection(&mut self.playfield)
    }

    pub fn move_selection(&mut self, direction: Direction) {
        let pf = &mut self.playfield;
        match direction {
            Direction::Up => rotate::rotate_up(pf),
            Direction::Down => rotate::rotate_down(pf),
            Direction::Left => rotate::rotate_left(pf),
            Direction::Right => rotate::rotate_right(pf),
        }
    }

    pub fn undo(&mut self) -> Option<String> {
        self.commit_selection();
        self.playfield.undo()
    }

    pub fn redo(&mut self) -> Option<String> {
        self.commit_selection();
        self.playfield.redo()
    }

    /// Unlight the whole playfield as one undo step
    pub fn clear(&mut self) -> bool {
        self.commit_selection();
        draw::clear(&mut self.playfield)
    }

    /// Stamp `text` near the top-left corner as a new selection
    pub fn insert_text(&mut self, font: &str, text: &str) -> FontResult<usize> {
        let font = self.fonts.get(font)?;
        self.prev_drag = (None, None);
        selection::clear_selection(&mut self.playfield);

        let (x, y) = TEXT_ORIGIN;
        Ok(text::draw_text(&mut self.playfield, x, y, font, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColorSystem, PlayfieldMode};
    use crate::symbol::{Font, Symbol};

    fn create_test_editor(mode: PlayfieldMode) -> Editor {
        let mut pf = PlayfieldModel::new("editor", mode, ColorSystem::NTSC, 8);
        pf.palette_code.set(0x1E);
        pf.bg_palette_code.set(0x84);

        let mut font = Font::new("dots");
        font.insert('.', Symbol::new(1, 1).add(0, 0));
        let mut fonts = FontRegistry::new();
        fonts.insert(font);

        Editor::new(pf, fonts)
    }

    /// Canvas position of the center of cell `(x, y)` at zoom 1
    fn at(x: usize, y: usize, button: MouseButton, modifiers: Modifiers) -> PointerEvent {
        PointerEvent::new(
            (x as u32 * CELL_WIDTH + CELL_WIDTH / 2) as i32,
            (y as u32 * CELL_HEIGHT) as i32,
            button,
            modifiers,
        )
    }

    fn lit(editor: &Editor, x: usize, y: usize) -> bool {
        editor.playfield().lines()[y].pixels[x]
    }

    #[test]
    fn test_pen_bindings() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);

        assert!(editor.press(at(3, 2, MouseButton::Left, Modifiers::NONE)));
        assert!(lit(&editor, 3, 2));

        assert!(editor.press(at(3, 2, MouseButton::Right, Modifiers::NONE)));
        assert!(!lit(&editor, 3, 2));

        assert!(editor.drag(at(4, 2, MouseButton::None, Modifiers::SHIFT)));
        assert!(lit(&editor, 4, 2));

        assert!(!editor.drag(at(5, 2, MouseButton::None, Modifiers::NONE)));
        assert!(!lit(&editor, 5, 2));
    }

    #[test]
    fn test_pen_modifier_shortcuts() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);

        editor.press(at(0, 0, MouseButton::Middle, Modifiers::NONE));
        assert!(editor.playfield().lines()[0].pixels.iter().all(|&p| p));

        editor.press(at(6, 0, MouseButton::Middle, Modifiers::CTRL));
        assert!((0..8).all(|y| lit(&editor, 6, y)));

        editor.playfield_mut().palette_code.set(0x44);
        editor.press(at(6, 4, MouseButton::Left, Modifiers::CTRL));
        assert!((0..8).all(|y| editor.playfield().lines()[y].palette_code() == 0x44));

        editor.press(at(6, 4, MouseButton::Left, Modifiers::ALT));
        assert_eq!(editor.playfield().palette_code(), 0x44);
    }

    #[test]
    fn test_out_of_range_events_are_ignored() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);
        assert!(!editor.press(PointerEvent::new(-1, 0, MouseButton::Left, Modifiers::NONE)));
        assert!(!editor.press(PointerEvent::new(0, 16, MouseButton::Left, Modifiers::NONE)));
        assert!(!editor.playfield().can_undo());
    }

    #[test]
    fn test_brush_draws_on_move_only() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);
        editor.set_tool(Tool::Brush);

        assert!(!editor.press(at(1, 1, MouseButton::Left, Modifiers::NONE)));
        assert!(editor.drag(at(1, 1, MouseButton::Left, Modifiers::NONE)));
        assert!(lit(&editor, 1, 1));
        assert!(editor.drag(at(1, 1, MouseButton::Right, Modifiers::NONE)));
        assert!(!lit(&editor, 1, 1));
    }

    #[test]
    fn test_bucket_and_picker() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);
        editor.press(at(0, 3, MouseButton::Left, Modifiers::NONE));

        editor.set_tool(Tool::Bucket);
        editor.press(at(5, 3, MouseButton::Right, Modifiers::NONE));
        assert!(
            editor
                .playfield()
                .lines()
                .iter()
                .all(|line| line.bg_palette_code() == 0x84)
        );

        editor.playfield_mut().lines_mut()[3].update(Some(0x20), Some(0x40));
        editor.set_tool(Tool::ColorPicker);
        editor.press(at(0, 3, MouseButton::Left, Modifiers::NONE));
        editor.press(at(0, 3, MouseButton::Right, Modifiers::NONE));
        assert_eq!(editor.playfield().palette_code(), 0x20);
        assert_eq!(editor.playfield().bg_palette_code(), 0x40);
    }

    #[test]
    fn test_selection_drag_and_commit() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);
        editor.press(at(2, 0, MouseButton::Left, Modifiers::NONE));
        editor.set_tool(Tool::Selection);

        editor.press(at(2, 0, MouseButton::Left, Modifiers::NONE));
        assert_eq!(editor.cut_selection(), 1);

        // middle-drag one cell right and one cell down
        editor.drag(at(2, 0, MouseButton::Middle, Modifiers::NONE));
        editor.drag(at(3, 1, MouseButton::Middle, Modifiers::NONE));
        assert!(editor.playfield().lines()[4].overlay[3]);

        editor.press(at(0, 0, MouseButton::Right, Modifiers::NONE));
        assert!(lit(&editor, 3, 4));
        assert!(!lit(&editor, 2, 0));
        assert!(!editor.playfield().lines()[4].has_selection());
    }

    #[test]
    fn test_selection_drag_just_outside_canvas() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);
        editor.press(at(2, 0, MouseButton::Left, Modifiers::NONE));
        editor.set_tool(Tool::Selection);
        editor.press(at(2, 0, MouseButton::Left, Modifiers::NONE));
        assert_eq!(editor.cut_selection(), 1);

        let middle = |x, y| PointerEvent::new(x, y, MouseButton::Middle, Modifiers::NONE);
        editor.drag(middle(1, 1));
        editor.drag(middle(-1, -1));
        assert!(editor.playfield().lines()[0].overlay[2]);

        // A full cell past the edge moves one step
        editor.drag(middle(-(CELL_WIDTH as i32), 1));
        assert!(editor.playfield().lines()[0].overlay[1]);
        assert!(!editor.playfield().lines()[0].overlay[2]);
    }

    #[test]
    fn test_wheel() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);
        let wheel = |delta, modifiers| WheelEvent {
            x: 0,
            y: 0,
            delta,
            modifiers,
        };

        assert!(editor.wheel(wheel(120, Modifiers::CTRL)));
        assert_eq!(editor.playfield().zoom(), 2);
        assert!(editor.wheel(wheel(-120, Modifiers::CTRL)));
        assert_eq!(editor.playfield().zoom(), 1);

        assert!(!editor.wheel(wheel(120, Modifiers::NONE)));

        editor.set_tool(Tool::Selection);
        editor.press(at(0, 1, MouseButton::Left, Modifiers::NONE));
        editor.playfield_mut().lines_mut()[1].overlay[0] = true;

        assert!(editor.wheel(wheel(120, Modifiers::NONE)));
        assert!(editor.playfield().lines()[0].overlay[0]);
        assert!(editor.wheel(wheel(-120, Modifiers::SHIFT)));
        assert!(editor.playfield().lines()[0].overlay[1]);
    }

    #[test]
    fn test_leaving_selection_tool_commits() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);
        editor.set_tool(Tool::Selection);
        editor.playfield_mut().lines_mut()[2].selection[5] = true;
        editor.playfield_mut().lines_mut()[2].overlay[5] = true;

        editor.set_tool(Tool::Pen);
        assert!(lit(&editor, 5, 2));
        assert!(editor.playfield().can_undo());
    }

    #[test]
    fn test_undo_commits_selection_first() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);
        editor.press(at(1, 1, MouseButton::Left, Modifiers::NONE));
        editor.playfield_mut().lines_mut()[5].selection[5] = true;
        editor.playfield_mut().lines_mut()[5].overlay[5] = true;

        // the commit is itself an undo step, and the one undone
        editor.undo();
        assert!(!lit(&editor, 5, 5));
        assert!(lit(&editor, 1, 1));

        editor.undo();
        assert!(!lit(&editor, 1, 1));
        assert!(editor.undo().is_none());
    }

    #[test]
    fn test_insert_text() {
        let mut editor = create_test_editor(PlayfieldMode::Symmetric);
        assert_eq!(editor.insert_text("dots", "..").unwrap(), 2);

        let line = &editor.playfield().lines()[1];
        assert!(line.overlay[1] && line.overlay[3]);
        assert!(line.overlay[21] && line.overlay[23]);

        assert!(editor.insert_text("missing", "x").is_err());
    }

    #[test]
    fn test_clear() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);
        editor.press(at(1, 1, MouseButton::Left, Modifiers::NONE));
        assert!(editor.clear());
        assert!(!lit(&editor, 1, 1));
        editor.undo();
        assert!(lit(&editor, 1, 1));
    }

    #[test]
    fn test_status() {
        let mut editor = create_test_editor(PlayfieldMode::Asymmetric);
        assert_eq!(editor.status(0, 0).as_deref(), Some("X=0, Y=0"));
        editor.press(at(0, 0, MouseButton::Left, Modifiers::NONE));
        assert_eq!(editor.status(0, 0).as_deref(), Some("X=0, Y=0  Color=1E"));
        assert!(editor.status(-5, 0).is_none());
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = EditorConfig {
            version: "test".to_string(),
            fonts_dirs: vec![dir.path().to_path_buf()],
            default_zoom: 3,
        };
        let pf = PlayfieldModel::new("cfg", PlayfieldMode::Mirror, ColorSystem::PAL, 4);

        let editor = Editor::from_config(pf, &config);
        assert_eq!(editor.playfield().zoom(), 3);
        assert!(editor.fonts().is_empty());
    }
}
