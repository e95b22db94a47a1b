// Editing operations on a playfield
//
// Tool actions are built as commands and submitted through
// PlayfieldModel::execute so they land on the undo stack. Selection and
// overlay operations mutate the scanlines directly and push their inverse
// with PlayfieldModel::push_undo when live pixels change.
//
// Architecture:
// - draw: pen/eraser/line/clear/color picker/select tool actions
// - fill: foreground flood fill and vertical background fill
// - selection: copy/cut/delete/commit of the selection layer
// - rotate: circular moves of the selection layer
// - text: stamping font symbols into the selection layer
// - editor: maps (tool, button, modifiers) input events onto the above
//
// Operations taking `x`/`y` assume valid indices; the Editor validates
// coordinates coming from input events.

pub mod draw;
pub mod editor;
pub mod fill;
pub mod rotate;
pub mod selection;
pub mod text;

pub use draw::{
    clear, draw, draw_horizontal_line, draw_vertical_line, erase, pick_background,
    pick_foreground, select,
};
pub use editor::{Direction, Editor, Modifiers, MouseButton, PointerEvent, Tool, WheelEvent};
pub use fill::{
    background_fill, background_fill_lines, fill_background, fill_foreground, foreground_fill,
    foreground_fill_lines,
};
pub use rotate::{rotate_down, rotate_left, rotate_right, rotate_up};
pub use selection::{clear_selection, copy_selection, cut_selection, delete_selection};
pub use text::{draw_symbol, draw_text};
