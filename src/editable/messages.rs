//! Discrete editing intents a host input layer maps key and mouse events to.

use super::clipboard::Clipboard;
use super::cursor::Coordinates;
use super::selection::SelectionMode;
use super::state::TextEditor;

/// Target for cursor movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Move `n` lines up
    Up(usize),
    /// Move `n` lines down
    Down(usize),
    /// Move `n` characters (or words) left
    Left { amount: usize, word: bool },
    /// Move `n` characters (or words) right
    Right { amount: usize, word: bool },
    /// Move to start of line
    LineStart,
    /// Move to end of line
    LineEnd,
    /// Move to start of document
    DocumentStart,
    /// Move to end of document
    DocumentEnd,
}

/// One editor action, independent of how the host produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum EditIntent {
    // === Movement ===
    /// Move cursor, collapsing the selection
    Move(MoveTarget),
    /// Move cursor and extend selection
    MoveWithSelection(MoveTarget),
    /// Place the cursor
    SetCursor(Coordinates),

    // === Insertion ===
    /// Type a character (`shift` turns Tab over a multi-line selection into outdent)
    EnterChar { ch: char, shift: bool },
    /// Insert a string at the cursor
    InsertText(String),

    // === Deletion ===
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character after cursor (Delete)
    DeleteForward,

    // === Selection ===
    /// Select a range, snapped by mode
    Select {
        start: Coordinates,
        end: Coordinates,
        mode: SelectionMode,
    },
    /// Select all text
    SelectAll,
    /// Select the word under the cursor
    SelectWord,

    // === Clipboard ===
    Copy,
    Cut,
    Paste,

    // === History ===
    Undo,
    Redo,

    // === Modes ===
    ToggleOverwrite,
}

impl TextEditor {
    /// Dispatch one intent. Returns `true` when the document text changed.
    pub fn apply(&mut self, intent: EditIntent, clipboard: &mut dyn Clipboard) -> bool {
        match intent {
            EditIntent::Move(target) => {
                self.move_to(target, false);
                false
            }
            EditIntent::MoveWithSelection(target) => {
                self.move_to(target, true);
                false
            }
            EditIntent::SetCursor(pos) => {
                self.set_cursor_position(pos);
                let pos = self.cursor_position();
                self.set_selection(pos, pos, SelectionMode::Normal);
                false
            }
            EditIntent::EnterChar { ch, shift } => self.enter_character(ch, shift),
            EditIntent::InsertText(text) => self.insert_text(&text),
            EditIntent::DeleteBackward => self.backspace(),
            EditIntent::DeleteForward => self.delete(),
            EditIntent::Select { start, end, mode } => {
                self.set_selection(start, end, mode);
                false
            }
            EditIntent::SelectAll => {
                self.select_all();
                false
            }
            EditIntent::SelectWord => {
                self.select_word_under_cursor();
                false
            }
            EditIntent::Copy => {
                self.copy(clipboard);
                false
            }
            EditIntent::Cut => self.cut(clipboard),
            EditIntent::Paste => self.paste(clipboard),
            EditIntent::Undo => self.undo(1),
            EditIntent::Redo => self.redo(1),
            EditIntent::ToggleOverwrite => {
                self.set_overwrite(!self.is_overwrite());
                false
            }
        }
    }

    fn move_to(&mut self, target: MoveTarget, select: bool) {
        match target {
            MoveTarget::Up(n) => self.move_up(n, select),
            MoveTarget::Down(n) => self.move_down(n, select),
            MoveTarget::Left { amount, word } => self.move_left(amount, select, word),
            MoveTarget::Right { amount, word } => self.move_right(amount, select, word),
            MoveTarget::LineStart => self.move_home(select),
            MoveTarget::LineEnd => self.move_end(select),
            MoveTarget::DocumentStart => self.move_top(select),
            MoveTarget::DocumentEnd => self.move_bottom(select),
        }
    }
}
