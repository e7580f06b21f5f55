//! Selection state for the text editing engine.

use super::cursor::Coordinates;

/// How `TextEditor::set_selection` snaps the requested range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Use the range as given
    #[default]
    Normal,
    /// Extend both ends to token boundaries
    Word,
    /// Extend to whole lines
    Line,
}

/// Cursor plus an ordered selection.
///
/// `selection_start <= selection_end` always holds: the setters swap when
/// handed a reversed range. A zero-width selection means "no selection".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorState {
    selection_start: Coordinates,
    selection_end: Coordinates,
    pub cursor: Coordinates,
}

impl EditorState {
    /// Collapsed state at `pos`
    pub fn at(pos: Coordinates) -> Self {
        Self {
            selection_start: pos,
            selection_end: pos,
            cursor: pos,
        }
    }

    pub fn selection_start(&self) -> Coordinates {
        self.selection_start
    }

    pub fn selection_end(&self) -> Coordinates {
        self.selection_end
    }

    /// Set both ends, ordering them
    pub fn set_selection(&mut self, a: Coordinates, b: Coordinates) {
        self.selection_start = a.min(b);
        self.selection_end = a.max(b);
    }

    pub fn set_selection_start(&mut self, pos: Coordinates) {
        self.selection_start = pos;
        if self.selection_start > self.selection_end {
            std::mem::swap(&mut self.selection_start, &mut self.selection_end);
        }
    }

    pub fn set_selection_end(&mut self, pos: Coordinates) {
        self.selection_end = pos;
        if self.selection_start > self.selection_end {
            std::mem::swap(&mut self.selection_start, &mut self.selection_end);
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection_end > self.selection_start
    }

    /// Collapse the selection onto the cursor
    pub fn collapse(&mut self) {
        self.selection_start = self.cursor;
        self.selection_end = self.cursor;
    }

    /// The selection end the cursor is not sitting on
    pub fn anchor(&self) -> Coordinates {
        if self.cursor == self.selection_start {
            self.selection_end
        } else {
            self.selection_start
        }
    }
}
