//! Edit history (undo/redo) for the text editing engine.
//!
//! The log is a flat list of records with a cursor into it. Records flagged
//! `propagate` are fused with their predecessor, so one undo or redo call
//! walks the whole group.

use std::ops::Range;

use super::buffer::GlyphBuffer;
use super::cursor::Coordinates;
use super::selection::EditorState;

/// A single recorded mutation: what was removed, what was added, and the
/// editor state on either side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoRecord {
    pub added: String,
    pub added_start: Coordinates,
    pub added_end: Coordinates,
    pub removed: String,
    pub removed_start: Coordinates,
    pub removed_end: Coordinates,
    pub before: EditorState,
    pub after: EditorState,
    /// Undo/redo this record together with its predecessor
    pub propagate: bool,
}

impl UndoRecord {
    /// Empty record capturing the state before a mutation
    pub fn new(before: EditorState) -> Self {
        Self {
            before,
            ..Self::default()
        }
    }

    /// Record of a pure insertion
    pub fn insertion(text: String, start: Coordinates, end: Coordinates, before: EditorState) -> Self {
        Self {
            added: text,
            added_start: start,
            added_end: end,
            ..Self::new(before)
        }
    }

    /// Record of a pure removal
    pub fn removal(text: String, start: Coordinates, end: Coordinates, before: EditorState) -> Self {
        Self {
            removed: text,
            removed_start: start,
            removed_end: end,
            ..Self::new(before)
        }
    }

    pub fn with_propagate(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Undo this record's text change (editor state is restored by the caller)
    pub fn revert(&self, buffer: &mut GlyphBuffer) {
        if !self.added.is_empty() {
            buffer.delete_range(self.added_start, self.added_end);
        }
        if !self.removed.is_empty() {
            let mut at = self.removed_start;
            buffer.insert_text_at(&mut at, &self.removed);
        }
    }

    /// Redo this record's text change, replaying the raw text
    pub fn replay(&self, buffer: &mut GlyphBuffer) {
        if !self.removed.is_empty() {
            buffer.delete_range(self.removed_start, self.removed_end);
        }
        if !self.added.is_empty() {
            let mut at = self.added_start;
            buffer.insert_text_at(&mut at, &self.added);
        }
    }

    /// Change in line count when the record is replayed (negated on revert)
    pub fn line_delta(&self) -> isize {
        let newlines = |text: &str| text.bytes().filter(|&b| b == b'\n').count() as isize;
        newlines(&self.added) - newlines(&self.removed)
    }

    /// First and last line touched by this record
    pub fn line_span(&self) -> (usize, usize) {
        let mut first = usize::MAX;
        let mut last = 0;
        if !self.added.is_empty() {
            first = first.min(self.added_start.line);
            last = last.max(self.added_end.line);
        }
        if !self.removed.is_empty() {
            first = first.min(self.removed_start.line);
            last = last.max(self.removed_end.line);
        }
        if first == usize::MAX {
            first = 0;
        }
        (first, last.max(first))
    }
}

/// Undo log with a cursor: records before `undo_index` can be undone,
/// records at or after it can be redone.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    records: Vec<UndoRecord>,
    undo_index: usize,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, discarding the redo future
    pub fn record(&mut self, record: UndoRecord) {
        self.records.truncate(self.undo_index);
        self.records.push(record);
        self.undo_index += 1;
    }

    pub fn records(&self) -> &[UndoRecord] {
        &self.records
    }

    pub fn undo_index(&self) -> usize {
        self.undo_index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.undo_index < self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.undo_index = 0;
    }

    /// Move the cursor back by `steps` logical steps.
    ///
    /// Returns the records to revert; apply them from last to first.
    pub fn undo_range(&mut self, mut steps: usize) -> Range<usize> {
        let end = self.undo_index;
        while steps > 0 && self.undo_index > 0 {
            if self.records[self.undo_index - 1].propagate {
                steps += 1;
            }
            self.undo_index -= 1;
            steps -= 1;
        }
        self.undo_index..end
    }

    /// Move the cursor forward by `steps` logical steps.
    ///
    /// Returns the records to replay; apply them first to last.
    pub fn redo_range(&mut self, mut steps: usize) -> Range<usize> {
        let start = self.undo_index;
        while steps > 0 && self.undo_index < self.records.len() {
            if self
                .records
                .get(self.undo_index + 1)
                .is_some_and(|next| next.propagate)
            {
                steps += 1;
            }
            self.undo_index += 1;
            steps -= 1;
        }
        start..self.undo_index
    }
}
