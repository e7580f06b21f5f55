//! TextEditor - the editing engine: buffer, cursor/selection, undo log and
//! colorizer behind one API.
//!
//! Every content mutation goes through a method here so that it is gated by
//! read-only mode, recorded in the undo log and reported to the colorizer.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::syntax::{Colorizer, LanguageDefinition, LanguageError};
use crate::theme::{load_palette, Color, Palette, PaletteIndex};
use crate::tracing::StateSnapshot;
use crate::util::{is_blank, is_space, MAX_TAB_SIZE};

use super::buffer::GlyphBuffer;
use super::clipboard::Clipboard;
use super::cursor::{ByteOffset, Coordinates};
use super::history::{UndoLog, UndoRecord};
use super::metrics::FontMetrics;
use super::selection::{EditorState, SelectionMode};

/// Embeddable text editor core.
///
/// Single-threaded and not reentrant: each call runs to completion.
#[derive(Debug, Clone)]
pub struct TextEditor {
    buffer: GlyphBuffer,
    state: EditorState,
    history: UndoLog,
    colorizer: Colorizer,
    palette: Palette,
    read_only: bool,
    overwrite: bool,
    text_changed: bool,
    scroll_to_cursor: bool,
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEditor {
    /// Empty plain-text editor with the dark palette
    pub fn new() -> Self {
        Self {
            buffer: GlyphBuffer::new(),
            state: EditorState::default(),
            history: UndoLog::new(),
            colorizer: Colorizer::default(),
            palette: Palette::dark(),
            read_only: false,
            overwrite: false,
            text_changed: false,
            scroll_to_cursor: false,
        }
    }

    pub fn with_text(text: &str) -> Self {
        let mut editor = Self::new();
        editor.set_text(text);
        editor
    }

    /// Build an editor from persisted settings. Unknown palette or language
    /// ids are logged and skipped.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut editor = Self::new();
        editor.set_tab_size(config.tab_size);
        editor.set_colorizer_enabled(config.colorizer_enabled);
        match load_palette(&config.palette) {
            Ok(palette) => editor.set_palette(palette),
            Err(e) => tracing::warn!("Palette '{}' unavailable: {}", config.palette, e),
        }
        if let Some(id) = &config.language {
            let installed = LanguageDefinition::by_id(id)
                .and_then(|definition| editor.set_language_definition(definition));
            if let Err(e) = installed {
                tracing::warn!("Language '{}' unavailable: {}", id, e);
            }
        }
        editor.set_overwrite(config.overwrite);
        editor.set_read_only(config.read_only);
        editor
    }

    pub fn buffer(&self) -> &GlyphBuffer {
        &self.buffer
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn history(&self) -> &UndoLog {
        &self.history
    }

    pub fn colorizer(&self) -> &Colorizer {
        &self.colorizer
    }
}

// =============================================================================
// Text access
// =============================================================================

impl TextEditor {
    /// Replace the whole document. Clears the undo log and schedules a full
    /// recolor.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.state = EditorState::default();
        self.history.clear();
        self.colorizer.invalidate_all(self.buffer.line_count());
        self.text_changed = true;
        self.scroll_to_cursor = true;
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn set_text_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        let text = lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        self.set_text(&text);
    }

    pub fn text_lines(&self) -> Vec<String> {
        (0..self.buffer.line_count())
            .map(|line| self.buffer.line_text(line))
            .collect()
    }

    /// Selected text (empty string without a selection)
    pub fn selected_text(&self) -> String {
        self.buffer
            .text_range(self.state.selection_start(), self.state.selection_end())
    }

    pub fn current_line_text(&self) -> String {
        self.buffer.line_text(self.cursor_position().line)
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn line_text(&self, line: usize) -> String {
        self.buffer.line_text(line)
    }
}

// =============================================================================
// Cursor and selection
// =============================================================================

impl TextEditor {
    /// Sanitized cursor position
    pub fn cursor_position(&self) -> Coordinates {
        self.buffer.sanitize(self.state.cursor)
    }

    pub fn set_cursor_position(&mut self, pos: Coordinates) {
        let pos = self.buffer.sanitize(pos);
        if self.state.cursor != pos {
            self.state.cursor = pos;
            self.scroll_to_cursor = true;
        }
    }

    pub fn selection_start(&self) -> Coordinates {
        self.buffer.sanitize(self.state.selection_start())
    }

    pub fn selection_end(&self) -> Coordinates {
        self.buffer.sanitize(self.state.selection_end())
    }

    pub fn has_selection(&self) -> bool {
        self.selection_end() > self.selection_start()
    }

    pub fn set_selection_start(&mut self, pos: Coordinates) {
        self.state.set_selection_start(self.buffer.sanitize(pos));
    }

    pub fn set_selection_end(&mut self, pos: Coordinates) {
        self.state.set_selection_end(self.buffer.sanitize(pos));
    }

    /// Select `[start, end)` (either order), snapped according to `mode`
    pub fn set_selection(&mut self, start: Coordinates, end: Coordinates, mode: SelectionMode) {
        let a = self.buffer.sanitize(start);
        let b = self.buffer.sanitize(end);
        let (mut start, mut end) = (a.min(b), a.max(b));
        let by_color = self.colorizer.is_enabled();

        match mode {
            SelectionMode::Normal => {}
            SelectionMode::Word => {
                start = self.buffer.find_word_start(start, by_color);
                if !self.is_on_word_boundary(end) {
                    end = self
                        .buffer
                        .find_word_end(self.buffer.find_word_start(end, by_color), by_color);
                }
            }
            SelectionMode::Line => {
                start.column = 0;
                end.column = self.buffer.line_max_column(end.line);
            }
        }

        self.state.set_selection(start, end);
    }

    pub fn select_all(&mut self) {
        let last = self.buffer.line_count() - 1;
        let end = Coordinates::new(last, self.buffer.line_max_column(last));
        self.state.set_selection(Coordinates::zero(), end);
        self.state.cursor = end;
    }

    pub fn select_word_under_cursor(&mut self) {
        let cursor = self.cursor_position();
        let by_color = self.colorizer.is_enabled();
        let start = self.buffer.find_word_start(cursor, by_color);
        let end = self.buffer.find_word_end(start, by_color);
        self.state.set_selection(start, end);
        self.state.cursor = end;
    }

    /// A token boundary lies between the glyph before `at` and the one under it
    fn is_on_word_boundary(&self, at: Coordinates) -> bool {
        let Some(line) = self.buffer.line(at.line) else {
            return true;
        };
        let index = self.buffer.character_index(at);
        if index.0 == 0 || index.0 >= line.len() {
            return true;
        }
        let prev = self.buffer.prev_char_start(at.line, index);
        let (a, b) = (line[prev.0], line[index.0]);
        is_space(a.ch) != is_space(b.ch) || (self.colorizer.is_enabled() && a.color != b.color)
    }
}

// =============================================================================
// Movement
// =============================================================================

impl TextEditor {
    /// Move the cursor, keeping the opposite selection end as the anchor
    /// when `select` is set
    fn move_cursor_to(&mut self, pos: Coordinates, select: bool) {
        let anchor = if self.has_selection() {
            self.state.anchor()
        } else {
            self.cursor_position()
        };
        self.state.cursor = pos;
        if select {
            let head = self.buffer.sanitize(pos);
            self.state.set_selection(anchor, head);
        } else {
            self.state.collapse();
        }
        self.scroll_to_cursor = true;
    }

    /// Lines move keeps the requested column even past short lines
    pub fn move_up(&mut self, amount: usize, select: bool) {
        let mut pos = self.state.cursor;
        pos.line = pos.line.min(self.buffer.line_count() - 1).saturating_sub(amount);
        self.move_cursor_to(pos, select);
    }

    pub fn move_down(&mut self, amount: usize, select: bool) {
        let mut pos = self.state.cursor;
        pos.line = pos
            .line
            .saturating_add(amount)
            .min(self.buffer.line_count() - 1);
        self.move_cursor_to(pos, select);
    }

    pub fn move_left(&mut self, amount: usize, select: bool, word_mode: bool) {
        if self.has_selection() && !select && !word_mode {
            let start = self.selection_start();
            self.move_cursor_to(start, false);
            return;
        }
        let by_color = self.colorizer.is_enabled();
        let mut pos = self.cursor_position();
        for _ in 0..amount {
            let prev = self.buffer.retreat(pos);
            pos = if word_mode && prev.line == pos.line {
                self.buffer.find_word_start(prev, by_color)
            } else {
                prev
            };
        }
        self.move_cursor_to(pos, select);
    }

    pub fn move_right(&mut self, amount: usize, select: bool, word_mode: bool) {
        if self.has_selection() && !select && !word_mode {
            let end = self.selection_end();
            self.move_cursor_to(end, false);
            return;
        }
        let by_color = self.colorizer.is_enabled();
        let mut pos = self.cursor_position();
        for _ in 0..amount {
            let at_line_end = pos.column >= self.buffer.line_max_column(pos.line);
            pos = if word_mode && !at_line_end {
                self.buffer.find_word_end(pos, by_color)
            } else {
                self.buffer.advance(pos)
            };
        }
        self.move_cursor_to(pos, select);
    }

    pub fn move_top(&mut self, select: bool) {
        self.move_cursor_to(Coordinates::zero(), select);
    }

    pub fn move_bottom(&mut self, select: bool) {
        let last = self.buffer.line_count() - 1;
        let end = Coordinates::new(last, self.buffer.line_max_column(last));
        self.move_cursor_to(end, select);
    }

    pub fn move_home(&mut self, select: bool) {
        let line = self.cursor_position().line;
        self.move_cursor_to(Coordinates::new(line, 0), select);
    }

    pub fn move_end(&mut self, select: bool) {
        let line = self.cursor_position().line;
        let end = Coordinates::new(line, self.buffer.line_max_column(line));
        self.move_cursor_to(end, select);
    }
}

// =============================================================================
// Editing
// =============================================================================

impl TextEditor {
    /// Type one character at the cursor.
    ///
    /// Tab over a multi-line selection indents (or with `shift`, outdents)
    /// every selected line as one undo step. Otherwise a selection is
    /// replaced, `\n` auto-indents when the language asks for it, Tab pads
    /// to the next tab stop, and overwrite mode replaces the codepoint under
    /// the cursor.
    pub fn enter_character(&mut self, ch: char, shift: bool) -> bool {
        if self.read_only || ch == '\r' {
            return false;
        }

        self.state.cursor = self.cursor_position();
        let before = self.state;

        if ch == '\t' && self.has_selection() {
            let (start, end) = (self.selection_start(), self.selection_end());
            if start.line < end.line {
                return self.indent_selection(shift);
            }
        }

        let mut record = UndoRecord::new(before);
        let selection_removed = self.remove_selection_into(&mut record);

        let coord = self.cursor_position();
        let mut pieces = Vec::new();

        match ch {
            '\n' => {
                let mut text = String::from("\n");
                if self.colorizer.language().definition().auto_indentation {
                    let index = self.buffer.character_index(coord).0;
                    if let Some(line) = self.buffer.line(coord.line) {
                        text.extend(
                            line[..index]
                                .iter()
                                .take_while(|g| is_blank(g.ch))
                                .map(|g| g.ch as char),
                        );
                    }
                }
                pieces.push(text);
            }
            '\t' => {
                let tab_size = self.buffer.tab_size();
                if tab_size > 0 {
                    let spaces = tab_size - coord.column % tab_size;
                    pieces.extend(std::iter::repeat(" ".to_string()).take(spaces));
                }
            }
            _ => {
                let at_line_end = coord.column >= self.buffer.line_max_column(coord.line);
                if self.overwrite && !selection_removed && !at_line_end {
                    let next = self.buffer.advance(coord);
                    record.removed = self.buffer.text_range(coord, next);
                    record.removed_start = coord;
                    record.removed_end = next;
                    self.buffer.delete_range(coord, next);
                }
                pieces.push(ch.to_string());
            }
        }

        if pieces.is_empty() && record.is_empty() {
            return false;
        }

        let mut records = Vec::with_capacity(pieces.len().max(1));
        let mut pos = coord;
        for piece in pieces {
            let start = pos;
            self.buffer.insert_text_at(&mut pos, &piece);
            record.added = self.buffer.text_range(start, pos);
            record.added_start = start;
            record.added_end = pos;
            records.push(std::mem::replace(&mut record, UndoRecord::new(before)));
        }
        if records.is_empty() {
            records.push(record);
        }

        self.state = EditorState::at(pos);
        self.commit(records, before);
        self.touched(coord.line, pos.line);
        true
    }

    /// Insert `text` at the cursor, replacing the selection
    pub fn insert_text(&mut self, text: &str) -> bool {
        if self.read_only {
            return false;
        }

        self.state.cursor = self.cursor_position();
        let before = self.state;
        let mut record = UndoRecord::new(before);
        self.remove_selection_into(&mut record);

        let start = self.cursor_position();
        let mut pos = start;
        self.buffer.insert_text_at(&mut pos, text);
        record.added = self.buffer.text_range(start, pos);
        record.added_start = start;
        record.added_end = pos;

        if record.is_empty() {
            return false;
        }

        self.state = EditorState::at(pos);
        self.commit(vec![record], before);
        self.touched(start.line, pos.line);
        true
    }

    /// Delete key: the selection, or the codepoint after the cursor (joining
    /// the next line at the end of a line)
    pub fn delete(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        if self.has_selection() {
            return self.delete_selection();
        }
        let pos = self.cursor_position();
        let next = self.buffer.advance(pos);
        self.remove_range(pos, next)
    }

    /// Backspace: the selection, or the codepoint before the cursor (joining
    /// the previous line at column 0)
    pub fn backspace(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        if self.has_selection() {
            return self.delete_selection();
        }
        let pos = self.cursor_position();
        let prev = self.buffer.retreat(pos);
        self.remove_range(prev, pos)
    }

    /// Remove the selected text as one undo step
    pub fn delete_selection(&mut self) -> bool {
        if self.read_only || !self.has_selection() {
            return false;
        }
        let (start, end) = (self.selection_start(), self.selection_end());
        self.remove_range(start, end)
    }

    /// Record and remove `[start, end)`, leaving the cursor at `start`
    fn remove_range(&mut self, start: Coordinates, end: Coordinates) -> bool {
        if start >= end {
            return false;
        }
        self.state.cursor = self.cursor_position();
        let before = self.state;
        let record = UndoRecord::removal(self.buffer.text_range(start, end), start, end, before);
        self.buffer.delete_range(start, end);
        self.state = EditorState::at(start);
        self.commit(vec![record], before);
        self.touched(start.line, start.line);
        true
    }

    /// Remove the selection (if any) into `record`'s removed half
    fn remove_selection_into(&mut self, record: &mut UndoRecord) -> bool {
        if !self.has_selection() {
            return false;
        }
        let (start, end) = (self.selection_start(), self.selection_end());
        record.removed = self.buffer.text_range(start, end);
        record.removed_start = start;
        record.removed_end = end;
        self.buffer.delete_range(start, end);
        self.state = EditorState::at(start);
        true
    }

    /// Indent or outdent every line of a multi-line selection. A selection
    /// ending at column 0 leaves that last line alone.
    fn indent_selection(&mut self, outdent: bool) -> bool {
        let before = self.state;
        let start = self.selection_start();
        let end = self.selection_end();
        let last_line = if end.column == 0 {
            end.line - 1
        } else {
            end.line
        };
        let tab_size = self.buffer.tab_size();
        if tab_size == 0 {
            return false;
        }

        let mut records = Vec::new();
        for line in start.line..=last_line {
            let line_start = Coordinates::new(line, 0);
            if outdent {
                let spaces = self.buffer.line(line).map_or(0, |glyphs| {
                    glyphs
                        .iter()
                        .take(tab_size)
                        .take_while(|g| g.ch == b' ')
                        .count()
                });
                if spaces == 0 {
                    continue;
                }
                let to = Coordinates::new(line, spaces);
                records.push(UndoRecord::removal(" ".repeat(spaces), line_start, to, before));
                self.buffer.delete_range(line_start, to);
            } else {
                let mut pos = line_start;
                self.buffer.insert_text_at(&mut pos, &" ".repeat(tab_size));
                records.push(UndoRecord::insertion(" ".repeat(tab_size), line_start, pos, before));
            }
        }

        if records.is_empty() {
            return false;
        }

        let new_end = if end.column == 0 {
            end
        } else {
            Coordinates::new(end.line, self.buffer.line_max_column(end.line))
        };
        self.state.set_selection(Coordinates::new(start.line, 0), new_end);
        self.state.cursor = new_end;
        self.commit(records, before);
        self.touched(start.line, last_line);
        true
    }

    /// Push `records` as one undo step: all share the outer before/after
    /// states and every record after the first propagates.
    fn commit(&mut self, records: Vec<UndoRecord>, before: EditorState) {
        let after = self.state;
        for (i, record) in records.into_iter().enumerate() {
            self.history
                .record(UndoRecord { before, after, ..record }.with_propagate(i > 0));
        }
    }

    /// Bookkeeping after a content change touching `[first, last]`, in
    /// post-edit line numbers
    fn touched(&mut self, first: usize, last: usize) {
        let from = first.saturating_sub(1);
        self.colorizer.invalidate(from, last.saturating_sub(from) + 2);
        self.text_changed = true;
        self.scroll_to_cursor = true;
    }

    /// Replace each `(start, end)` range with `replacement` as one undo step.
    ///
    /// Ranges must be in document order and must not overlap. They are
    /// applied last to first, so earlier ranges stay valid. Returns how many
    /// ranges were replaced.
    pub(crate) fn replace_ranges(
        &mut self,
        ranges: &[(Coordinates, Coordinates)],
        replacement: &str,
    ) -> usize {
        if self.read_only || ranges.is_empty() {
            return 0;
        }

        self.state.cursor = self.cursor_position();
        let before = self.state;
        let mut records = Vec::with_capacity(ranges.len() * 2);
        let mut cursor = before.cursor;
        let mut lines = TouchedLines::default();

        for &(start, end) in ranges.iter().rev() {
            let (start, end) = (self.buffer.sanitize(start), self.buffer.sanitize(end));
            if start >= end {
                continue;
            }
            records.push(UndoRecord::removal(
                self.buffer.text_range(start, end),
                start,
                end,
                before,
            ));
            self.buffer.delete_range(start, end);

            let mut pos = start;
            self.buffer.insert_text_at(&mut pos, replacement);
            if pos != start {
                records.push(UndoRecord::insertion(
                    self.buffer.text_range(start, pos),
                    start,
                    pos,
                    before,
                ));
            }
            cursor = pos;
            lines.add(start.line, pos.line, pos.line as isize - end.line as isize);
        }

        let Some((first_line, last_line)) = lines.span() else {
            return 0;
        };

        let replaced = records.iter().filter(|r| !r.removed.is_empty()).count();
        self.state = EditorState::at(cursor);
        self.commit(records, before);
        self.touched(first_line, last_line);
        replaced
    }
}

/// Union of the lines touched by a sequence of edits, tracked in the
/// coordinates left after the most recent one.
///
/// Each edit shifts everything below it by its line delta; the running end
/// line is pushed down by positive deltas and never pulled up.
#[derive(Debug, Default, Clone, Copy)]
struct TouchedLines {
    span: Option<(usize, usize)>,
}

impl TouchedLines {
    fn add(&mut self, first: usize, last: usize, delta: isize) {
        self.span = Some(match self.span {
            None => (first, last.max(first)),
            Some((lo, hi)) => (
                lo.min(first),
                hi.saturating_add_signed(delta.max(0)).max(last),
            ),
        });
    }

    fn span(&self) -> Option<(usize, usize)> {
        self.span
    }
}

// =============================================================================
// Undo / redo
// =============================================================================

impl TextEditor {
    pub fn can_undo(&self) -> bool {
        !self.read_only && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.read_only && self.history.can_redo()
    }

    pub fn undo_index(&self) -> usize {
        self.history.undo_index()
    }

    fn invalidate_lines(&mut self, lines: TouchedLines) {
        if let Some((first, last)) = lines.span() {
            let from = first.saturating_sub(1);
            self.colorizer.invalidate(from, last - from + 2);
        }
    }

    /// Undo `steps` logical steps; a propagate group counts as one
    pub fn undo(&mut self, steps: usize) -> bool {
        if !self.can_undo() {
            return false;
        }
        let snapshot = StateSnapshot::from_state(&self.state);
        let range = self.history.undo_range(steps);
        if range.is_empty() {
            return false;
        }

        let records = self.history.records();
        let mut lines = TouchedLines::default();
        for record in records[range.clone()].iter().rev() {
            record.revert(&mut self.buffer);
            let (first, last) = record.line_span();
            lines.add(first, last, -record.line_delta());
        }
        self.state = records[range.start].before;
        self.invalidate_lines(lines);

        tracing::debug!(
            records = range.len(),
            undo_index = self.history.undo_index(),
            change = ?snapshot.diff(&StateSnapshot::from_state(&self.state)),
            "undo"
        );
        self.text_changed = true;
        self.scroll_to_cursor = true;
        true
    }

    /// Redo `steps` logical steps, replaying raw text
    pub fn redo(&mut self, steps: usize) -> bool {
        if !self.can_redo() {
            return false;
        }
        let snapshot = StateSnapshot::from_state(&self.state);
        let range = self.history.redo_range(steps);
        if range.is_empty() {
            return false;
        }

        let records = self.history.records();
        let mut lines = TouchedLines::default();
        for record in &records[range.clone()] {
            record.replay(&mut self.buffer);
            let (first, last) = record.line_span();
            lines.add(first, last, record.line_delta());
        }
        self.state = records[range.end - 1].after;
        self.invalidate_lines(lines);

        tracing::debug!(
            records = range.len(),
            undo_index = self.history.undo_index(),
            change = ?snapshot.diff(&StateSnapshot::from_state(&self.state)),
            "redo"
        );
        self.text_changed = true;
        self.scroll_to_cursor = true;
        true
    }
}

// =============================================================================
// Clipboard
// =============================================================================

impl TextEditor {
    /// Copy the selection, or the current line without a selection
    pub fn copy(&self, clipboard: &mut dyn Clipboard) {
        let text = if self.has_selection() {
            self.selected_text()
        } else {
            self.current_line_text()
        };
        clipboard.set_text(&text);
    }

    /// Copy then delete the selection. Read-only editors only copy.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if self.read_only {
            self.copy(clipboard);
            return false;
        }
        if !self.has_selection() {
            return false;
        }
        self.copy(clipboard);
        self.delete_selection()
    }

    pub fn paste(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if self.read_only {
            return false;
        }
        match clipboard.get_text() {
            Some(text) if !text.is_empty() => self.insert_text(&text),
            _ => false,
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

impl TextEditor {
    /// Install a language and schedule a full recolor. Fails on a malformed
    /// token rule, leaving the current language in place.
    pub fn set_language_definition(
        &mut self,
        definition: LanguageDefinition,
    ) -> Result<(), LanguageError> {
        let language = Arc::new(definition).compile()?;
        tracing::debug!("Installed language '{}'", language.definition().name);
        self.colorizer.set_language(language);
        self.colorizer.invalidate_all(self.buffer.line_count());
        Ok(())
    }

    pub fn language_definition(&self) -> &LanguageDefinition {
        self.colorizer.language().definition()
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Entering read-only mode drops the undo log
    pub fn set_read_only(&mut self, read_only: bool) {
        if read_only && !self.read_only {
            self.history.clear();
        }
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Clamped to `[0, 32]`; affects tabs inserted from now on
    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.buffer.set_tab_size(tab_size.min(MAX_TAB_SIZE));
    }

    pub fn tab_size(&self) -> usize {
        self.buffer.tab_size()
    }

    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn set_colorizer_enabled(&mut self, enabled: bool) {
        self.colorizer.set_enabled(enabled);
        if enabled {
            self.colorizer.invalidate_all(self.buffer.line_count());
        }
    }

    pub fn is_colorizer_enabled(&self) -> bool {
        self.colorizer.is_enabled()
    }

    pub fn is_text_changed(&self) -> bool {
        self.text_changed
    }

    /// Read and clear the text-changed flag
    pub fn take_text_changed(&mut self) -> bool {
        std::mem::take(&mut self.text_changed)
    }

    /// Ask the renderer to bring the cursor into view on its next pass
    pub fn request_scroll_to_cursor(&mut self) {
        self.scroll_to_cursor = true;
    }

    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_cursor)
    }
}

// =============================================================================
// Markers
// =============================================================================

impl TextEditor {
    pub fn set_error_markers(&mut self, markers: BTreeMap<usize, String>) {
        self.buffer.markers_mut().set_errors(markers);
    }

    pub fn error_markers(&self) -> &BTreeMap<usize, String> {
        self.buffer.markers().errors()
    }

    pub fn set_breakpoints(&mut self, breakpoints: BTreeSet<usize>) {
        self.buffer.markers_mut().set_breakpoints(breakpoints);
    }

    pub fn breakpoints(&self) -> &BTreeSet<usize> {
        self.buffer.markers().breakpoints()
    }

    /// Error message shown in the gutter of `line`
    pub fn error_marker(&self, line: usize) -> Option<&str> {
        self.buffer.markers().error_at(line)
    }

    pub fn has_breakpoint(&self, line: usize) -> bool {
        self.buffer.markers().has_breakpoint(line)
    }
}

// =============================================================================
// Rendering queries
// =============================================================================

impl TextEditor {
    /// Classify one chunk of pending lines; `true` once fully colored
    pub fn colorize_step(&mut self) -> bool {
        self.colorizer.step(&mut self.buffer)
    }

    pub fn colorize_all(&mut self) {
        self.colorizer.flush(&mut self.buffer);
    }

    /// Palette role the glyph at `(line, index)` is drawn with
    pub fn glyph_palette_index(&self, line: usize, index: ByteOffset) -> PaletteIndex {
        self.buffer
            .glyph(line, index)
            .map_or(PaletteIndex::Default, |glyph| {
                self.colorizer.display_index(glyph, line, index.0)
            })
    }

    /// Final color of the glyph at `(line, index)`
    pub fn glyph_color(&self, line: usize, index: ByteOffset) -> Color {
        match self.buffer.glyph(line, index) {
            Some(glyph) => self
                .colorizer
                .display_color(glyph, line, index.0, &self.palette),
            None => self.palette.get(PaletteIndex::Default),
        }
    }

    /// Coordinates under a point relative to the top-left of the text area
    pub fn screen_to_coordinates(&self, x: f32, y: f32, metrics: &dyn FontMetrics) -> Coordinates {
        let line_height = metrics.line_height();
        let line = if line_height > 0.0 {
            (y / line_height).floor().max(0.0) as usize
        } else {
            0
        };

        let mut column = 0;
        let mut column_x = 0.0;
        if line < self.buffer.line_count() {
            let mut encoded = [0u8; 4];
            for ch in self.buffer.line_text(line).chars() {
                let width = metrics.text_width(ch.encode_utf8(&mut encoded), column_x);
                if column_x + width * 0.5 > x {
                    break;
                }
                column_x += width;
                column += 1;
            }
        }
        self.buffer.sanitize(Coordinates::new(line, column))
    }

    /// Pixel distance from the start of the line to `coord`
    pub fn text_distance_to_line_start(&self, coord: Coordinates, metrics: &dyn FontMetrics) -> f32 {
        let coord = self.buffer.sanitize(coord);
        let mut distance = 0.0;
        let mut encoded = [0u8; 4];
        for ch in self.buffer.line_text(coord.line).chars().take(coord.column) {
            distance += metrics.text_width(ch.encode_utf8(&mut encoded), distance);
        }
        distance
    }
}
