//! Glyph buffer: the document storage of the editing engine.
//!
//! A document is a non-empty list of lines; a line is a list of glyphs; a
//! glyph is one UTF-8 byte plus the palette index the colorizer assigned it.
//! Multi-byte codepoints occupy several consecutive glyphs. Tabs are expanded
//! to spaces on the way in, so stored lines never contain tab bytes.

use crate::theme::PaletteIndex;
use crate::util::{is_continuation_byte, is_space, next_tab_stop, utf8_char_len, DEFAULT_TAB_SIZE};

use super::cursor::{ByteOffset, Coordinates};
use super::markers::LineMarkers;

/// One stored byte of document text plus its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: u8,
    pub color: PaletteIndex,
}

impl Glyph {
    pub const fn new(ch: u8) -> Self {
        Self {
            ch,
            color: PaletteIndex::Default,
        }
    }

    pub const fn with_color(ch: u8, color: PaletteIndex) -> Self {
        Self { ch, color }
    }
}

pub type Line = Vec<Glyph>;

/// Line-structured UTF-8 glyph storage with tab-aware coordinate arithmetic.
///
/// Line-keyed markers live next to the lines so that every structural edit
/// goes through [`GlyphBuffer::insert_line`] / [`GlyphBuffer::remove_lines`]
/// and renumbers them.
#[derive(Debug, Clone)]
pub struct GlyphBuffer {
    lines: Vec<Line>,
    tab_size: usize,
    markers: LineMarkers,
}

impl Default for GlyphBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphBuffer {
    /// Create a buffer holding one empty line
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            tab_size: DEFAULT_TAB_SIZE,
            markers: LineMarkers::new(),
        }
    }

    /// Create a buffer with initial text
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// Replace the whole content. `\r` is dropped, tabs are expanded.
    /// Markers are kept as they are.
    pub fn set_text(&mut self, text: &str) {
        let markers = std::mem::take(&mut self.markers);
        self.lines.clear();
        self.lines.push(Line::new());
        let mut at = Coordinates::zero();
        self.insert_text_at(&mut at, text);
        self.markers = markers;
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    pub fn set_tab_size(&mut self, tab_size: usize) {
        self.tab_size = tab_size;
    }

    pub fn markers(&self) -> &LineMarkers {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut LineMarkers {
        &mut self.markers
    }

    /// Number of lines (always >= 1)
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    pub fn line(&self, line: usize) -> Option<&Line> {
        self.lines.get(line)
    }

    pub fn glyph(&self, line: usize, index: ByteOffset) -> Option<&Glyph> {
        self.lines.get(line).and_then(|l| l.get(index.0))
    }

    /// Line content without the newline
    pub fn line_text(&self, line: usize) -> String {
        self.lines
            .get(line)
            .map(|l| bytes_to_string(l.iter().map(|g| g.ch).collect()))
            .unwrap_or_default()
    }

    /// Whole document, lines joined with `\n`
    pub fn text(&self) -> String {
        let mut bytes = Vec::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                bytes.push(b'\n');
            }
            bytes.extend(line.iter().map(|g| g.ch));
        }
        bytes_to_string(bytes)
    }

    /// Text between two coordinates, `\n` between lines
    pub fn text_range(&self, start: Coordinates, end: Coordinates) -> String {
        let (start, end) = (self.sanitize(start), self.sanitize(end));
        if end <= start {
            return String::new();
        }
        let mut bytes = Vec::new();
        let mut line = start.line;
        let mut index = self.character_index(start).0;
        let end_index = self.character_index(end).0;
        while line < end.line || index < end_index {
            let glyphs = &self.lines[line];
            if index < glyphs.len() {
                bytes.push(glyphs[index].ch);
                index += 1;
            } else {
                line += 1;
                index = 0;
                if line >= self.lines.len() {
                    break;
                }
                bytes.push(b'\n');
            }
        }
        bytes_to_string(bytes)
    }

    // =========================================================================
    // Coordinate arithmetic
    // =========================================================================

    /// Byte index reached by walking `coord.line` until visual column
    /// `coord.column` or the end of the line.
    pub fn character_index(&self, coord: Coordinates) -> ByteOffset {
        let Some(line) = self.lines.get(coord.line) else {
            return ByteOffset(0);
        };
        let mut column = 0;
        let mut index = 0;
        while index < line.len() && column < coord.column {
            let ch = line[index].ch;
            column = if ch == b'\t' {
                next_tab_stop(column, self.tab_size)
            } else {
                column + 1
            };
            index += utf8_char_len(ch);
        }
        ByteOffset(index.min(line.len()))
    }

    /// Visual column of byte `index` on `line`
    pub fn character_column(&self, line: usize, index: ByteOffset) -> usize {
        let Some(glyphs) = self.lines.get(line) else {
            return 0;
        };
        let mut column = 0;
        let mut i = 0;
        while i < index.0 && i < glyphs.len() {
            let ch = glyphs[i].ch;
            i += utf8_char_len(ch);
            column = if ch == b'\t' {
                next_tab_stop(column, self.tab_size)
            } else {
                column + 1
            };
        }
        column
    }

    /// Visual column of the end of `line`
    pub fn line_max_column(&self, line: usize) -> usize {
        match self.lines.get(line) {
            Some(glyphs) => self.character_column(line, ByteOffset(glyphs.len())),
            None => 0,
        }
    }

    /// Clamp a coordinate onto the document.
    ///
    /// A line past the end maps to the end of the last line.
    pub fn sanitize(&self, coord: Coordinates) -> Coordinates {
        if coord.line >= self.lines.len() {
            let line = self.lines.len() - 1;
            return Coordinates::new(line, self.line_max_column(line));
        }
        Coordinates::new(
            coord.line,
            coord.column.min(self.line_max_column(coord.line)),
        )
    }

    /// One codepoint forward; from the end of a line to column 0 of the next.
    /// No-op at the end of the document.
    pub fn advance(&self, coord: Coordinates) -> Coordinates {
        let coord = self.sanitize(coord);
        let line = &self.lines[coord.line];
        let index = self.character_index(coord).0;
        if index < line.len() {
            let next = (index + utf8_char_len(line[index].ch)).min(line.len());
            Coordinates::new(coord.line, self.character_column(coord.line, ByteOffset(next)))
        } else if coord.line + 1 < self.lines.len() {
            Coordinates::new(coord.line + 1, 0)
        } else {
            coord
        }
    }

    /// One codepoint back; from column 0 to the end of the previous line.
    /// No-op at the start of the document.
    pub fn retreat(&self, coord: Coordinates) -> Coordinates {
        let coord = self.sanitize(coord);
        let index = self.character_index(coord);
        if index.0 > 0 {
            let prev = self.prev_char_start(coord.line, index);
            Coordinates::new(coord.line, self.character_column(coord.line, prev))
        } else if coord.line > 0 {
            Coordinates::new(coord.line - 1, self.line_max_column(coord.line - 1))
        } else {
            coord
        }
    }

    /// Start of the codepoint preceding `index`
    pub fn prev_char_start(&self, line: usize, index: ByteOffset) -> ByteOffset {
        let Some(glyphs) = self.lines.get(line) else {
            return ByteOffset(0);
        };
        let mut i = index.0.min(glyphs.len());
        if i == 0 {
            return ByteOffset(0);
        }
        i -= 1;
        while i > 0 && is_continuation_byte(glyphs[i].ch) {
            i -= 1;
        }
        ByteOffset(i)
    }

    // =========================================================================
    // Word boundaries
    // =========================================================================

    /// Token class used for word boundaries: whitespace-ness, plus the palette
    /// index when colorization is on.
    fn word_class(&self, line: usize, index: usize, by_color: bool) -> (bool, Option<PaletteIndex>) {
        let glyph = self.lines[line][index];
        (is_space(glyph.ch), by_color.then_some(glyph.color))
    }

    /// Start of the token containing (or ending at) `at`
    pub fn find_word_start(&self, at: Coordinates, by_color: bool) -> Coordinates {
        let at = self.sanitize(at);
        let line = &self.lines[at.line];
        if line.is_empty() {
            return at;
        }
        let mut index = self.character_index(at);
        if index.0 >= line.len() {
            index = self.prev_char_start(at.line, index);
        }
        let class = self.word_class(at.line, index.0, by_color);
        while index.0 > 0 {
            let prev = self.prev_char_start(at.line, index);
            if self.word_class(at.line, prev.0, by_color) != class {
                break;
            }
            index = prev;
        }
        Coordinates::new(at.line, self.character_column(at.line, index))
    }

    /// End of the token starting at or containing `at`
    pub fn find_word_end(&self, at: Coordinates, by_color: bool) -> Coordinates {
        let at = self.sanitize(at);
        let line = &self.lines[at.line];
        let mut index = self.character_index(at).0;
        if index >= line.len() {
            return at;
        }
        let class = self.word_class(at.line, index, by_color);
        while index < line.len() && self.word_class(at.line, index, by_color) == class {
            index += utf8_char_len(line[index].ch);
        }
        Coordinates::new(
            at.line,
            self.character_column(at.line, ByteOffset(index.min(line.len()))),
        )
    }

    // =========================================================================
    // Raw mutation
    // =========================================================================

    /// Insert `text` at `at`, moving `at` to the end of the inserted text.
    ///
    /// `\r` is dropped, `\n` splits the line, tabs become `tab_size` spaces,
    /// everything else is stored byte by byte with the default color.
    /// Returns the number of newlines inserted.
    pub fn insert_text_at(&mut self, at: &mut Coordinates, text: &str) -> usize {
        *at = self.sanitize(*at);
        let mut index = self.character_index(*at).0;
        let mut inserted_lines = 0;
        let mut encoded = [0u8; 4];

        for ch in text.chars() {
            match ch {
                '\r' => {}
                '\n' => {
                    let tail = if index < self.lines[at.line].len() {
                        self.lines[at.line].split_off(index)
                    } else {
                        Line::new()
                    };
                    self.insert_line(at.line + 1);
                    self.lines[at.line + 1] = tail;
                    at.line += 1;
                    at.column = 0;
                    index = 0;
                    inserted_lines += 1;
                }
                '\t' => {
                    let spaces = std::iter::repeat(Glyph::new(b' ')).take(self.tab_size);
                    self.lines[at.line].splice(index..index, spaces);
                    index += self.tab_size;
                    at.column += self.tab_size;
                }
                _ => {
                    let bytes = ch.encode_utf8(&mut encoded).as_bytes();
                    self.lines[at.line].splice(index..index, bytes.iter().map(|&b| Glyph::new(b)));
                    index += bytes.len();
                    at.column += 1;
                }
            }
        }

        inserted_lines
    }

    /// Remove the text between `start` and `end` (either order).
    pub fn delete_range(&mut self, start: Coordinates, end: Coordinates) {
        let (mut start, mut end) = (self.sanitize(start), self.sanitize(end));
        if start == end {
            return;
        }
        if end < start {
            std::mem::swap(&mut start, &mut end);
        }

        let start_index = self.character_index(start).0;
        let end_index = self.character_index(end).0;

        if start.line == end.line {
            let max_column = self.line_max_column(start.line);
            let line = &mut self.lines[start.line];
            if end.column >= max_column {
                line.truncate(start_index);
            } else {
                line.drain(start_index..end_index.max(start_index));
            }
        } else {
            self.lines[start.line].truncate(start_index);
            let end_line = &self.lines[end.line];
            let tail: Line = end_line[end_index.min(end_line.len())..].to_vec();
            self.lines[start.line].extend(tail);
            self.remove_lines(start.line + 1, end.line + 1);
        }
    }

    /// Insert an empty line before `index` (clamped to `line_count()`)
    pub fn insert_line(&mut self, index: usize) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, Line::new());
        self.markers.lines_inserted(index, 1);
    }

    /// Remove lines `[start, end)`. The buffer keeps at least one line.
    pub fn remove_lines(&mut self, start: usize, end: usize) {
        let end = end.min(self.lines.len());
        if start >= end {
            return;
        }
        self.lines.drain(start..end);
        self.markers.lines_removed(start, end);
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
    }

    /// Remove a single line
    pub fn remove_line(&mut self, index: usize) {
        self.remove_lines(index, index + 1);
    }
}

/// Glyph bytes always come from `&str` input, so this is lossless in practice
fn bytes_to_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, column: usize) -> Coordinates {
        Coordinates::new(line, column)
    }

    #[test]
    fn test_new_buffer_has_one_empty_line() {
        let buffer = GlyphBuffer::new();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn test_set_text_splits_lines_and_drops_cr() {
        let buffer = GlyphBuffer::from_text("one\r\ntwo\n");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.line_text(0), "one");
        assert_eq!(buffer.line_text(1), "two");
        assert_eq!(buffer.line_text(2), "");
        assert_eq!(buffer.text(), "one\ntwo\n");
    }

    #[test]
    fn test_tabs_are_expanded_on_insert() {
        let buffer = GlyphBuffer::from_text("\tx");
        assert_eq!(buffer.line_text(0), "    x");
        assert_eq!(buffer.line_max_column(0), 5);
    }

    #[test]
    fn test_character_index_and_column_with_utf8() {
        let buffer = GlyphBuffer::from_text("aé€b");
        assert_eq!(buffer.character_index(at(0, 0)), ByteOffset(0));
        assert_eq!(buffer.character_index(at(0, 1)), ByteOffset(1));
        assert_eq!(buffer.character_index(at(0, 2)), ByteOffset(3));
        assert_eq!(buffer.character_index(at(0, 3)), ByteOffset(6));
        assert_eq!(buffer.character_index(at(0, 4)), ByteOffset(7));
        assert_eq!(buffer.character_column(0, ByteOffset(6)), 3);
        assert_eq!(buffer.line_max_column(0), 4);
    }

    #[test]
    fn test_character_index_measures_stored_tabs() {
        let mut buffer = GlyphBuffer::new();
        buffer.lines[0] = b"\tab".iter().map(|&b| Glyph::new(b)).collect();
        assert_eq!(buffer.character_column(0, ByteOffset(1)), 4);
        assert_eq!(buffer.character_index(at(0, 4)), ByteOffset(1));
        assert_eq!(buffer.character_index(at(0, 5)), ByteOffset(2));
    }

    #[test]
    fn test_sanitize_clamps() {
        let buffer = GlyphBuffer::from_text("abc\nde");
        assert_eq!(buffer.sanitize(at(0, 10)), at(0, 3));
        assert_eq!(buffer.sanitize(at(9, 0)), at(1, 2));
        assert_eq!(buffer.sanitize(at(1, 1)), at(1, 1));
    }

    #[test]
    fn test_advance_and_retreat() {
        let buffer = GlyphBuffer::from_text("aé\nb");
        assert_eq!(buffer.advance(at(0, 0)), at(0, 1));
        assert_eq!(buffer.advance(at(0, 1)), at(0, 2));
        assert_eq!(buffer.advance(at(0, 2)), at(1, 0));
        assert_eq!(buffer.advance(at(1, 1)), at(1, 1));
        assert_eq!(buffer.retreat(at(1, 0)), at(0, 2));
        assert_eq!(buffer.retreat(at(0, 2)), at(0, 1));
        assert_eq!(buffer.retreat(at(0, 0)), at(0, 0));
    }

    #[test]
    fn test_insert_text_at_returns_newline_count() {
        let mut buffer = GlyphBuffer::from_text("hello world");
        let mut pos = at(0, 5);
        let lines = buffer.insert_text_at(&mut pos, ",\nbig");
        assert_eq!(lines, 1);
        assert_eq!(pos, at(1, 3));
        assert_eq!(buffer.text(), "hello,\nbig world");
    }

    #[test]
    fn test_delete_range_same_line() {
        let mut buffer = GlyphBuffer::from_text("hello world");
        buffer.delete_range(at(0, 5), at(0, 11));
        assert_eq!(buffer.text(), "hello");
        buffer.delete_range(at(0, 1), at(0, 3));
        assert_eq!(buffer.text(), "hlo");
    }

    #[test]
    fn test_delete_range_cross_line() {
        let mut buffer = GlyphBuffer::from_text("one\ntwo\nthree");
        buffer.delete_range(at(0, 1), at(2, 2));
        assert_eq!(buffer.text(), "oree");
        assert_eq!(buffer.line_count(), 1);
    }

    #[test]
    fn test_delete_range_reversed_arguments() {
        let mut buffer = GlyphBuffer::from_text("abcdef");
        buffer.delete_range(at(0, 4), at(0, 1));
        assert_eq!(buffer.text(), "aef");
    }

    #[test]
    fn test_text_range() {
        let buffer = GlyphBuffer::from_text("one\ntwo\nthree");
        assert_eq!(buffer.text_range(at(0, 1), at(2, 2)), "ne\ntwo\nth");
        assert_eq!(buffer.text_range(at(1, 0), at(1, 3)), "two");
        assert_eq!(buffer.text_range(at(1, 3), at(2, 0)), "\n");
        assert_eq!(buffer.text_range(at(2, 0), at(1, 0)), "");
    }

    #[test]
    fn test_remove_all_lines_keeps_one() {
        let mut buffer = GlyphBuffer::from_text("a\nb");
        buffer.remove_lines(0, 2);
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn test_structural_edits_renumber_markers() {
        let mut buffer = GlyphBuffer::from_text("a\nb\nc\nd");
        buffer
            .markers_mut()
            .set_breakpoints([1usize, 3].into_iter().collect());
        let mut pos = at(0, 1);
        buffer.insert_text_at(&mut pos, "\n");
        assert!(buffer.markers().has_breakpoint(2));
        assert!(buffer.markers().has_breakpoint(4));

        // Lines 2 and 3 ("b", "c") go away; the breakpoint on "d" follows it
        buffer.delete_range(at(1, 0), at(3, 0));
        assert_eq!(buffer.text(), "a\nc\nd");
        assert_eq!(
            buffer.markers().breakpoints().iter().copied().collect::<Vec<_>>(),
            vec![2]
        );
    }

    #[test]
    fn test_word_boundaries_by_whitespace() {
        let buffer = GlyphBuffer::from_text("foo  bar");
        assert_eq!(buffer.find_word_start(at(0, 2), false), at(0, 0));
        assert_eq!(buffer.find_word_end(at(0, 0), false), at(0, 3));
        assert_eq!(buffer.find_word_end(at(0, 3), false), at(0, 5));
        assert_eq!(buffer.find_word_start(at(0, 8), false), at(0, 5));
    }

    #[test]
    fn test_word_boundaries_by_color() {
        let mut buffer = GlyphBuffer::from_text("ab.cd");
        for (i, glyph) in buffer.lines_mut()[0].iter_mut().enumerate() {
            glyph.color = if i == 2 {
                PaletteIndex::Punctuation
            } else {
                PaletteIndex::Identifier
            };
        }
        assert_eq!(buffer.find_word_end(at(0, 0), true), at(0, 2));
        assert_eq!(buffer.find_word_start(at(0, 4), true), at(0, 3));
        assert_eq!(buffer.find_word_end(at(0, 0), false), at(0, 5));
    }
}
