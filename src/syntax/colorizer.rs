//! Incremental colorizer
//!
//! Two passes over the glyph buffer:
//!
//! - the lexical scan walks the whole document and rebuilds an overlay of
//!   comment / string / preprocessor context per byte;
//! - token classification re-colors the dirty line range a bounded chunk at a
//!   time so a host can spread the work across frames.
//!
//! The overlay is derived data. It is thrown away and rebuilt whenever an
//! edit marks the comment state dirty, never patched in place.

use super::language::CompiledLanguage;
use crate::editable::buffer::{Glyph, GlyphBuffer};
use crate::theme::{Color, Palette, PaletteIndex};
use crate::util::utf8_char_len;

/// Lines classified per step when only regex rules are available
pub const REGEX_CHUNK_LINES: usize = 10;
/// Lines classified per step when a native tokenizer is installed
pub const NATIVE_CHUNK_LINES: usize = 10_000;

/// Lexical context of one byte, as computed by the scan pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphContext {
    pub comment: bool,
    pub multi_line_comment: bool,
    pub preprocessor: bool,
}

/// Half-open line interval waiting for classification, plus the flag that
/// forces a full lexical rescan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRange {
    min: usize,
    max: usize,
    comments_dirty: bool,
}

impl Default for DirtyRange {
    fn default() -> Self {
        Self {
            min: usize::MAX,
            max: 0,
            comments_dirty: false,
        }
    }
}

impl DirtyRange {
    pub fn lines(&self) -> Option<std::ops::Range<usize>> {
        (self.min < self.max).then_some(self.min..self.max)
    }

    pub fn comments_dirty(&self) -> bool {
        self.comments_dirty
    }

    pub fn is_flushed(&self) -> bool {
        self.min >= self.max && !self.comments_dirty
    }

    /// Union `[start, end)` into the range and request a rescan
    pub fn extend(&mut self, start: usize, end: usize) {
        self.min = self.min.min(start);
        self.max = self.max.max(end).max(self.min);
        self.comments_dirty = true;
    }

    fn reset_lines(&mut self) {
        self.min = usize::MAX;
        self.max = 0;
    }
}

#[derive(Debug, Clone)]
pub struct Colorizer {
    language: CompiledLanguage,
    enabled: bool,
    dirty: DirtyRange,
    contexts: Vec<Vec<GlyphContext>>,
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::new(CompiledLanguage::default())
    }
}

impl Colorizer {
    pub fn new(language: CompiledLanguage) -> Self {
        Self {
            language,
            enabled: true,
            dirty: DirtyRange::default(),
            contexts: Vec::new(),
        }
    }

    pub fn language(&self) -> &CompiledLanguage {
        &self.language
    }

    /// Swap the language; the caller is expected to invalidate everything
    pub fn set_language(&mut self, language: CompiledLanguage) {
        self.language = language;
        self.contexts.clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn dirty(&self) -> &DirtyRange {
        &self.dirty
    }

    pub fn is_flushed(&self) -> bool {
        self.dirty.is_flushed()
    }

    /// Mark `count` lines starting at `from` for re-classification
    pub fn invalidate(&mut self, from: usize, count: usize) {
        self.dirty.extend(from, from.saturating_add(count));
    }

    pub fn invalidate_all(&mut self, line_count: usize) {
        self.dirty.extend(0, line_count);
    }

    pub fn chunk_lines(&self) -> usize {
        if self.language.tokenizer().is_some() {
            NATIVE_CHUNK_LINES
        } else {
            REGEX_CHUNK_LINES
        }
    }

    /// Run the lexical scan if needed and classify one chunk of the dirty
    /// range. Returns `true` once nothing is left to do.
    pub fn step(&mut self, buffer: &mut GlyphBuffer) -> bool {
        if !self.enabled {
            return true;
        }

        if self.dirty.comments_dirty {
            self.scan_context(buffer);
            self.dirty.comments_dirty = false;
        }

        let line_count = buffer.line_count();
        if let Some(range) = self.dirty.lines() {
            let start = range.start.min(line_count);
            let end = range.end.min(line_count);
            let to = end.min(start + self.chunk_lines());
            for line in start..to {
                self.classify_line(buffer, line);
            }
            tracing::trace!(from = start, to, pending = end - to, "colorized chunk");
            if to >= end {
                self.dirty.reset_lines();
            } else {
                self.dirty.min = to;
            }
        }

        self.dirty.is_flushed()
    }

    /// Step until flushed
    pub fn flush(&mut self, buffer: &mut GlyphBuffer) {
        while !self.step(buffer) {}
    }

    /// Lexical context of the byte at `(line, index)`; default when out of
    /// range or not yet scanned
    pub fn context(&self, line: usize, index: usize) -> GlyphContext {
        self.contexts
            .get(line)
            .and_then(|row| row.get(index))
            .copied()
            .unwrap_or_default()
    }

    /// Palette role a glyph is drawn with. Comments win outright.
    pub fn display_index(&self, glyph: &Glyph, line: usize, index: usize) -> PaletteIndex {
        if !self.enabled {
            return PaletteIndex::Default;
        }
        let context = self.context(line, index);
        if context.comment {
            PaletteIndex::Comment
        } else if context.multi_line_comment {
            PaletteIndex::MultiLineComment
        } else {
            glyph.color
        }
    }

    /// Final color of a glyph: the display role, averaged with the
    /// preprocessor color on preprocessor lines
    pub fn display_color(
        &self,
        glyph: &Glyph,
        line: usize,
        index: usize,
        palette: &Palette,
    ) -> Color {
        let role = self.display_index(glyph, line, index);
        let color = palette.get(role);
        let context = self.context(line, index);
        let is_comment = matches!(role, PaletteIndex::Comment | PaletteIndex::MultiLineComment);
        if self.enabled && context.preprocessor && !is_comment {
            color.average(palette.get(PaletteIndex::Preprocessor))
        } else {
            color
        }
    }

    /// Rebuild the context overlay for the whole document
    fn scan_context(&mut self, buffer: &GlyphBuffer) {
        let definition = self.language.definition();
        let comment_start = definition.comment_start.as_bytes();
        let comment_end = definition.comment_end.as_bytes();
        let single_line = definition.single_line_comment.as_bytes();
        let preproc_char = definition
            .preproc_char
            .filter(char::is_ascii)
            .map(|c| c as u8);

        let mut contexts = Vec::with_capacity(buffer.line_count());
        let mut in_string = false;
        let mut in_block = false;
        let mut in_single = false;
        let mut in_preproc = false;
        let mut continuation = false;

        for line in buffer.lines() {
            let bytes: Vec<u8> = line.iter().map(|g| g.ch).collect();
            let mut row = vec![GlyphContext::default(); bytes.len()];

            if !continuation {
                in_single = false;
                in_preproc = false;
                in_string = false;
            }
            continuation = bytes.last() == Some(&b'\\');
            let mut seen_non_space = false;

            let mut i = 0;
            while i < bytes.len() {
                let c = bytes[i];
                let mut span = utf8_char_len(c).min(bytes.len() - i);
                let mut block_byte = in_block;

                if !seen_non_space && !in_block && !in_string && Some(c) == preproc_char {
                    in_preproc = true;
                }
                if Some(c) != preproc_char && c != b' ' && c != b'\t' {
                    seen_non_space = true;
                }

                if in_string {
                    if c == b'"' {
                        if bytes.get(i + 1) == Some(&b'"') {
                            span = 2;
                        } else {
                            in_string = false;
                        }
                    } else if c == b'\\' && i + 1 < bytes.len() {
                        span = 1 + utf8_char_len(bytes[i + 1]).min(bytes.len() - i - 1);
                    }
                } else if in_block {
                    if starts_with(&bytes, i, comment_end) {
                        span = comment_end.len();
                        in_block = false;
                    }
                } else if in_single {
                    // rest of the line is a comment
                } else if starts_with(&bytes, i, comment_start) {
                    span = comment_start.len();
                    in_block = true;
                    block_byte = true;
                } else if starts_with(&bytes, i, single_line) {
                    in_single = true;
                } else if c == b'"' {
                    in_string = true;
                }

                let context = GlyphContext {
                    comment: in_single,
                    multi_line_comment: block_byte,
                    preprocessor: in_preproc,
                };
                for slot in &mut row[i..i + span] {
                    *slot = context;
                }
                i += span;
            }

            contexts.push(row);
        }

        self.contexts = contexts;
    }

    /// Reset a line to `Default` and re-color it token by token
    fn classify_line(&self, buffer: &mut GlyphBuffer, line_index: usize) {
        let Some(line) = buffer.lines_mut().get_mut(line_index) else {
            return;
        };
        let bytes: Vec<u8> = line.iter().map(|g| g.ch).collect();
        for glyph in line.iter_mut() {
            glyph.color = PaletteIndex::Default;
        }

        let mut pos = 0;
        while pos < bytes.len() {
            let token = self.match_token(&bytes[pos..]).map(|(start, end, color)| {
                let end = (pos + end).min(bytes.len());
                ((pos + start).min(end), end, color)
            });

            match token {
                Some((start, end, color)) if end > pos => {
                    let color = if color == PaletteIndex::Identifier {
                        let in_preprocessor = self.context(line_index, start).preprocessor;
                        self.language
                            .resolve_identifier(&bytes[start..end], in_preprocessor)
                    } else {
                        color
                    };
                    for glyph in &mut line[start..end] {
                        glyph.color = color;
                    }
                    pos = end;
                }
                _ => pos += utf8_char_len(bytes[pos]),
            }
        }
    }

    /// Native tokenizer first, then the first anchored regex rule
    fn match_token(&self, input: &[u8]) -> Option<(usize, usize, PaletteIndex)> {
        if let Some(token) = self
            .language
            .tokenizer()
            .and_then(|tokenizer| tokenizer.tokenize(input))
        {
            if token.start <= token.end {
                return Some((token.start, token.end, token.color));
            }
        }
        self.language.rules().iter().find_map(|(regex, color)| {
            regex
                .find(input)
                .filter(|m| m.start() == 0)
                .map(|m| (0, m.end(), *color))
        })
    }
}

fn starts_with(bytes: &[u8], at: usize, pattern: &[u8]) -> bool {
    !pattern.is_empty() && bytes[at..].starts_with(pattern)
}
