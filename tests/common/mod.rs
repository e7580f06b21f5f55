//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use token_core::editable::{ByteOffset, Coordinates, SelectionMode, TextEditor};
use token_core::syntax::{GlyphContext, LanguageDefinition};
use token_core::theme::PaletteIndex;

/// Shorthand for a coordinate
pub fn pos(line: usize, column: usize) -> Coordinates {
    Coordinates::new(line, column)
}

/// Create a plain-text editor with given text and cursor position
pub fn test_editor(text: &str, line: usize, column: usize) -> TextEditor {
    let mut editor = TextEditor::with_text(text);
    editor.set_cursor_position(pos(line, column));
    editor
}

/// Create an editor with a selection; the cursor sits at the selection end
pub fn test_editor_with_selection(
    text: &str,
    start_line: usize,
    start_col: usize,
    end_line: usize,
    end_col: usize,
) -> TextEditor {
    let mut editor = TextEditor::with_text(text);
    editor.set_selection(
        pos(start_line, start_col),
        pos(end_line, end_col),
        SelectionMode::Normal,
    );
    editor.set_cursor_position(pos(end_line, end_col));
    editor
}

/// GLSL editor with `text`, fully colorized
pub fn glsl_editor(text: &str) -> TextEditor {
    let mut editor = TextEditor::new();
    editor
        .set_language_definition(LanguageDefinition::glsl())
        .expect("built-in GLSL definition compiles");
    editor.set_text(text);
    editor.colorize_all();
    editor
}

/// Classified palette index of every glyph on `line`
pub fn line_colors(editor: &TextEditor, line: usize) -> Vec<PaletteIndex> {
    editor
        .buffer()
        .line(line)
        .map(|glyphs| glyphs.iter().map(|g| g.color).collect())
        .unwrap_or_default()
}

/// Display palette index of every glyph on `line` (comments resolved)
pub fn display_indices(editor: &TextEditor, line: usize) -> Vec<PaletteIndex> {
    let len = editor.buffer().line(line).map_or(0, |glyphs| glyphs.len());
    (0..len)
        .map(|index| editor.glyph_palette_index(line, ByteOffset(index)))
        .collect()
}

/// Lexical context of every glyph on `line`
pub fn line_contexts(editor: &TextEditor, line: usize) -> Vec<GlyphContext> {
    let len = editor.buffer().line(line).map_or(0, |glyphs| glyphs.len());
    (0..len)
        .map(|index| editor.colorizer().context(line, index))
        .collect()
}
