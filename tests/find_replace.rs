//! Find/replace tests - match lists, navigation, replace current and all

mod common;

use common::{glsl_editor, line_colors, pos, test_editor};
use token_core::editable::TextEditor;
use token_core::search::{SearchContext, SearchMode};
use token_core::theme::PaletteIndex;

// ========================================================================
// Finding
// ========================================================================

#[test]
fn test_find_all_matches() {
    let editor = TextEditor::with_text("aXbXcX");
    let mut search = SearchContext::new("X");
    search.recompute_for(&editor);

    assert_eq!(search.matches(), &[pos(0, 1), pos(0, 3), pos(0, 5)]);
    assert_eq!(search.mode, SearchMode::Find);
}

#[test]
fn test_find_across_lines() {
    let editor = TextEditor::with_text("let a = 1;\n  let b = a;\nlet");
    let mut search = SearchContext::new("let");
    search.recompute_for(&editor);
    assert_eq!(search.matches(), &[pos(0, 0), pos(1, 2), pos(2, 0)]);
}

#[test]
fn test_multiline_query() {
    let editor = TextEditor::with_text("end\nstart end\nstart");
    let mut search = SearchContext::new("end\nstart");
    search.recompute_for(&editor);
    assert_eq!(search.matches(), &[pos(0, 0), pos(1, 6)]);
    assert_eq!(search.match_end(pos(1, 6)), pos(2, 5));
}

#[test]
fn test_columns_count_codepoints() {
    let editor = TextEditor::with_text("ééx");
    let mut search = SearchContext::new("x");
    search.recompute_for(&editor);
    assert_eq!(search.matches(), &[pos(0, 2)]);
}

// ========================================================================
// Navigation
// ========================================================================

#[test]
fn test_next_selects_match_and_moves_cursor() {
    let mut editor = test_editor("one two one", 0, 0);
    let mut search = SearchContext::new("one");
    search.recompute_for(&editor);
    editor.take_scroll_request();

    assert_eq!(search.next(&mut editor), Some(pos(0, 0)));
    assert_eq!(search.next(&mut editor), Some(pos(0, 8)));
    assert_eq!(editor.selected_text(), "one");
    assert_eq!(editor.cursor_position(), pos(0, 11));
    assert!(editor.take_scroll_request());

    assert_eq!(search.next(&mut editor), Some(pos(0, 0)));
    assert_eq!(search.current(), Some(0));
}

#[test]
fn test_previous_starts_from_last() {
    let mut editor = TextEditor::with_text("aXbXcX");
    let mut search = SearchContext::new("X");
    search.recompute_for(&editor);

    assert_eq!(search.previous(&mut editor), Some(pos(0, 5)));
    assert_eq!(search.previous(&mut editor), Some(pos(0, 3)));
    assert_eq!(search.current_match(), Some(pos(0, 3)));
}

// ========================================================================
// Replacing
// ========================================================================

#[test]
fn test_replace_all_single_undo() {
    let mut editor = TextEditor::with_text("aXbXcX");
    let mut search = SearchContext::with_replacement("X", "Y");
    search.recompute_for(&editor);

    assert_eq!(search.replace_all(&mut editor), 3);
    assert_eq!(editor.text(), "aYbYcY");

    assert!(editor.undo(1));
    assert_eq!(editor.text(), "aXbXcX");
    assert!(!editor.can_undo());
}

#[test]
fn test_replace_all_with_longer_text_across_lines() {
    let mut editor = TextEditor::with_text("x = 1\ny = x + x");
    let mut search = SearchContext::with_replacement("x", "value");
    search.recompute_for(&editor);

    assert_eq!(search.replace_all(&mut editor), 3);
    assert_eq!(editor.text(), "value = 1\ny = value + value");

    search.recompute_for(&editor);
    assert!(search.matches().is_empty());
}

#[test]
fn test_replace_all_with_newline_replacement() {
    let mut editor = TextEditor::with_text("a,b,c");
    let mut search = SearchContext::with_replacement(",", "\n");
    search.recompute_for(&editor);

    assert_eq!(search.replace_all(&mut editor), 2);
    assert_eq!(editor.text_lines(), vec!["a", "b", "c"]);
    editor.undo(1);
    assert_eq!(editor.text(), "a,b,c");
}

#[test]
fn test_replace_all_with_line_breaks_recolors_shifted_lines() {
    let mut editor = glsl_editor("x;\nx;\nx;\nx;\nx;");
    let mut search = SearchContext::with_replacement("x", "int\nint");
    search.recompute_for(&editor);

    assert_eq!(search.replace_all(&mut editor), 5);
    assert_eq!(editor.line_count(), 10);
    let first_colors = |editor: &TextEditor| {
        (0..editor.line_count())
            .map(|line| line_colors(editor, line)[0])
            .collect::<Vec<_>>()
    };

    editor.colorize_all();
    assert_eq!(first_colors(&editor), vec![PaletteIndex::Keyword; 10]);

    editor.undo(1);
    editor.colorize_all();
    assert_eq!(first_colors(&editor), vec![PaletteIndex::Identifier; 5]);

    editor.redo(1);
    editor.colorize_all();
    assert_eq!(first_colors(&editor), vec![PaletteIndex::Keyword; 10]);
}

#[test]
fn test_replace_all_in_read_only_editor() {
    let mut editor = TextEditor::with_text("aXb");
    editor.set_read_only(true);
    let mut search = SearchContext::with_replacement("X", "Y");
    search.recompute_for(&editor);

    assert_eq!(search.replace_all(&mut editor), 0);
    assert_eq!(editor.text(), "aXb");
}

#[test]
fn test_replace_current_then_continue() {
    let mut editor = TextEditor::with_text("cat cat cat");
    let mut search = SearchContext::with_replacement("cat", "dog");
    search.recompute_for(&editor);

    search.next(&mut editor);
    assert!(search.replace_current(&mut editor));
    assert_eq!(editor.text(), "dog cat cat");
    assert_eq!(search.matches(), &[pos(0, 4), pos(0, 8)]);

    search.next(&mut editor);
    assert!(search.replace_current(&mut editor));
    assert_eq!(editor.text(), "dog dog cat");

    editor.undo(1);
    assert_eq!(editor.text(), "dog cat cat");
}

#[test]
fn test_replace_current_without_selection_does_nothing() {
    let mut editor = TextEditor::with_text("cat");
    let mut search = SearchContext::with_replacement("cat", "dog");
    search.recompute_for(&editor);
    assert!(!search.replace_current(&mut editor));
    assert_eq!(editor.text(), "cat");
}

#[test]
fn test_one_context_serves_several_editors() {
    let mut first = TextEditor::with_text("foo bar");
    let mut second = TextEditor::with_text("bar bar");
    let mut search = SearchContext::with_replacement("bar", "baz");

    search.recompute_for(&first);
    search.replace_all(&mut first);
    search.recompute_for(&second);
    search.replace_all(&mut second);

    assert_eq!(first.text(), "foo baz");
    assert_eq!(second.text(), "baz baz");
}
