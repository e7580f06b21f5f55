//! Find/replace engine
//!
//! A [`SearchContext`] is owned by the host and handed to whichever editor it
//! currently searches, so several editors can share one query without any
//! global state. Queries are literal text.

use crate::editable::{Coordinates, SelectionMode, TextEditor};

/// Whether the host shows the replacement field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Find,
    FindAndReplace,
}

/// Query, replacement and the matches found for them
#[derive(Debug, Clone)]
pub struct SearchContext {
    /// Search query
    pub query: String,
    /// Replacement text
    pub replacement: String,
    pub mode: SearchMode,
    /// Case-sensitive search
    pub case_sensitive: bool,
    matches: Vec<Coordinates>,
    current: Option<usize>,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self {
            query: String::new(),
            replacement: String::new(),
            mode: SearchMode::Find,
            case_sensitive: true,
            matches: Vec::new(),
            current: None,
        }
    }
}

impl SearchContext {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..Self::default()
        }
    }

    pub fn with_replacement(query: &str, replacement: &str) -> Self {
        Self {
            query: query.to_string(),
            replacement: replacement.to_string(),
            mode: SearchMode::FindAndReplace,
            ..Self::default()
        }
    }

    /// Start of every occurrence, in document order (overlaps included)
    pub fn matches(&self) -> &[Coordinates] {
        &self.matches
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_match(&self) -> Option<Coordinates> {
        self.current.and_then(|i| self.matches.get(i).copied())
    }

    /// Scan `text` for the query, tracking line and column as it goes.
    /// Columns count codepoints, like editor coordinates.
    pub fn recompute(&mut self, text: &str) {
        self.matches.clear();
        self.current = None;
        if self.query.is_empty() {
            return;
        }

        let mut line = 0;
        let mut column = 0;
        for (offset, ch) in text.char_indices() {
            if self.matches_at(&text[offset..]) {
                self.matches.push(Coordinates::new(line, column));
            }
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }

        tracing::debug!(query = %self.query, matches = self.matches.len(), "search recomputed");
    }

    pub fn recompute_for(&mut self, editor: &TextEditor) {
        self.recompute(&editor.text());
    }

    fn matches_at(&self, haystack: &str) -> bool {
        if self.case_sensitive {
            return haystack.starts_with(&self.query);
        }
        let mut hay = haystack.chars();
        self.query.chars().all(|q| {
            hay.next()
                .is_some_and(|h| h == q || h.to_lowercase().eq(q.to_lowercase()))
        })
    }

    /// Coordinates just past an occurrence starting at `start`
    pub fn match_end(&self, start: Coordinates) -> Coordinates {
        let mut end = start;
        for ch in self.query.chars() {
            if ch == '\n' {
                end.line += 1;
                end.column = 0;
            } else {
                end.column += 1;
            }
        }
        end
    }

    /// Select the next occurrence (the first one on the first call), wrapping
    pub fn next(&mut self, editor: &mut TextEditor) -> Option<Coordinates> {
        let count = self.matches.len();
        if count == 0 {
            self.current = None;
            return None;
        }
        let index = match self.current {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.select(index, editor)
    }

    /// Select the previous occurrence (the last one on the first call), wrapping
    pub fn previous(&mut self, editor: &mut TextEditor) -> Option<Coordinates> {
        let count = self.matches.len();
        if count == 0 {
            self.current = None;
            return None;
        }
        let index = match self.current {
            Some(i) => (i.min(count - 1) + count - 1) % count,
            None => count - 1,
        };
        self.select(index, editor)
    }

    fn select(&mut self, index: usize, editor: &mut TextEditor) -> Option<Coordinates> {
        let start = *self.matches.get(index)?;
        let end = self.match_end(start);
        self.current = Some(index);
        editor.set_selection(start, end, SelectionMode::Normal);
        editor.set_cursor_position(end);
        editor.request_scroll_to_cursor();
        Some(start)
    }

    /// Replace the currently selected occurrence, then rescan
    pub fn replace_current(&mut self, editor: &mut TextEditor) -> bool {
        let Some(start) = self.current_match() else {
            return false;
        };
        let end = self.match_end(start);
        let replaced = editor.replace_ranges(&[(start, end)], &self.replacement) > 0;
        if replaced {
            self.recompute_for(editor);
        }
        replaced
    }

    /// Replace every non-overlapping occurrence as a single undo step.
    ///
    /// No-op when the replacement equals the query or nothing matched.
    /// Clears the match list; call [`SearchContext::recompute`] before
    /// navigating again.
    pub fn replace_all(&mut self, editor: &mut TextEditor) -> usize {
        if self.query.is_empty() || self.query == self.replacement || self.matches.is_empty() {
            return 0;
        }

        let mut ranges = Vec::with_capacity(self.matches.len());
        let mut last_end = Coordinates::zero();
        for &start in &self.matches {
            if !ranges.is_empty() && start < last_end {
                continue;
            }
            last_end = self.match_end(start);
            ranges.push((start, last_end));
        }

        let replaced = editor.replace_ranges(&ranges, &self.replacement);
        tracing::debug!(query = %self.query, replaced, "replace all");
        self.matches.clear();
        self.current = None;
        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, column: usize) -> Coordinates {
        Coordinates::new(line, column)
    }

    #[test]
    fn test_recompute_tracks_lines_and_columns() {
        let mut search = SearchContext::new("ab");
        search.recompute("ab x\nxxab\néab");
        assert_eq!(search.matches(), &[at(0, 0), at(1, 2), at(2, 1)]);
        assert_eq!(search.current(), None);
    }

    #[test]
    fn test_overlapping_occurrences_are_listed() {
        let mut search = SearchContext::new("aa");
        search.recompute("aaa");
        assert_eq!(search.matches(), &[at(0, 0), at(0, 1)]);
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let mut search = SearchContext::new("");
        search.recompute("anything");
        assert!(search.matches().is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let mut search = SearchContext::new("foo");
        search.case_sensitive = false;
        search.recompute("Foo fOO bar");
        assert_eq!(search.matches(), &[at(0, 0), at(0, 4)]);
    }

    #[test]
    fn test_match_end_spans_lines() {
        let search = SearchContext::new("a\nbc");
        assert_eq!(search.match_end(at(3, 5)), at(4, 2));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut editor = TextEditor::with_text("x1x2x");
        let mut search = SearchContext::new("x");
        search.recompute_for(&editor);

        assert_eq!(search.previous(&mut editor), Some(at(0, 4)));
        assert_eq!(search.next(&mut editor), Some(at(0, 0)));
        assert_eq!(search.next(&mut editor), Some(at(0, 2)));
        assert_eq!(editor.selected_text(), "x");
        assert_eq!(editor.selection_start(), at(0, 2));
        assert_eq!(search.previous(&mut editor), Some(at(0, 0)));
    }

    #[test]
    fn test_navigation_without_matches() {
        let mut editor = TextEditor::with_text("abc");
        let mut search = SearchContext::new("z");
        search.recompute_for(&editor);
        assert_eq!(search.next(&mut editor), None);
        assert_eq!(search.previous(&mut editor), None);
    }

    #[test]
    fn test_replace_all_is_one_undo_step() {
        let mut editor = TextEditor::with_text("a.b.c\n.d");
        let mut search = SearchContext::with_replacement(".", "::");
        search.recompute_for(&editor);

        assert_eq!(search.replace_all(&mut editor), 3);
        assert_eq!(editor.text(), "a::b::c\n::d");
        assert!(search.matches().is_empty());

        assert!(editor.undo(1));
        assert_eq!(editor.text(), "a.b.c\n.d");
        assert!(editor.redo(1));
        assert_eq!(editor.text(), "a::b::c\n::d");
    }

    #[test]
    fn test_replace_all_skips_overlaps() {
        let mut editor = TextEditor::with_text("aaaa");
        let mut search = SearchContext::with_replacement("aa", "b");
        search.recompute_for(&editor);
        assert_eq!(search.matches().len(), 3);
        assert_eq!(search.replace_all(&mut editor), 2);
        assert_eq!(editor.text(), "bb");
    }

    #[test]
    fn test_replace_all_guards() {
        let mut editor = TextEditor::with_text("abc");
        let mut same = SearchContext::with_replacement("b", "b");
        same.recompute_for(&editor);
        assert_eq!(same.replace_all(&mut editor), 0);

        let mut stale = SearchContext::with_replacement("b", "x");
        assert_eq!(stale.replace_all(&mut editor), 0);
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_replace_all_with_empty_replacement() {
        let mut editor = TextEditor::with_text("a-b-c");
        let mut search = SearchContext::with_replacement("-", "");
        search.recompute_for(&editor);
        assert_eq!(search.replace_all(&mut editor), 2);
        assert_eq!(editor.text(), "abc");
        editor.undo(1);
        assert_eq!(editor.text(), "a-b-c");
    }

    #[test]
    fn test_replace_current() {
        let mut editor = TextEditor::with_text("cat cat");
        let mut search = SearchContext::with_replacement("cat", "dog");
        search.recompute_for(&editor);
        search.next(&mut editor);
        search.next(&mut editor);
        assert!(search.replace_current(&mut editor));
        assert_eq!(editor.text(), "cat dog");
        assert_eq!(search.matches(), &[at(0, 0)]);
    }
}
