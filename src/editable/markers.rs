//! Line-keyed side tables (error markers and breakpoints).
//!
//! Every structural line change in the buffer is forwarded here so the
//! entries keep pointing at the same text after lines are inserted or removed.

use std::collections::{BTreeMap, BTreeSet};

/// Error markers and breakpoints keyed by 0-based line number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMarkers {
    errors: BTreeMap<usize, String>,
    breakpoints: BTreeSet<usize>,
}

impl LineMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_errors(&mut self, errors: BTreeMap<usize, String>) {
        self.errors = errors;
    }

    pub fn errors(&self) -> &BTreeMap<usize, String> {
        &self.errors
    }

    pub fn error_at(&self, line: usize) -> Option<&str> {
        self.errors.get(&line).map(String::as_str)
    }

    pub fn set_breakpoints(&mut self, breakpoints: BTreeSet<usize>) {
        self.breakpoints = breakpoints;
    }

    pub fn breakpoints(&self) -> &BTreeSet<usize> {
        &self.breakpoints
    }

    pub fn has_breakpoint(&self, line: usize) -> bool {
        self.breakpoints.contains(&line)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.breakpoints.is_empty()
    }

    /// `count` lines were inserted before line `at`
    pub fn lines_inserted(&mut self, at: usize, count: usize) {
        if count == 0 || self.is_empty() {
            return;
        }
        let shift = |line: usize| if line >= at { line + count } else { line };
        self.errors = std::mem::take(&mut self.errors)
            .into_iter()
            .map(|(line, msg)| (shift(line), msg))
            .collect();
        self.breakpoints = std::mem::take(&mut self.breakpoints)
            .into_iter()
            .map(shift)
            .collect();
    }

    /// Lines `[start, end)` were removed
    pub fn lines_removed(&mut self, start: usize, end: usize) {
        if end <= start || self.is_empty() {
            return;
        }
        let removed = end - start;
        let remap = |line: usize| {
            if line < start {
                Some(line)
            } else if line < end {
                None
            } else {
                Some(line - removed)
            }
        };
        self.errors = std::mem::take(&mut self.errors)
            .into_iter()
            .filter_map(|(line, msg)| remap(line).map(|l| (l, msg)))
            .collect();
        self.breakpoints = std::mem::take(&mut self.breakpoints)
            .into_iter()
            .filter_map(remap)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(errors: &[usize], breakpoints: &[usize]) -> LineMarkers {
        let mut m = LineMarkers::new();
        m.set_errors(errors.iter().map(|&l| (l, format!("e{}", l))).collect());
        m.set_breakpoints(breakpoints.iter().copied().collect());
        m
    }

    #[test]
    fn test_insert_shifts_lines_at_or_after() {
        let mut m = markers(&[1, 5], &[0, 5]);
        m.lines_inserted(5, 2);
        assert_eq!(m.errors().keys().copied().collect::<Vec<_>>(), vec![1, 7]);
        assert_eq!(m.error_at(7), Some("e5"));
        assert_eq!(m.breakpoints().iter().copied().collect::<Vec<_>>(), vec![0, 7]);
    }

    #[test]
    fn test_remove_drops_inside_and_shifts_after() {
        let mut m = markers(&[1, 3, 6], &[2, 4, 9]);
        m.lines_removed(2, 5);
        assert_eq!(m.errors().keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(m.error_at(3), Some("e6"));
        assert_eq!(m.breakpoints().iter().copied().collect::<Vec<_>>(), vec![6]);
    }

    #[test]
    fn test_empty_ranges_are_noops() {
        let mut m = markers(&[3], &[3]);
        m.lines_inserted(0, 0);
        m.lines_removed(2, 2);
        assert_eq!(m, markers(&[3], &[3]));
    }
}
