//! Debug tracing infrastructure for hosts embedding the engine
//!
//! The engine only emits `tracing` events; installing a subscriber is up to
//! the host, and [`init`] is the ready-made one.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=token_core::syntax=trace` - per-chunk colorizer progress
//! - `RUST_LOG=token_core::editable=debug` - undo/redo steps
//!
//! # Log Files
//!
//! Logs are written to `~/.config/token-core/logs/token-core.log` with daily
//! rotation. File logging uses debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::EditorState;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`).
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "token-core.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {:#}", e);
            None
        }
    };

    // try_init: a host may already own the global subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of cursor/selection state for diffing in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSnapshot {
    pub cursor: (usize, usize),
    pub selection_start: (usize, usize),
    pub selection_end: (usize, usize),
}

impl StateSnapshot {
    pub fn from_state(state: &EditorState) -> Self {
        let pair = |c: crate::editable::Coordinates| (c.line, c.column);
        Self {
            cursor: pair(state.cursor),
            selection_start: pair(state.selection_start()),
            selection_end: pair(state.selection_end()),
        }
    }

    fn has_selection(&self) -> bool {
        self.selection_start != self.selection_end
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &StateSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.cursor != other.cursor {
            changes.push(format!(
                "cursor ({},{}) → ({},{})",
                self.cursor.0, self.cursor.1, other.cursor.0, other.cursor.1
            ));
        }
        if self.has_selection() != other.has_selection() {
            let status = if other.has_selection() {
                "active"
            } else {
                "cleared"
            };
            changes.push(format!("selection {}", status));
        } else if other.has_selection()
            && (self.selection_start != other.selection_start
                || self.selection_end != other.selection_end)
        {
            changes.push(format!(
                "selection ({},{})-({},{})",
                other.selection_start.0,
                other.selection_start.1,
                other.selection_end.0,
                other.selection_end.1
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::Coordinates;

    #[test]
    fn test_snapshot_diff() {
        let before = StateSnapshot::from_state(&EditorState::at(Coordinates::new(0, 0)));
        assert_eq!(before.diff(&before), None);

        let mut state = EditorState::at(Coordinates::new(1, 2));
        state.set_selection(Coordinates::new(1, 0), Coordinates::new(1, 2));
        let after = StateSnapshot::from_state(&state);
        assert_eq!(
            before.diff(&after).as_deref(),
            Some("cursor (0,0) → (1,2); selection active")
        );
    }
}
