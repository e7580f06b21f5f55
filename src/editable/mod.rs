//! Text editing engine.
//!
//! # Architecture
//!
//! The core components are:
//!
//! - [`GlyphBuffer`]: lines of UTF-8 glyphs with tab-aware coordinate arithmetic
//! - [`Coordinates`] / [`ByteOffset`]: visual positions vs byte indices
//! - [`EditorState`]: cursor plus ordered selection
//! - [`UndoLog`] / [`UndoRecord`]: flat undo log with propagate groups
//! - [`LineMarkers`]: error markers and breakpoints renumbered on line edits
//! - [`TextEditor`]: the engine tying buffer, history and colorizer together
//! - [`EditIntent`]: host-independent editing actions dispatched by [`TextEditor::apply`]
//!
//! # Example
//!
//! ```
//! use token_core::editable::{MemoryClipboard, TextEditor};
//!
//! let mut editor = TextEditor::with_text("hllo");
//! editor.move_right(1, false, false);
//! editor.enter_character('e', false);
//! assert_eq!(editor.text(), "hello");
//!
//! editor.undo(1);
//! assert_eq!(editor.text(), "hllo");
//!
//! let mut clipboard = MemoryClipboard::new();
//! editor.copy(&mut clipboard);
//! assert_eq!(clipboard.contents(), Some("hllo"));
//! ```

pub mod buffer;
pub mod clipboard;
pub mod cursor;
pub mod history;
pub mod markers;
pub mod messages;
pub mod metrics;
pub mod selection;
pub mod state;

// Re-export main types
pub use buffer::{Glyph, GlyphBuffer, Line};
#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{Clipboard, MemoryClipboard};
pub use cursor::{ByteOffset, Coordinates};
pub use history::{UndoLog, UndoRecord};
pub use markers::LineMarkers;
pub use messages::{EditIntent, MoveTarget};
pub use metrics::{FontMetrics, MonospaceMetrics};
pub use selection::{EditorState, SelectionMode};
pub use state::TextEditor;
