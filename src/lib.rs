//! token-core - embeddable text-editing engine
//!
//! This crate provides a UI-agnostic editor core: a UTF-8 glyph buffer with
//! cursor/selection semantics, a grouped undo log, an incremental syntax
//! colorizer driven by pluggable language definitions, and a find/replace
//! engine. Rendering, input capture and file I/O belong to the host.

pub mod config;
pub mod config_paths;
pub mod editable;
pub mod search;
pub mod syntax;
pub mod theme;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::EngineConfig;
pub use editable::{Coordinates, EditIntent, SelectionMode, TextEditor};
pub use search::{SearchContext, SearchMode};
pub use syntax::{LanguageDefinition, LanguageError};
pub use theme::{Color, Palette, PaletteIndex};
