//! Syntax highlighting
//!
//! - [`language`]: language definitions (word lists, comment delimiters,
//!   regex token rules) and the built-in GLSL / C / C++ / Lua set
//! - [`tokenizer`]: native tokenizers tried before the regex rules
//! - [`colorizer`]: lexical context scan + chunked token classification
//!
//! ## Flow
//!
//! ```text
//! edit → Colorizer::invalidate(lines) → host frame → Colorizer::step()
//!      → (scan comments/strings/preprocessor if dirty)
//!      → (classify ≤ chunk lines of the dirty range)
//! ```

pub mod colorizer;
pub mod language;
pub mod tokenizer;

pub use colorizer::{Colorizer, DirtyRange, GlyphContext, NATIVE_CHUNK_LINES, REGEX_CHUNK_LINES};
pub use language::{
    CompiledLanguage, LanguageDefinition, LanguageError, TokenRule, BUILTIN_LANGUAGES,
};
pub use tokenizer::{CStyleTokenizer, TokenMatch, Tokenizer};
