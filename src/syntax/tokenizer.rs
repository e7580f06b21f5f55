//! Native tokenizers tried before a language's regex rules.
//!
//! A [`Tokenizer`] looks at the remainder of a line and either claims the
//! token starting there or declines, in which case the colorizer falls back
//! to the regex rule list.

use crate::theme::PaletteIndex;

/// A classified token, as byte offsets into the tokenizer's input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch {
    pub start: usize,
    pub end: usize,
    pub color: PaletteIndex,
}

impl TokenMatch {
    pub const fn new(start: usize, end: usize, color: PaletteIndex) -> Self {
        Self { start, end, color }
    }
}

/// Custom per-language tokenization strategy
pub trait Tokenizer: Send + Sync {
    /// Classify the token at the start of `input`. `start` may skip leading
    /// blanks; a `None` hands the position to the regex rules.
    fn tokenize(&self, input: &[u8]) -> Option<TokenMatch>;
}

impl<F> Tokenizer for F
where
    F: Fn(&[u8]) -> Option<TokenMatch> + Send + Sync,
{
    fn tokenize(&self, input: &[u8]) -> Option<TokenMatch> {
        self(input)
    }
}

/// Hand-written tokenizer for C-family languages (strings, char literals,
/// identifiers, numbers, punctuation)
#[derive(Debug, Clone, Copy, Default)]
pub struct CStyleTokenizer;

impl Tokenizer for CStyleTokenizer {
    fn tokenize(&self, input: &[u8]) -> Option<TokenMatch> {
        let start = input
            .iter()
            .position(|&b| b != b' ' && b != b'\t')
            .unwrap_or(input.len());
        if start == input.len() {
            return Some(TokenMatch::new(start, start, PaletteIndex::Default));
        }
        let rest = &input[start..];

        let (len, color) = if let Some(len) = c_string(rest) {
            (len, PaletteIndex::String)
        } else if let Some(len) = c_char_literal(rest) {
            (len, PaletteIndex::CharLiteral)
        } else if let Some(len) = c_identifier(rest) {
            (len, PaletteIndex::Identifier)
        } else if let Some(len) = c_number(rest) {
            (len, PaletteIndex::Number)
        } else if let Some(len) = c_punctuation(rest) {
            (len, PaletteIndex::Punctuation)
        } else {
            return None;
        };
        Some(TokenMatch::new(start, start + len, color))
    }
}

/// `"..."` with `\"` escapes; unterminated strings do not match
fn c_string(input: &[u8]) -> Option<usize> {
    if input.first() != Some(&b'"') {
        return None;
    }
    let mut p = 1;
    while p < input.len() {
        match input[p] {
            b'"' => return Some(p + 1),
            b'\\' if input.get(p + 1) == Some(&b'"') => p += 2,
            _ => p += 1,
        }
    }
    None
}

/// `'x'` or `'\x'`
fn c_char_literal(input: &[u8]) -> Option<usize> {
    if input.first() != Some(&b'\'') {
        return None;
    }
    let mut p = 1;
    if input.get(p) == Some(&b'\\') {
        p += 1;
    }
    if p < input.len() {
        p += 1;
    }
    (input.get(p) == Some(&b'\'')).then_some(p + 1)
}

fn c_identifier(input: &[u8]) -> Option<usize> {
    let first = *input.first()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let len = input
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_'))
        .unwrap_or(input.len());
    Some(len)
}

/// Signed decimal, float with exponent, hex and binary literals with C suffixes
fn c_number(input: &[u8]) -> Option<usize> {
    let first = *input.first()?;
    let starts_with_digit = first.is_ascii_digit();
    if first != b'+' && first != b'-' && !starts_with_digit {
        return None;
    }
    let digits = |mut p: usize, pred: fn(&u8) -> bool| {
        while input.get(p).is_some_and(pred) {
            p += 1;
        }
        p
    };

    let mut p = 1;
    let after_digits = digits(p, u8::is_ascii_digit);
    if !starts_with_digit && after_digits == p {
        return None;
    }
    p = after_digits;

    let mut is_float = false;
    let mut is_hex = false;
    let mut is_binary = false;
    match input.get(p) {
        Some(b'.') => {
            is_float = true;
            p = digits(p + 1, u8::is_ascii_digit);
        }
        Some(b'x' | b'X') => {
            is_hex = true;
            p = digits(p + 1, u8::is_ascii_hexdigit);
        }
        Some(b'b' | b'B') => {
            is_binary = true;
            p = digits(p + 1, |b| *b == b'0' || *b == b'1');
        }
        _ => {}
    }

    if !is_hex && !is_binary {
        if matches!(input.get(p), Some(b'e' | b'E')) {
            is_float = true;
            p += 1;
            if matches!(input.get(p), Some(b'+' | b'-')) {
                p += 1;
            }
            let exponent_end = digits(p, u8::is_ascii_digit);
            if exponent_end == p {
                return None;
            }
            p = exponent_end;
        }
        if input.get(p) == Some(&b'f') {
            p += 1;
        }
    }

    if !is_float {
        p = digits(p, |b| matches!(b, b'u' | b'U' | b'l' | b'L'));
    }
    Some(p)
}

fn c_punctuation(input: &[u8]) -> Option<usize> {
    match input.first()? {
        b'[' | b']' | b'{' | b'}' | b'!' | b'%' | b'^' | b'&' | b'*' | b'(' | b')' | b'-'
        | b'+' | b'=' | b'~' | b'|' | b'<' | b'>' | b'?' | b':' | b'/' | b';' | b',' | b'.' => {
            Some(1)
        }
        _ => None,
    }
}
