//! Byte-level text helpers shared by the buffer, colorizer and search engine

/// Default tab width in columns
pub const DEFAULT_TAB_SIZE: usize = 4;

/// Largest tab width accepted by `TextEditor::set_tab_size`
pub const MAX_TAB_SIZE: usize = 32;

/// Number of bytes in the UTF-8 sequence introduced by `lead`.
///
/// Continuation bytes and stray bytes count as 1 so a walk over a damaged
/// line always makes progress. The historical 5 and 6 byte forms are kept.
pub fn utf8_char_len(lead: u8) -> usize {
    if lead & 0xFE == 0xFC {
        6
    } else if lead & 0xFC == 0xF8 {
        5
    } else if lead & 0xF8 == 0xF0 {
        4
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xE0 == 0xC0 {
        2
    } else {
        1
    }
}

/// `10xxxxxx`
#[inline]
pub fn is_continuation_byte(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// ASCII whitespace (space, tab, newline, vertical tab, form feed, carriage return)
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Space or tab
#[inline]
pub fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Column reached by a tab typed at `column`.
///
/// A zero tab size behaves like a tab size of one.
pub fn next_tab_stop(column: usize, tab_size: usize) -> usize {
    let tab_size = tab_size.max(1);
    (column / tab_size) * tab_size + tab_size
}
