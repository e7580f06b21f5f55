//! Utility modules

pub mod text;

pub use text::{
    is_blank, is_continuation_byte, is_space, next_tab_stop, utf8_char_len, DEFAULT_TAB_SIZE,
    MAX_TAB_SIZE,
};
