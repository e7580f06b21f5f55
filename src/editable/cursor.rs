//! Coordinate types for the text editing engine.
//!
//! A [`Coordinates`] column is a *visual* column. A [`ByteOffset`] indexes the
//! glyph array of a line. The two only diverge on multi-byte UTF-8 sequences
//! (and on tab bytes, which the engine never stores but still measures).

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A position in the document (line and visual column, both 0-indexed).
///
/// Ordering compares by line, then column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinates {
    pub line: usize,
    pub column: usize,
}

impl Coordinates {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<(usize, usize)> for Coordinates {
    fn from((line, column): (usize, usize)) -> Self {
        Self::new(line, column)
    }
}

/// Byte index into one line's glyph array
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteOffset(pub usize);

impl ByteOffset {
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Add<usize> for ByteOffset {
    type Output = ByteOffset;

    fn add(self, rhs: usize) -> ByteOffset {
        ByteOffset(self.0 + rhs)
    }
}

impl AddAssign<usize> for ByteOffset {
    fn add_assign(&mut self, rhs: usize) {
        self.0 += rhs;
    }
}

impl Sub for ByteOffset {
    type Output = usize;

    fn sub(self, rhs: ByteOffset) -> usize {
        self.0.saturating_sub(rhs.0)
    }
}
