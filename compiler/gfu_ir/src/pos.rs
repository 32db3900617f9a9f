//! Source positions.

use std::fmt;
use std::sync::Arc;

/// A location in a named source.
///
/// Rows and columns are 1-based. The reader moves a `Pos` forward one
/// character at a time with [`Pos::advance`]; within one read sequence
/// neither the row nor, on the same row, the column ever decreases.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pos {
    src: Arc<str>,
    pub row: u32,
    pub col: u32,
}

impl Pos {
    pub const MIN_ROW: u32 = 1;
    pub const MIN_COL: u32 = 1;

    /// Start of the source named `src`.
    pub fn new(src: impl Into<Arc<str>>) -> Self {
        Pos {
            src: src.into(),
            row: Self::MIN_ROW,
            col: Self::MIN_COL,
        }
    }

    /// An explicit location, mostly useful in tests.
    pub fn at(src: impl Into<Arc<str>>, row: u32, col: u32) -> Self {
        Pos {
            src: src.into(),
            row,
            col,
        }
    }

    /// The source identifier (a file name, or a label such as `repl`).
    #[inline]
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Step over `c`.
    ///
    /// A line feed moves to the first column of the next row; every other
    /// character, including `\r` and tabs, moves one column right.
    #[inline]
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.row = self.row.saturating_add(1);
            self.col = Self::MIN_COL;
        } else {
            self.col = self.col.saturating_add(1);
        }
    }

    /// Whether `self` lies at or after `other` in the same source.
    pub fn is_at_or_after(&self, other: &Pos) -> bool {
        (self.row, self.col) >= (other.row, other.col)
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.src, self.row, self.col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'; row {}, col {}", self.src, self.row, self.col)
    }
}
