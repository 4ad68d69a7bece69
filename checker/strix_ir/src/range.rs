//! Source positions and half-open character ranges.
//!
//! The inference engine reports positions as line + column; this core never
//! inspects source text, so columns are compared as opaque units defined by
//! the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in a source file.
///
/// Lines and columns are zero-based. The column unit (bytes, UTF-16 code
/// units, ...) is whatever the engine emits; this core only compares them.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A half-open character range `[start, end)`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }

    /// Convenience constructor from raw line/column quadruples.
    #[inline]
    pub const fn from_parts(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Range {
            start: Position::new(start_line, start_column),
            end: Position::new(end_line, end_column),
        }
    }

    /// Number of lines the range touches. A single-line range has line
    /// count 1.
    #[inline]
    pub const fn line_count(&self) -> u32 {
        self.end.line - self.start.line + 1
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests;
