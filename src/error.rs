//! Grid error types.

use thiserror::Error;

/// Errors raised by grid construction, access and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Coordinate outside `[0, w) x [0, h)`.
    #[error("position ({x}, {y}) is outside a {w}x{h} grid")]
    OutOfBounds { x: i64, y: i64, w: usize, h: usize },

    /// Neighbor windows need a well-defined center cell.
    #[error("window must have odd dimensions, got {w}x{h}")]
    EvenWindow { w: usize, h: usize },

    /// Grids with explicit dimensions must have at least one cell.
    #[error("grid dimensions must be non-zero, got {w}x{h}")]
    ZeroSize { w: usize, h: usize },

    /// Template string has no non-blank lines.
    #[error("grid template is empty")]
    EmptyTemplate,

    /// Template line length differs from the first line.
    #[error("template line {line} has {found} cells, expected {expected}")]
    RaggedTemplate {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Template character with no mapping and no fallback value.
    #[error("no mapping for {ch:?} at line {line}, column {column}")]
    UnmappedChar { ch: char, line: usize, column: usize },

    /// Flat buffer whose length is not `w * h`.
    #[error("buffer holds {found} cells, a {w}x{h} grid needs {}", .w * .h)]
    LengthMismatch { w: usize, h: usize, found: usize },

    /// Nested row input whose rows differ in length.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, GridError>;
