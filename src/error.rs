//! Error types

use std::io;

use thiserror::Error;

use crate::grid::{Cell, Position};

/// Errors raised by grid edits and maze construction.
#[derive(Debug, Error)]
pub enum MazeError {
    /// Position lies outside the grid.
    #[error("position {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        pos: Position,
        rows: usize,
        cols: usize,
    },

    /// Edit targets a cell that must not be toggled.
    #[error("cannot toggle the {cell:?} cell at {pos}")]
    InvalidTarget { pos: Position, cell: Cell },

    /// Grid shape cannot hold a maze.
    #[error("grid dimensions must be positive odd numbers with room for two cells, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Start and end are not two distinct cells inside the grid.
    #[error("start {start} and end {end} must be distinct positions inside the grid")]
    InvalidEndpoints { start: Position, end: Position },

    /// Writing an export failed.
    #[error("export failed: {0}")]
    Io(#[from] io::Error),
}
