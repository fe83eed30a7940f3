//! Maze grid model
//!
//! The grid is a row-major array of [Cell] values with a fixed shape. Exactly
//! one cell holds [Cell::Start] and one holds [Cell::End]; the grid keeps
//! their positions but does not police edits that would break this, so
//! callers going through [Grid::set] must preserve it themselves.

use std::fmt;
use std::io::Write;

use itertools::Itertools;
use tracing::warn;

use crate::error::MazeError;

/// Location in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position shifted by `(d_row, d_col)`, or `None` if either coordinate
    /// would become negative.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// Neighbor one step away in `direction`.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        self.offset(d_row, d_col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction of travel between 4-adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order the solver expands neighbors.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Row and column delta of a single step.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Direction leading from `from` to the adjacent position `to`.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dir| from.step(*dir) == Some(to))
    }
}

/// State of a single grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Path,
    Start,
    End,
    /// Transient shortest path overlay, pointing towards the next cell.
    Solution(Direction),
}

impl Cell {
    /// Numeric code of the cell: path 0, wall 1, start 2, end 3, and
    /// -1..=-4 for the up, down, left and right overlay.
    pub const fn code(self) -> i8 {
        match self {
            Cell::Path => 0,
            Cell::Wall => 1,
            Cell::Start => 2,
            Cell::End => 3,
            Cell::Solution(Direction::Up) => -1,
            Cell::Solution(Direction::Down) => -2,
            Cell::Solution(Direction::Left) => -3,
            Cell::Solution(Direction::Right) => -4,
        }
    }

    /// Code written by [Grid::export]; the overlay counts as path.
    pub fn export_code(self) -> u8 {
        self.code().max(0) as u8
    }

    pub fn is_solution(self) -> bool {
        matches!(self, Cell::Solution(_))
    }

    /// Same cell with any solution overlay replaced by [Cell::Path].
    pub fn without_overlay(self) -> Self {
        if self.is_solution() {
            Cell::Path
        } else {
            self
        }
    }

    /// Display token for this cell.
    ///
    /// With `show_path` off, overlay cells read as plain path.
    pub fn token(self, show_path: bool) -> Token {
        match self {
            Cell::Path => Token::Empty,
            Cell::Wall => Token::Wall,
            Cell::Start => Token::StartFlag,
            Cell::End => Token::EndFlag,
            Cell::Solution(dir) if show_path => Token::Arrow(dir),
            Cell::Solution(_) => Token::Empty,
        }
    }
}

/// What a presentation layer draws for a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Empty,
    Wall,
    StartFlag,
    EndFlag,
    Arrow(Direction),
}

/// Parse a grid dimension given on the command line. Only positive odd
/// numbers are accepted.
pub fn parse_dimension(value: &str) -> Result<usize, String> {
    let n: usize = value.parse().map_err(|e| format!("{e}"))?;
    if n % 2 == 1 {
        Ok(n)
    } else {
        Err(format!("{n} is not a positive odd number"))
    }
}

/// Rectangular maze grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: Position,
    end: Position,
}

impl Grid {
    /// Create a grid of walls with the given start and end cells.
    ///
    /// Both dimensions must be positive and odd, and `start`, `end` must be
    /// distinct positions inside the grid.
    ///
    /// # Examples
    /// ```
    /// use maze_editor::{Cell, Grid, Position};
    ///
    /// let grid = Grid::new(3, 5, Position::new(0, 0), Position::new(2, 4)).unwrap();
    /// assert_eq!(grid.get(Position::new(0, 0)).unwrap(), Cell::Start);
    /// assert!(grid.is_wall(Position::new(1, 1)));
    /// ```
    pub fn new(
        rows: usize,
        cols: usize,
        start: Position,
        end: Position,
    ) -> Result<Self, MazeError> {
        let invalid = MazeError::InvalidDimensions { rows, cols };
        if rows == 0 || cols == 0 || rows % 2 == 0 || cols % 2 == 0 {
            return Err(invalid);
        }
        let len = rows.checked_mul(cols).ok_or(invalid)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| MazeError::InvalidDimensions { rows, cols })?;
        cells.resize(len, Cell::Wall);

        let mut grid = Grid {
            rows,
            cols,
            cells,
            start,
            end,
        };
        match (grid.index(start), grid.index(end)) {
            (Some(s), Some(e)) if s != e => {
                grid.cells[s] = Cell::Start;
                grid.cells[e] = Cell::End;
                Ok(grid)
            }
            _ => Err(MazeError::InvalidEndpoints { start, end }),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.row * self.cols + pos.col)
    }

    fn out_of_bounds(&self, pos: Position) -> MazeError {
        MazeError::OutOfBounds {
            pos,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Read a cell. Out of bounds reads are logged and return an error.
    pub fn get(&self, pos: Position) -> Result<Cell, MazeError> {
        match self.index(pos) {
            Some(idx) => Ok(self.cells[idx]),
            None => {
                warn!(%pos, rows = self.rows, cols = self.cols, "read outside of maze");
                Err(self.out_of_bounds(pos))
            }
        }
    }

    /// Overwrite a cell. Out of bounds writes are logged and leave the grid
    /// untouched.
    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), MazeError> {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                Ok(())
            }
            None => {
                warn!(%pos, ?cell, rows = self.rows, cols = self.cols, "write outside of maze");
                Err(self.out_of_bounds(pos))
            }
        }
    }

    /// `true` iff `pos` is inside the grid and holds a wall.
    pub fn is_wall(&self, pos: Position) -> bool {
        self.index(pos)
            .is_some_and(|idx| self.cells[idx] == Cell::Wall)
    }

    /// Cells of one row, left to right, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        (row < self.rows).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    /// All rows, top to bottom.
    pub fn cell_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows * cols).map(move |idx| Position::new(idx / cols, idx % cols))
    }

    /// Neighbors of `pos` one step away, in [Direction::ALL] order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            pos.step(dir)
                .filter(|next| self.in_bounds(*next))
                .map(|next| (dir, next))
        })
    }

    /// Mark `pos` as part of the shortest path. Positions outside the grid
    /// are skipped.
    pub(crate) fn mark_solution(&mut self, pos: Position, direction: Direction) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = Cell::Solution(direction);
        }
    }

    /// Reset every solution overlay cell back to path.
    pub fn clear_solution(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_solution()) {
            *cell = Cell::Path;
        }
    }

    /// Write the grid as rows of space separated codes.
    ///
    /// Each code is followed by a space, each row by a newline. Overlay
    /// cells are written as path.
    pub fn export<W: Write>(&self, mut writer: W) -> Result<(), MazeError> {
        for row in self.cell_rows() {
            let line = row
                .iter()
                .map(|cell| format!("{} ", cell.export_code()))
                .join("");
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        Ok(())
    }
}
