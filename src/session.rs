//! Interactive editing session
//!
//! A [Session] is the single owner of the maze, its edit history and the
//! random generator. Front ends hold on to a session and drive it through
//! the user level operations; every change re-solves the maze so that
//! [Session::tokens] and [Session::summary] always reflect the latest edit.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::MazeError;
use crate::grid::{Grid, Position, Token};
use crate::history::{Command, History};
use crate::maze_generator::MazeGenerator;
use crate::solver::{solve, Solution};

/// Status line shown next to the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary {
    NoSolution,
    /// Solvable, path hidden
    HasSolution,
    /// Solvable, path shown; number of cells on the shortest path
    PathLength(usize),
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::NoSolution => write!(f, "This maze has no solution!"),
            Summary::HasSolution => write!(f, "This maze has a solution!"),
            Summary::PathLength(n) => write!(f, "The shortest path covers {n} cells."),
        }
    }
}

pub struct Session {
    grid: Grid,
    history: History,
    generator: MazeGenerator,
    solution: Option<Solution>,
    show_path: bool,
}

impl Session {
    /// Start a session on a freshly generated `rows` x `cols` maze.
    pub fn new(rows: usize, cols: usize, seed: Option<u64>) -> Result<Self, MazeError> {
        let mut generator = MazeGenerator::new(seed);
        let grid = generator.generate(rows, cols)?;
        Ok(Self::with_grid(grid, generator))
    }

    /// Start a session on an existing grid. `generator` is used by
    /// [Session::regenerate].
    pub fn with_grid(grid: Grid, generator: MazeGenerator) -> Self {
        let mut session = Self {
            grid,
            history: History::new(),
            generator,
            solution: None,
            show_path: false,
        };
        session.refresh();
        session
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Result of the latest solve.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    pub fn show_path(&self) -> bool {
        self.show_path
    }

    /// Flip the cell at `pos` between wall and path.
    pub fn toggle_cell(&mut self, pos: Position) -> Result<(), MazeError> {
        let command = Command::toggle(&self.grid, pos)?;
        self.apply(command)
    }

    /// Replace the maze with a new random one of the same shape.
    pub fn regenerate(&mut self) -> Result<(), MazeError> {
        let command = Command::regenerate(&self.grid, &mut self.generator)?;
        info!(rows = self.grid.rows(), cols = self.grid.cols(), "regenerating maze");
        self.apply(command)
    }

    /// Undo the latest edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, MazeError> {
        let changed = self.history.undo(&mut self.grid)?;
        if changed {
            self.refresh();
        }
        Ok(changed)
    }

    /// Redo the latest undone edit. Returns `false` when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> Result<bool, MazeError> {
        let changed = self.history.redo(&mut self.grid)?;
        if changed {
            self.refresh();
        }
        Ok(changed)
    }

    /// Show or hide the shortest path overlay; returns the new setting.
    pub fn toggle_show_path(&mut self) -> bool {
        self.show_path = !self.show_path;
        self.show_path
    }

    /// Display token for one cell, `None` outside the grid.
    pub fn token(&self, pos: Position) -> Option<Token> {
        self.grid
            .row(pos.row)
            .and_then(|row| row.get(pos.col))
            .map(|cell| cell.token(self.show_path))
    }

    /// Display tokens for the whole grid, row by row.
    pub fn tokens(&self) -> Vec<Vec<Token>> {
        self.grid
            .cell_rows()
            .map(|row| row.iter().map(|cell| cell.token(self.show_path)).collect())
            .collect()
    }

    pub fn summary(&self) -> Summary {
        match (&self.solution, self.show_path) {
            (None, _) => Summary::NoSolution,
            (Some(_), false) => Summary::HasSolution,
            (Some(solution), true) => Summary::PathLength(solution.len()),
        }
    }

    /// Write the maze in the flat export format.
    pub fn export<W: Write>(&self, writer: W) -> Result<(), MazeError> {
        self.grid.export(writer)
    }

    /// Write the maze in the flat export format to a file, replacing it.
    pub fn export_to_path(&self, path: impl AsRef<Path>) -> Result<(), MazeError> {
        let file = File::create(path.as_ref())?;
        self.export(BufWriter::new(file))?;
        info!(path = %path.as_ref().display(), "exported maze");
        Ok(())
    }

    fn apply(&mut self, command: Command) -> Result<(), MazeError> {
        self.history.apply(command, &mut self.grid)?;
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        self.solution = solve(&mut self.grid);
        debug!(solved = self.solution.is_some(), "refreshed solution");
    }
}
