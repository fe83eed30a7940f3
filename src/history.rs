//! Undoable grid edits

use tracing::debug;

use crate::error::MazeError;
use crate::grid::{Cell, Grid, Position};
use crate::maze_generator::MazeGenerator;

/// A reversible edit, holding everything needed to apply and revert it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Flip one cell between wall and path.
    ToggleCell {
        pos: Position,
        before: Cell,
        after: Cell,
    },
    /// Swap the whole maze for a freshly generated one.
    Regenerate { before: Grid, after: Grid },
}

impl Command {
    /// Toggle the cell at `pos`: walls become path, anything else a wall.
    ///
    /// Start and end cells are refused with [MazeError::InvalidTarget].
    pub fn toggle(grid: &Grid, pos: Position) -> Result<Self, MazeError> {
        let before = grid.get(pos)?.without_overlay();
        let after = match before {
            Cell::Start | Cell::End => {
                debug!(%pos, cell = ?before, "refusing to toggle endpoint");
                return Err(MazeError::InvalidTarget { pos, cell: before });
            }
            Cell::Wall => Cell::Path,
            _ => Cell::Wall,
        };
        Ok(Command::ToggleCell { pos, before, after })
    }

    /// Generate a new maze of the same shape, keeping a snapshot of the
    /// current one to return to.
    pub fn regenerate(grid: &Grid, generator: &mut MazeGenerator) -> Result<Self, MazeError> {
        let after = generator.generate(grid.rows(), grid.cols())?;
        Ok(Command::Regenerate {
            before: grid.clone(),
            after,
        })
    }

    pub fn execute(&self, grid: &mut Grid) -> Result<(), MazeError> {
        match self {
            Command::ToggleCell { pos, after, .. } => grid.set(*pos, *after),
            Command::Regenerate { after, .. } => {
                grid.clone_from(after);
                Ok(())
            }
        }
    }

    pub fn revert(&self, grid: &mut Grid) -> Result<(), MazeError> {
        match self {
            Command::ToggleCell { pos, before, .. } => grid.set(*pos, *before),
            Command::Regenerate { before, .. } => {
                grid.clone_from(before);
                Ok(())
            }
        }
    }
}

/// Undo and redo stacks of applied commands, most recent last.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a new command and record it. Clears everything that could
    /// have been redone.
    pub fn apply(&mut self, command: Command, grid: &mut Grid) -> Result<(), MazeError> {
        command.execute(grid)?;
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(())
    }

    /// Revert the most recent command. Returns `false` if there was none.
    pub fn undo(&mut self, grid: &mut Grid) -> Result<bool, MazeError> {
        let Some(command) = self.undo_stack.pop() else {
            debug!("nothing to undo");
            return Ok(false);
        };
        command.revert(grid)?;
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Re-apply the most recently undone command. Returns `false` if there
    /// was none.
    pub fn redo(&mut self, grid: &mut Grid) -> Result<bool, MazeError> {
        let Some(command) = self.redo_stack.pop() else {
            debug!("nothing to redo");
            return Ok(false);
        };
        command.execute(grid)?;
        self.undo_stack.push(command);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::MazeError;
    use crate::grid::{Cell, Direction, Grid, Position};
    use crate::history::{Command, History};
    use crate::maze_generator::MazeGenerator;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn corridor() -> Grid {
        let mut grid = Grid::new(1, 5, pos(0, 0), pos(0, 4)).unwrap();
        for col in 1..4 {
            grid.set(pos(0, col), Cell::Path).unwrap();
        }
        grid
    }

    fn toggle(history: &mut History, grid: &mut Grid, at: Position) {
        let command = Command::toggle(grid, at).unwrap();
        history.apply(command, grid).unwrap();
    }

    #[test]
    fn toggle_flips_path_and_wall() {
        let mut grid = corridor();
        let mut history = History::new();

        toggle(&mut history, &mut grid, pos(0, 2));
        assert_eq!(grid.get(pos(0, 2)).unwrap(), Cell::Wall);
        toggle(&mut history, &mut grid, pos(0, 2));
        assert_eq!(grid.get(pos(0, 2)).unwrap(), Cell::Path);
    }

    #[test]
    fn toggle_overlay_cell_becomes_wall() {
        let mut grid = corridor();
        grid.set(pos(0, 1), Cell::Solution(Direction::Right)).unwrap();
        let command = Command::toggle(&grid, pos(0, 1)).unwrap();
        assert_eq!(
            command,
            Command::ToggleCell {
                pos: pos(0, 1),
                before: Cell::Path,
                after: Cell::Wall
            }
        );
    }

    #[test]
    fn undo_and_redo_toggle() {
        let mut grid = corridor();
        let original = grid.clone();
        let mut history = History::new();

        toggle(&mut history, &mut grid, pos(0, 3));
        let toggled = grid.clone();

        assert!(history.undo(&mut grid).unwrap());
        assert_eq!(grid, original);
        assert!(history.redo(&mut grid).unwrap());
        assert_eq!(grid, toggled);
    }

    #[test]
    fn empty_stacks_are_ignored() {
        let mut grid = corridor();
        let original = grid.clone();
        let mut history = History::new();

        assert!(!history.undo(&mut grid).unwrap());
        assert!(!history.redo(&mut grid).unwrap());
        assert_eq!(grid, original);
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut grid = corridor();
        let mut history = History::new();

        toggle(&mut history, &mut grid, pos(0, 1));
        history.undo(&mut grid).unwrap();
        assert!(history.can_redo());

        toggle(&mut history, &mut grid, pos(0, 2));
        assert!(!history.can_redo());
        let after_edit = grid.clone();
        assert!(!history.redo(&mut grid).unwrap());
        assert_eq!(grid, after_edit);
    }

    #[test]
    fn endpoints_cannot_be_toggled() {
        let grid = corridor();
        assert!(matches!(
            Command::toggle(&grid, pos(0, 0)),
            Err(MazeError::InvalidTarget { cell: Cell::Start, .. })
        ));
        assert!(matches!(
            Command::toggle(&grid, pos(0, 4)),
            Err(MazeError::InvalidTarget { cell: Cell::End, .. })
        ));
        assert!(matches!(
            Command::toggle(&grid, pos(1, 0)),
            Err(MazeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn regenerate_undo_restores_snapshot() {
        let mut generator = MazeGenerator::new(Some(7));
        let mut grid = generator.generate(9, 9).unwrap();
        let mut history = History::new();

        toggle(&mut history, &mut grid, pos(1, 1));
        let edited = grid.clone();

        let command = Command::regenerate(&grid, &mut generator).unwrap();
        history.apply(command, &mut grid).unwrap();
        let regenerated = grid.clone();
        assert_eq!(grid.rows(), 9);
        assert_eq!(grid.cols(), 9);

        history.undo(&mut grid).unwrap();
        assert_eq!(grid, edited);

        history.redo(&mut grid).unwrap();
        assert_eq!(grid, regenerated);

        // (1, 1) sits between rooms diagonally, so it starts out as a wall
        history.undo(&mut grid).unwrap();
        history.undo(&mut grid).unwrap();
        assert_eq!(grid.get(pos(1, 1)).unwrap(), Cell::Wall);
        assert!(!history.can_undo());
    }
}
