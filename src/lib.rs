//! Generate, edit and solve perfect mazes
//!
//! Mazes are carved on a grid of odd size by a randomized depth-first
//! search, so there is exactly one route between any two open cells. Cells
//! can then be toggled between wall and path, every edit can be undone and
//! redone, and the shortest route from start to end is recomputed after
//! each change.
//!
//! # Examples
//! ## Editing a generated maze
//! ```
//! use maze_editor::{Session, Summary};
//!
//! let mut session = Session::new(11, 11, Some(13)).unwrap();
//! assert_eq!(session.summary(), Summary::HasSolution);
//!
//! session.toggle_show_path();
//! let length = session.solution().unwrap().len();
//! assert_eq!(session.summary(), Summary::PathLength(length));
//!
//! session.regenerate().unwrap();
//! session.undo().unwrap();
//! assert_eq!(session.solution().unwrap().len(), length);
//! ```
//!
//! ## Solving a hand made grid
//! ```
//! use maze_editor::{solve, Cell, Direction, Grid, Position};
//!
//! let mut grid = Grid::new(5, 5, Position::new(0, 0), Position::new(0, 4)).unwrap();
//! for col in 1..4 {
//!     grid.set(Position::new(0, col), Cell::Path).unwrap();
//! }
//! let solution = solve(&mut grid).unwrap();
//! assert_eq!(solution.len(), 5);
//! assert_eq!(
//!     grid.get(Position::new(0, 2)).unwrap(),
//!     Cell::Solution(Direction::Right)
//! );
//! ```

pub mod error;
pub mod grid;
pub mod history;
pub mod maze_generator;
pub mod session;
pub mod solver;

pub use error::MazeError;
pub use grid::{parse_dimension, Cell, Direction, Grid, Position, Token};
pub use history::{Command, History};
pub use maze_generator::MazeGenerator;
pub use session::{Session, Summary};
pub use solver::{solve, Solution};
