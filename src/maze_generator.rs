//! Maze generation

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use crate::error::MazeError;
use crate::grid::{Cell, Grid, Position};

/// Random perfect maze generator.
///
/// Rooms sit on the even rows and columns; the odd positions between them
/// are the walls that get carved to connect two rooms.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    /// Offsets from a room to the neighboring rooms.
    const DIRECTIONS: [(isize, isize); 4] = [(-2, 0), (0, 2), (2, 0), (0, -2)];

    /// Create a generator; the same `seed` always yields the same mazes.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a maze by randomized depth-first carving.
    ///
    /// `rows` and `cols` must be positive odd numbers, with at least two
    /// rooms so that start and end can differ.
    ///
    /// The carve does not continue past the end cell: it is opened like any
    /// other room, but never explored. Rooms only reachable through the end
    /// therefore stay walled in.
    pub fn generate(&mut self, rows: usize, cols: usize) -> Result<Grid, MazeError> {
        let rooms = rows.div_ceil(2).checked_mul(cols.div_ceil(2));
        if rows % 2 == 0 || cols % 2 == 0 || rooms.map_or(true, |n| n < 2) {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }

        let start = self.random_room(rows, cols);
        let mut end = self.random_room(rows, cols);
        while end == start {
            end = self.random_room(rows, cols);
        }

        let mut grid = Grid::new(rows, cols, start, end)?;
        // The end room is carved like any other before it is marked
        grid.set(end, Cell::Wall)?;
        self.carve(&mut grid, start, end)?;
        grid.set(end, Cell::End)?;

        debug!(rows, cols, %start, %end, "generated maze");
        Ok(grid)
    }

    /// Pick a uniformly random room: even row, even column.
    fn random_room(&mut self, rows: usize, cols: usize) -> Position {
        let row = 2 * self.random.gen_range(0..rows.div_ceil(2));
        let col = 2 * self.random.gen_range(0..cols.div_ceil(2));
        Position::new(row, col)
    }

    /// Carve passages from `start` with an explicit backtracking stack.
    fn carve(&mut self, grid: &mut Grid, start: Position, end: Position) -> Result<(), MazeError> {
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let frontier: Vec<Position> = Self::DIRECTIONS
                .iter()
                .filter_map(|&(d_row, d_col)| current.offset(d_row, d_col))
                .filter(|next| grid.is_wall(*next))
                .collect();

            match frontier.choose(&mut self.random) {
                Some(&next) => {
                    let between = Position::new(
                        (current.row + next.row) / 2,
                        (current.col + next.col) / 2,
                    );
                    grid.set(next, Cell::Path)?;
                    grid.set(between, Cell::Path)?;
                    if next != end {
                        stack.push(next);
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use crate::error::MazeError;
    use crate::grid::{Cell, Grid, Position};
    use crate::maze_generator::MazeGenerator;

    const SIZES: [(usize, usize); 7] = [(1, 3), (1, 5), (3, 3), (3, 7), (5, 5), (9, 3), (11, 11)];

    /// Every open cell reachable from the start
    fn reachable(grid: &Grid) -> HashSet<Position> {
        let mut seen = HashSet::from([grid.start()]);
        let mut queue = VecDeque::from([grid.start()]);
        while let Some(pos) = queue.pop_front() {
            for (_, next) in grid.neighbors(pos) {
                if !grid.is_wall(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    fn open_cells(grid: &Grid) -> Vec<Position> {
        grid.positions().filter(|p| !grid.is_wall(*p)).collect()
    }

    #[test]
    fn exactly_one_start_and_end() {
        for seed in 0..50 {
            let mut gen = MazeGenerator::new(Some(seed));
            for (rows, cols) in SIZES {
                let grid = gen.generate(rows, cols).unwrap();
                let starts: Vec<_> = grid
                    .positions()
                    .filter(|p| grid.get(*p).unwrap() == Cell::Start)
                    .collect();
                let ends: Vec<_> = grid
                    .positions()
                    .filter(|p| grid.get(*p).unwrap() == Cell::End)
                    .collect();
                assert_eq!(starts, vec![grid.start()]);
                assert_eq!(ends, vec![grid.end()]);
                assert_ne!(grid.start(), grid.end());
            }
        }
    }

    #[test]
    fn endpoints_are_rooms() {
        for seed in 0..50 {
            let mut gen = MazeGenerator::new(Some(seed));
            let grid = gen.generate(7, 9).unwrap();
            for pos in [grid.start(), grid.end()] {
                assert_eq!(pos.row % 2, 0);
                assert_eq!(pos.col % 2, 0);
            }
        }
    }

    #[test]
    fn open_cells_are_connected_to_start() {
        for seed in 0..50 {
            let mut gen = MazeGenerator::new(Some(seed));
            for (rows, cols) in SIZES {
                let grid = gen.generate(rows, cols).unwrap();
                let seen = reachable(&grid);
                for pos in open_cells(&grid) {
                    assert!(seen.contains(&pos), "{pos} cut off, seed {seed}, {rows}x{cols}");
                }
                assert!(seen.contains(&grid.end()));
            }
        }
    }

    #[test]
    fn carved_cells_form_a_tree() {
        for seed in 0..50 {
            let mut gen = MazeGenerator::new(Some(seed));
            for (rows, cols) in SIZES {
                let grid = gen.generate(rows, cols).unwrap();
                let open = open_cells(&grid);
                // Count each adjacency once, looking only right and down
                let edges = open
                    .iter()
                    .flat_map(|p| [p.offset(0, 1), p.offset(1, 0)])
                    .flatten()
                    .filter(|q| grid.in_bounds(*q) && !grid.is_wall(*q))
                    .count();
                assert_eq!(edges + 1, open.len(), "loop in maze, seed {seed}");
            }
        }
    }

    #[test]
    fn rooms_behind_the_end_stay_walled() {
        // In a single row of three rooms, an end in the middle blocks the far room
        let mut blocked = 0;
        for seed in 0..200 {
            let mut gen = MazeGenerator::new(Some(seed));
            let grid = gen.generate(1, 5).unwrap();
            if grid.end() == Position::new(0, 2) {
                let far = Position::new(0, 4 - grid.start().col);
                assert!(grid.is_wall(far));
                assert!(grid.is_wall(Position::new(0, (far.col + 2) / 2)));
                blocked += 1;
            } else {
                assert!(open_cells(&grid).len() == 5);
            }
        }
        assert!(blocked > 0);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = MazeGenerator::new(Some(42)).generate(11, 15).unwrap();
        let b = MazeGenerator::new(Some(42)).generate(11, 15).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_dimensions_that_overflow() {
        let mut gen = MazeGenerator::new(Some(0));
        for (rows, cols) in [(usize::MAX, 3), (3, usize::MAX), (usize::MAX, usize::MAX)] {
            assert!(matches!(
                gen.generate(rows, cols),
                Err(MazeError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn rejects_unusable_dimensions() {
        let mut gen = MazeGenerator::new(Some(0));
        for (rows, cols) in [(1, 1), (2, 3), (3, 4), (0, 5)] {
            assert!(matches!(
                gen.generate(rows, cols),
                Err(MazeError::InvalidDimensions { .. })
            ));
        }
    }
}
