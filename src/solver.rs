//! Shortest path solving
//!
//! Breadth-first search from the start cell over the open cells of a
//! [Grid]. The path found is written back into the grid as a
//! [Cell::Solution](crate::grid::Cell::Solution) overlay on every cell between start and end.

use std::collections::VecDeque;

use tracing::debug;

use crate::grid::{Direction, Grid, Position};

/// Shortest path from start to end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Every cell on the path, start first and end last.
    pub path: Vec<Position>,
}

impl Solution {
    /// Number of cells on the path, both endpoints included.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Paths from [solve] hold at least the start and end cells.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Cells paired with the direction towards the next cell on the path.
    /// Covers the start but not the end.
    pub fn steps(&self) -> impl Iterator<Item = (Position, Direction)> + '_ {
        self.path.windows(2).filter_map(|pair| {
            Direction::between(pair[0], pair[1]).map(|dir| (pair[0], dir))
        })
    }
}

/// Find the shortest path from start to end and mark it in `grid`.
///
/// Any overlay left from an earlier solve is cleared first. Returns `None`
/// when the end cannot be reached; the grid then carries no overlay.
///
/// # Examples
/// ```
/// use maze_editor::{solve, Cell, Grid, Position};
///
/// let mut grid = Grid::new(1, 3, Position::new(0, 0), Position::new(0, 2)).unwrap();
/// assert!(solve(&mut grid).is_none());
///
/// grid.set(Position::new(0, 1), Cell::Path).unwrap();
/// assert_eq!(solve(&mut grid).unwrap().len(), 3);
/// ```
pub fn solve(grid: &mut Grid) -> Option<Solution> {
    grid.clear_solution();

    let Some(path) = shortest_path(grid) else {
        debug!(start = %grid.start(), end = %grid.end(), "no solution");
        return None;
    };
    let solution = Solution { path };

    let start = grid.start();
    for (pos, dir) in solution.steps().filter(|(pos, _)| *pos != start) {
        grid.mark_solution(pos, dir);
    }

    debug!(length = solution.len(), "solved maze");
    Some(solution)
}

/// Breadth-first search, stopping as soon as the end is discovered.
fn shortest_path(grid: &Grid) -> Option<Vec<Position>> {
    let (start, end) = (grid.start(), grid.end());
    let cols = grid.cols();
    let index = |pos: Position| pos.row * cols + pos.col;

    let mut prev: Vec<Option<Position>> = vec![None; grid.rows() * cols];
    let mut visited = vec![false; grid.rows() * cols];
    let mut queue = VecDeque::from([start]);
    visited[index(start)] = true;

    'search: while let Some(pos) = queue.pop_front() {
        for (_, next) in grid.neighbors(pos) {
            if visited[index(next)] || grid.is_wall(next) {
                continue;
            }
            visited[index(next)] = true;
            prev[index(next)] = Some(pos);
            if next == end {
                break 'search;
            }
            queue.push_back(next);
        }
    }

    if !visited[index(end)] {
        return None;
    }

    let mut path = vec![end];
    let mut current = end;
    while let Some(before) = prev[index(current)] {
        path.push(before);
        current = before;
    }
    path.reverse();
    Some(path)
}
