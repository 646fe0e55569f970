//! Randomized depth-first maze carving module.
//!
//! This module contains the stateful carver that turns a solid [`GridModel`] into a perfect maze
//! one step at a time. The depth-first search keeps its call stack in an explicit frontier, so the
//! carving can be paused after any step and resumed later without losing state.

use log::{debug, error, trace};
use rand::{seq::IndexedRandom as _, Rng};

use crate::lattice::{Direction, GridModel, LogicalCell, MazeError};

/// Outcome of a single carving step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// The step carved or backtracked; more work may remain.
    Working,
    /// The frontier was already empty; the maze is finished.
    Done,
}

/// Stateful randomized depth-first carver.
///
/// The carver owns the lattice while it is being built, along with the visited flags for every
/// logical cell and the frontier stack whose top is the cell being extended. Randomness is injected
/// so seeded runs are reproducible.
#[derive(Debug)]
pub struct MazeGenerator<R> {
    /// Lattice being carved.
    grid: GridModel,
    /// Row-major visited flags over logical cells, only ever set.
    visited: Vec<bool>,
    /// Explicit depth-first stack; the last element is the cell being extended.
    frontier: Vec<LogicalCell>,
    /// Cell highlighted while carving.
    current: LogicalCell,
    /// Set once a step finds the frontier empty.
    complete: bool,
    /// Number of cells pushed onto the frontier so far.
    pushes: usize,
    /// Number of cells popped off the frontier so far.
    pops: usize,
    /// Source of the uniform neighbour choices.
    rng: R,
}

impl<R: Rng> MazeGenerator<R> {
    /// Creates a carver for a `rows`x`cols` maze seeded at the top-left cell.
    ///
    /// The top-left cell starts visited, opened and as the sole frontier entry; nothing is carved
    /// yet.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidDimensions`] if either dimension is zero or too
    /// large to address.
    pub fn new(rows: usize, cols: usize, rng: R) -> Result<Self, MazeError> {
        let mut grid = GridModel::new(rows, cols)?;
        let origin = LogicalCell::new(0, 0);
        grid.open_cell(origin)?;

        let mut generator = Self {
            grid,
            visited: vec![false; rows * cols],
            frontier: vec![origin],
            current: origin,
            complete: false,
            pushes: 1,
            pops: 0,
            rng,
        };
        generator.mark_visited(origin);

        Ok(generator)
    }

    /// Performs one unit of carving work.
    ///
    /// If the frontier is empty, this marks the maze complete and reports [`StepStatus::Done`].
    /// Otherwise it either extends the top cell into a uniformly chosen unvisited neighbour,
    /// carving the wall between them, or pops the top cell when it has no unvisited neighbours
    /// left.
    pub fn step(&mut self) -> StepStatus {
        let Some(&top) = self.frontier.last() else {
            if !self.complete {
                debug!(
                    "maze carving finished after {} pushes and {} pops",
                    self.pushes, self.pops
                );
            }
            self.complete = true;
            return StepStatus::Done;
        };
        self.current = top;

        let candidates = self.unvisited_neighbours(top);
        let choice = candidates.choose(&mut self.rng).copied();
        if let Some(next) = choice {
            self.mark_visited(next);
            let carved = self
                .grid
                .open_cell(next)
                .and_then(|()| self.grid.carve(top, next));
            if let Err(err) = carved {
                error!("failed to carve {top:?} -> {next:?}: {err}");
            }

            self.frontier.push(next);
            self.pushes += 1;
            self.current = next;
            trace!("carved {top:?} -> {next:?}");
        } else {
            let _ = self.frontier.pop();
            self.pops += 1;
            trace!("backtracked from {top:?}");
        }

        StepStatus::Working
    }

    /// Steps until the maze is finished, returning the number of steps taken.
    pub fn run_to_completion(&mut self) -> usize {
        let mut steps = 0;
        while self.step() == StepStatus::Working {
            steps += 1;
        }

        steps
    }

    /// Collects the in-bounds, unvisited 4-neighbours of a cell.
    fn unvisited_neighbours(&self, cell: LogicalCell) -> Vec<LogicalCell> {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        Direction::ALL
            .into_iter()
            .filter_map(|direction| cell.neighbour(direction, rows, cols))
            .filter(|neighbour| !self.is_visited(*neighbour))
            .collect()
    }

    /// Flags a cell as visited.
    fn mark_visited(&mut self, cell: LogicalCell) {
        let cols = self.grid.cols();
        if let Some(flag) = self.visited.get_mut(cell.row * cols + cell.col) {
            *flag = true;
        }
    }

    /// Lattice in its current state of carving.
    pub const fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Mutable access to the lattice, for tests that reshape a maze by hand.
    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut GridModel {
        &mut self.grid
    }

    /// Tells whether the carver has reached a cell. Cells outside the maze are never visited.
    pub fn is_visited(&self, cell: LogicalCell) -> bool {
        self.grid.contains_cell(cell)
            && self
                .visited
                .get(cell.row * self.grid.cols() + cell.col)
                .is_some_and(|flag| *flag)
    }

    /// Number of cells visited so far.
    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|flag| **flag).count()
    }

    /// Current frontier, bottom first.
    pub fn frontier(&self) -> &[LogicalCell] {
        &self.frontier
    }

    /// Cell the carver last extended into or backtracked from.
    pub const fn current(&self) -> LogicalCell {
        self.current
    }

    /// Tells whether a step has found the frontier empty.
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of frontier pushes so far, including the initial cell.
    pub const fn pushes(&self) -> usize {
        self.pushes
    }

    /// Number of frontier pops so far.
    pub const fn pops(&self) -> usize {
        self.pops
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;

    /// Creates a carver with a deterministic random source.
    fn seeded(rows: usize, cols: usize, seed: u64) -> MazeGenerator<StdRng> {
        MazeGenerator::new(rows, cols, StdRng::seed_from_u64(seed)).expect("valid dimensions")
    }

    /// Counts the logical cells reachable from the origin through carved passages.
    fn reachable_cells(grid: &GridModel) -> usize {
        let (rows, cols) = (grid.rows(), grid.cols());
        let mut seen = vec![false; rows * cols];
        let mut queue = VecDeque::from([LogicalCell::new(0, 0)]);
        if let Some(flag) = seen.first_mut() {
            *flag = true;
        }

        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for direction in Direction::ALL {
                let Some(next) = cell.neighbour(direction, rows, cols) else {
                    continue;
                };
                let Some(flag) = seen.get_mut(next.row * cols + next.col) else {
                    continue;
                };
                if !*flag && grid.is_carved(cell, next) {
                    *flag = true;
                    queue.push_back(next);
                }
            }
        }

        count
    }

    #[test]
    fn test_new_seeds_the_origin() {
        let generator = seeded(3, 4, 7);

        assert_eq!(generator.frontier(), &[LogicalCell::new(0, 0)]);
        assert_eq!(generator.current(), LogicalCell::new(0, 0));
        assert!(generator.is_visited(LogicalCell::new(0, 0)));
        assert_eq!(generator.visited_count(), 1);
        assert!(generator.grid().is_passage(LogicalCell::new(0, 0).to_grid()));
        assert_eq!(generator.grid().carved_passages(), 0);
        assert!(!generator.is_complete());
    }

    #[test]
    fn test_new_rejects_empty_maze() {
        let result = MazeGenerator::new(0, 3, StdRng::seed_from_u64(0));

        assert!(result.is_err());
    }

    #[test]
    fn test_single_cell_maze_completes_without_carving() {
        let mut generator = seeded(1, 1, 0);

        assert_eq!(generator.step(), StepStatus::Working);
        assert!(generator.frontier().is_empty());
        assert!(!generator.is_complete());
        assert_eq!(generator.step(), StepStatus::Done);
        assert!(generator.is_complete());
        assert_eq!(generator.grid().carved_passages(), 0);
    }

    #[test]
    fn test_first_step_extends_into_a_neighbour() {
        let mut generator = seeded(3, 3, 11);

        assert_eq!(generator.step(), StepStatus::Working);

        let current = generator.current();
        assert!(LogicalCell::new(0, 0).is_adjacent(current));
        assert_eq!(generator.frontier(), &[LogicalCell::new(0, 0), current]);
        assert!(generator.grid().is_carved(LogicalCell::new(0, 0), current));
        assert_eq!(generator.visited_count(), 2);
    }

    #[test]
    fn test_two_by_two_carves_three_passages() {
        for seed in 0..32 {
            let mut generator = seeded(2, 2, seed);
            let _ = generator.run_to_completion();

            assert_eq!(generator.grid().carved_passages(), 3, "seed {seed}");
            assert_eq!(generator.visited_count(), 4, "seed {seed}");
        }
    }

    #[test]
    fn test_run_to_completion_counts_steps() {
        let mut generator = seeded(4, 5, 3);

        let steps = generator.run_to_completion();

        // One step per push after the first, one per pop.
        assert_eq!(steps, 19 + 20);
        assert_eq!(generator.step(), StepStatus::Done);
    }

    #[test]
    fn test_same_seed_carves_same_maze() {
        let mut first = seeded(6, 9, 42);
        let mut second = seeded(6, 9, 42);

        let _ = first.run_to_completion();
        let _ = second.run_to_completion();

        assert_eq!(first.grid(), second.grid());
    }

    #[test]
    fn test_outer_frame_stays_solid() {
        let mut generator = seeded(5, 5, 9);
        let _ = generator.run_to_completion();
        let grid = generator.grid();

        for coord in grid.coordinates() {
            let on_frame = coord.row == 0
                || coord.col == 0
                || coord.row == grid.height() - 1
                || coord.col == grid.width() - 1;
            if on_frame {
                assert!(!grid.is_passage(coord), "frame opened at {coord:?}");
            }
        }
    }

    proptest! {
        #[test]
        fn prop_carving_builds_a_spanning_tree(rows in 1_usize..9, cols in 1_usize..9, seed in any::<u64>()) {
            let mut generator = seeded(rows, cols, seed);
            let _ = generator.run_to_completion();
            let cells = rows * cols;

            prop_assert!(generator.is_complete());
            prop_assert!(generator.frontier().is_empty());
            prop_assert_eq!(generator.visited_count(), cells);
            prop_assert_eq!(generator.pushes(), cells);
            prop_assert_eq!(generator.pops(), cells);
            // A connected graph on n vertices with n - 1 edges is a tree.
            prop_assert_eq!(generator.grid().carved_passages(), cells - 1);
            prop_assert_eq!(reachable_cells(generator.grid()), cells);
        }
    }
}
