//! Maze lattice and coordinate mapping module.
//!
//! This module contains the wall/passage matrix the maze is carved into, along with the two
//! coordinate spaces used to address it: logical cells (the rooms of the maze) and grid coordinates
//! (the finer matrix holding both rooms and the walls between them).

use thiserror::Error;

/// Failures reported by the public lattice API.
///
/// Internal callers never trigger these because every coordinate they use is derived from a valid
/// logical cell. They exist for coordinates supplied from outside the crate.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// The requested maze size has a zero dimension or does not fit in memory addressing.
    #[error("maze dimensions {rows}x{cols} are invalid; both must be at least 1")]
    InvalidDimensions {
        /// Requested number of logical rows.
        rows: usize,
        /// Requested number of logical columns.
        cols: usize,
    },
    /// A grid coordinate or logical cell falls outside the lattice.
    #[error("coordinate ({row}, {col}) lies outside the {height}x{width} lattice")]
    InvalidCoordinate {
        /// Row of the rejected coordinate.
        row: usize,
        /// Column of the rejected coordinate.
        col: usize,
        /// Height of the space the coordinate was checked against.
        height: usize,
        /// Width of the space the coordinate was checked against.
        width: usize,
    },
    /// Two logical cells passed to a carve are not 4-adjacent.
    #[error("cells {from:?} and {to:?} are not adjacent")]
    NotAdjacent {
        /// First cell of the rejected pair.
        from: LogicalCell,
        /// Second cell of the rejected pair.
        to: LogicalCell,
    },
}

/// One of the four directions a passage may run in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Towards the last column.
    Right,
    /// Towards the last row.
    Down,
    /// Towards column zero.
    Left,
}

impl Direction {
    /// All directions, in the order neighbours are enumerated.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Moves `(row, col)` one unit in this direction, failing below zero or past the given bounds.
    ///
    /// A starting point outside the bounds has no neighbours.
    const fn offset(self, row: usize, col: usize, height: usize, width: usize) -> Option<(usize, usize)> {
        if row >= height || col >= width {
            return None;
        }

        match self {
            Self::Up if row > 0 => Some((row - 1, col)),
            Self::Right if col + 1 < width => Some((row, col + 1)),
            Self::Down if row + 1 < height => Some((row + 1, col)),
            Self::Left if col > 0 => Some((row, col - 1)),
            _ => None,
        }
    }
}

/// A room of the maze, addressed in logical space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalCell {
    /// Logical row, counted from the top.
    pub row: usize,
    /// Logical column, counted from the left.
    pub col: usize,
}

impl LogicalCell {
    /// Builds a logical cell from its row and column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Maps the cell onto the grid coordinate of its body.
    pub const fn to_grid(self) -> GridCoordinate {
        GridCoordinate::new(self.row * 2 + 1, self.col * 2 + 1)
    }

    /// Returns the adjacent cell in `direction`, if it lies inside a `rows`x`cols` maze.
    pub const fn neighbour(self, direction: Direction, rows: usize, cols: usize) -> Option<Self> {
        match direction.offset(self.row, self.col, rows, cols) {
            Some((row, col)) => Some(Self::new(row, col)),
            None => None,
        }
    }

    /// Tells whether the two cells share a side.
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

/// A position in the fine-grained lattice that holds both cell bodies and the walls between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoordinate {
    /// Lattice row, counted from the top.
    pub row: usize,
    /// Lattice column, counted from the left.
    pub col: usize,
}

impl GridCoordinate {
    /// Builds a grid coordinate from its row and column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Maps the coordinate back onto the logical cell whose body it is.
    ///
    /// Only coordinates with both indices odd are cell bodies; every other coordinate yields
    /// [`None`].
    pub const fn to_logical(self) -> Option<LogicalCell> {
        if self.row % 2 == 1 && self.col % 2 == 1 {
            Some(LogicalCell::new(self.row / 2, self.col / 2))
        } else {
            None
        }
    }

    /// Returns the adjacent coordinate in `direction`, if it lies inside a `height`x`width`
    /// lattice.
    pub const fn neighbour(self, direction: Direction, height: usize, width: usize) -> Option<Self> {
        match direction.offset(self.row, self.col, height, width) {
            Some((row, col)) => Some(Self::new(row, col)),
            None => None,
        }
    }

    /// Manhattan distance between two coordinates.
    pub const fn distance(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Wall/passage matrix over grid coordinates.
///
/// The matrix is `(2R+1)x(2C+1)` for an `RxC` maze and starts out solid. Cell bodies are opened as
/// the carver reaches them and each carve clears the single coordinate between two adjacent cell
/// bodies, so the outer frame is never opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridModel {
    /// Number of logical rows.
    rows: usize,
    /// Number of logical columns.
    cols: usize,
    /// Row-major wall flags; `true` is a wall.
    walls: Vec<bool>,
}

impl GridModel {
    /// Creates a solid lattice for a `rows`x`cols` maze.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidDimensions`] if either dimension is zero or the
    /// lattice size overflows.
    pub fn new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        let invalid = MazeError::InvalidDimensions { rows, cols };
        if rows == 0 || cols == 0 {
            return Err(invalid);
        }

        let height = rows
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(1))
            .ok_or(invalid)?;
        let width = cols
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(1))
            .ok_or(invalid)?;
        let len = height.checked_mul(width).ok_or(invalid)?;

        Ok(Self {
            rows,
            cols,
            walls: vec![true; len],
        })
    }

    /// Number of logical rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of logical columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of lattice rows, `2R+1`.
    pub const fn height(&self) -> usize {
        self.rows * 2 + 1
    }

    /// Number of lattice columns, `2C+1`.
    pub const fn width(&self) -> usize {
        self.cols * 2 + 1
    }

    /// Tells whether the logical cell lies inside the maze.
    pub const fn contains_cell(&self, cell: LogicalCell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Tells whether the coordinate lies inside the lattice.
    pub const fn contains(&self, coord: GridCoordinate) -> bool {
        coord.row < self.height() && coord.col < self.width()
    }

    /// Flat index of an in-bounds coordinate.
    const fn index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.row * self.width() + coord.col)
        } else {
            None
        }
    }

    /// Builds the error reported for an out-of-range lattice coordinate.
    const fn out_of_lattice(&self, coord: GridCoordinate) -> MazeError {
        MazeError::InvalidCoordinate {
            row: coord.row,
            col: coord.col,
            height: self.height(),
            width: self.width(),
        }
    }

    /// Builds the error reported for an out-of-range logical cell.
    const fn out_of_maze(&self, cell: LogicalCell) -> MazeError {
        MazeError::InvalidCoordinate {
            row: cell.row,
            col: cell.col,
            height: self.rows,
            width: self.cols,
        }
    }

    /// Tells whether the coordinate is a passage. Out-of-range coordinates are walls.
    pub fn is_passage(&self, coord: GridCoordinate) -> bool {
        self.index(coord)
            .and_then(|idx| self.walls.get(idx))
            .is_some_and(|wall| !*wall)
    }

    /// Checked variant of [`GridModel::is_passage`] for externally supplied coordinates.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidCoordinate`] if the coordinate lies outside the
    /// lattice.
    pub fn passage_at(&self, coord: GridCoordinate) -> Result<bool, MazeError> {
        self.index(coord)
            .and_then(|idx| self.walls.get(idx))
            .map(|wall| !*wall)
            .ok_or_else(|| self.out_of_lattice(coord))
    }

    /// Sets the wall flag of a single coordinate.
    ///
    /// The carver never calls this; it exists so callers can shape a lattice by hand, e.g. to seal
    /// off a region.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidCoordinate`] if the coordinate lies outside the
    /// lattice.
    pub fn set_wall(&mut self, coord: GridCoordinate, wall: bool) -> Result<(), MazeError> {
        let error = self.out_of_lattice(coord);
        let slot = self
            .index(coord)
            .and_then(|idx| self.walls.get_mut(idx))
            .ok_or(error)?;
        *slot = wall;

        Ok(())
    }

    /// Opens the body of a logical cell.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidCoordinate`] if the cell lies outside the maze.
    pub fn open_cell(&mut self, cell: LogicalCell) -> Result<(), MazeError> {
        if !self.contains_cell(cell) {
            return Err(self.out_of_maze(cell));
        }

        self.set_wall(cell.to_grid(), false)
    }

    /// Clears the wall between two adjacent logical cells. Carving the same pair twice is a no-op.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidCoordinate`] if either cell lies outside the maze
    /// and [`MazeError::NotAdjacent`] if the cells do not share a side. The lattice is left
    /// untouched on error.
    pub fn carve(&mut self, from: LogicalCell, to: LogicalCell) -> Result<(), MazeError> {
        for cell in [from, to] {
            if !self.contains_cell(cell) {
                return Err(self.out_of_maze(cell));
            }
        }
        if !from.is_adjacent(to) {
            return Err(MazeError::NotAdjacent { from, to });
        }

        self.set_wall(Self::midpoint(from, to), false)
    }

    /// Grid coordinate of the wall separating two adjacent cells.
    const fn midpoint(from: LogicalCell, to: LogicalCell) -> GridCoordinate {
        let (start, end) = (from.to_grid(), to.to_grid());
        GridCoordinate::new((start.row + end.row) / 2, (start.col + end.col) / 2)
    }

    /// Tells whether a passage has been carved between two cells.
    pub fn is_carved(&self, from: LogicalCell, to: LogicalCell) -> bool {
        self.contains_cell(from)
            && self.contains_cell(to)
            && from.is_adjacent(to)
            && self.is_passage(Self::midpoint(from, to))
    }

    /// Number of carved passages, i.e. opened coordinates that separate two cell bodies.
    pub fn carved_passages(&self) -> usize {
        self.coordinates()
            .filter(|coord| (coord.row + coord.col) % 2 == 1 && self.is_passage(*coord))
            .count()
    }

    /// Iterates every lattice coordinate in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        (0..self.height())
            .flat_map(move |row| (0..self.width()).map(move |col| GridCoordinate::new(row, col)))
    }

    /// Iterates the coordinates that are currently walls.
    pub fn walls(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        self.coordinates().filter(move |coord| !self.is_passage(*coord))
    }

    /// Iterates the in-bounds passage neighbours of a coordinate.
    pub fn open_neighbours(&self, coord: GridCoordinate) -> impl Iterator<Item = GridCoordinate> + '_ {
        let (height, width) = (self.height(), self.width());
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| coord.neighbour(direction, height, width))
            .filter(move |neighbour| self.is_passage(*neighbour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_solid() {
        let grid = GridModel::new(2, 3).expect("valid dimensions");

        assert_eq!(grid.height(), 5);
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.walls().count(), 35);
        assert_eq!(grid.carved_passages(), 0);
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(
            GridModel::new(0, 4),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 4 })
        );
        assert!(GridModel::new(3, 0).is_err());
    }

    #[test]
    fn test_new_rejects_overflowing_dimensions() {
        assert!(GridModel::new(usize::MAX, 1).is_err());
    }

    #[test]
    fn test_cell_mapping_round_trips() {
        let cell = LogicalCell::new(3, 5);
        let coord = cell.to_grid();

        assert_eq!(coord, GridCoordinate::new(7, 11));
        assert_eq!(coord.to_logical(), Some(cell));
        assert_eq!(GridCoordinate::new(2, 3).to_logical(), None);
        assert_eq!(GridCoordinate::new(0, 0).to_logical(), None);
    }

    #[test]
    fn test_carve_clears_only_the_midpoint() {
        let mut grid = GridModel::new(2, 2).expect("valid dimensions");
        let (first, second) = (LogicalCell::new(0, 0), LogicalCell::new(0, 1));

        grid.carve(first, second).expect("adjacent cells");

        assert!(grid.is_passage(GridCoordinate::new(1, 2)));
        assert!(grid.is_carved(first, second));
        assert!(grid.is_carved(second, first));
        assert_eq!(grid.walls().count(), 24);
    }

    #[test]
    fn test_carve_is_idempotent() {
        let mut grid = GridModel::new(2, 2).expect("valid dimensions");
        let (first, second) = (LogicalCell::new(0, 0), LogicalCell::new(1, 0));

        grid.carve(first, second).expect("adjacent cells");
        let once = grid.clone();
        grid.carve(first, second).expect("adjacent cells");

        assert_eq!(grid, once);
        assert_eq!(grid.carved_passages(), 1);
    }

    #[test]
    fn test_carve_rejects_non_adjacent_cells() {
        let mut grid = GridModel::new(3, 3).expect("valid dimensions");
        let before = grid.clone();

        let diagonal = grid.carve(LogicalCell::new(0, 0), LogicalCell::new(1, 1));
        let same = grid.carve(LogicalCell::new(1, 1), LogicalCell::new(1, 1));

        assert!(matches!(diagonal, Err(MazeError::NotAdjacent { .. })));
        assert!(matches!(same, Err(MazeError::NotAdjacent { .. })));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_carve_rejects_cells_outside_the_maze() {
        let mut grid = GridModel::new(2, 2).expect("valid dimensions");

        let result = grid.carve(LogicalCell::new(1, 1), LogicalCell::new(1, 2));

        assert_eq!(
            result,
            Err(MazeError::InvalidCoordinate {
                row: 1,
                col: 2,
                height: 2,
                width: 2,
            })
        );
    }

    #[test]
    fn test_out_of_range_coordinates_are_walls() {
        let mut grid = GridModel::new(1, 1).expect("valid dimensions");
        grid.open_cell(LogicalCell::new(0, 0)).expect("cell in range");

        assert!(grid.is_passage(GridCoordinate::new(1, 1)));
        assert!(!grid.is_passage(GridCoordinate::new(3, 1)));
        assert!(!grid.is_passage(GridCoordinate::new(1, usize::MAX)));
    }

    #[test]
    fn test_passage_at_reports_invalid_coordinates() {
        let grid = GridModel::new(1, 1).expect("valid dimensions");

        assert_eq!(grid.passage_at(GridCoordinate::new(0, 0)), Ok(false));
        assert_eq!(
            grid.passage_at(GridCoordinate::new(3, 0)),
            Err(MazeError::InvalidCoordinate {
                row: 3,
                col: 0,
                height: 3,
                width: 3,
            })
        );
    }

    #[test]
    fn test_set_wall_rejects_invalid_coordinates() {
        let mut grid = GridModel::new(1, 1).expect("valid dimensions");

        assert!(grid.set_wall(GridCoordinate::new(1, 1), false).is_ok());
        assert!(grid.set_wall(GridCoordinate::new(9, 9), false).is_err());
    }

    #[test]
    fn test_open_neighbours_stay_inside_the_lattice() {
        let mut grid = GridModel::new(1, 2).expect("valid dimensions");
        grid.open_cell(LogicalCell::new(0, 0)).expect("cell in range");
        grid.open_cell(LogicalCell::new(0, 1)).expect("cell in range");
        grid.carve(LogicalCell::new(0, 0), LogicalCell::new(0, 1))
            .expect("adjacent cells");

        let around_start: Vec<_> = grid.open_neighbours(GridCoordinate::new(1, 1)).collect();
        let around_corner: Vec<_> = grid.open_neighbours(GridCoordinate::new(0, 0)).collect();

        assert_eq!(around_start, vec![GridCoordinate::new(1, 2)]);
        assert!(around_corner.is_empty());
    }

    #[test]
    fn test_logical_neighbour_respects_bounds() {
        let corner = LogicalCell::new(0, 0);

        assert_eq!(corner.neighbour(Direction::Up, 2, 2), None);
        assert_eq!(corner.neighbour(Direction::Left, 2, 2), None);
        assert_eq!(
            corner.neighbour(Direction::Right, 2, 2),
            Some(LogicalCell::new(0, 1))
        );
        assert_eq!(
            corner.neighbour(Direction::Down, 2, 2),
            Some(LogicalCell::new(1, 0))
        );
        assert_eq!(LogicalCell::new(1, 1).neighbour(Direction::Down, 2, 2), None);
    }

    #[test]
    fn test_open_neighbours_of_outside_coordinate_are_empty() {
        let grid = GridModel::new(1, 1).expect("valid dimensions");

        assert_eq!(grid.open_neighbours(GridCoordinate::new(0, usize::MAX)).count(), 0);
        assert_eq!(grid.open_neighbours(GridCoordinate::new(usize::MAX, 0)).count(), 0);
        assert_eq!(grid.open_neighbours(GridCoordinate::new(4, 1)).count(), 0);
    }

    #[test]
    fn test_neighbour_of_outside_coordinate_is_none() {
        let far = GridCoordinate::new(usize::MAX, usize::MAX);

        for direction in Direction::ALL {
            assert_eq!(far.neighbour(direction, 3, 3), None, "{direction:?} escaped");
        }
        assert_eq!(LogicalCell::new(5, 0).neighbour(Direction::Up, 2, 2), None);
    }
}
