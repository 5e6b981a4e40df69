//! The maze: a rectangular wall matrix with a start and a goal cell.
//!
//! [`Maze`] is the long-lived grid configuration consumed by the search
//! engine. It is mutated only through [`Maze::toggle_wall`]; everything the
//! solver touches during a solve is read-only.

use std::fmt;

use crate::coord::{Coord, Move};

/// A rectangular grid maze.
///
/// Walls are stored as a row-major flat boolean matrix. The start and goal
/// cells are never walls: constructors clear them and
/// [`Maze::toggle_wall`] refuses to set them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: i32,
    height: i32,
    walls: Vec<bool>,
    start: Coord,
    goal: Coord,
}

impl Maze {
    /// Create a maze with no walls.
    ///
    /// Errors if the dimensions are not positive or if `start` or `goal`
    /// fall outside them.
    pub fn new(width: i32, height: i32, start: Coord, goal: Coord) -> Result<Self, MazeError> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::InvalidSize { width, height });
        }
        let maze = Self {
            width,
            height,
            walls: vec![false; (width * height) as usize],
            start,
            goal,
        };
        if !maze.in_bounds(start) {
            return Err(MazeError::OutOfBounds { cell: "start", pos: start });
        }
        if !maze.in_bounds(goal) {
            return Err(MazeError::OutOfBounds { cell: "goal", pos: goal });
        }
        Ok(maze)
    }

    /// Restore a maze from a previously saved row-major wall matrix.
    ///
    /// `walls.len()` must equal `width * height`. A saved wall on the start
    /// or goal cell is silently cleared, the same policy that rejects
    /// walling those cells through [`Maze::toggle_wall`].
    pub fn from_walls(
        width: i32,
        height: i32,
        walls: Vec<bool>,
        start: Coord,
        goal: Coord,
    ) -> Result<Self, MazeError> {
        let mut maze = Self::new(width, height, start, goal)?;
        if walls.len() != maze.walls.len() {
            return Err(MazeError::WallMatrixMismatch {
                expected: maze.walls.len(),
                actual: walls.len(),
            });
        }
        maze.walls = walls;
        if let Some(i) = maze.index_of(start) {
            maze.walls[i] = false;
        }
        if let Some(i) = maze.index_of(goal) {
            maze.walls[i] = false;
        }
        Ok(maze)
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.walls.len()
    }

    /// The start cell.
    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    /// The goal cell.
    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// The row-major wall matrix (the shape persisted by external layers).
    #[inline]
    pub fn walls(&self) -> &[bool] {
        &self.walls
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.row >= 0 && c.col >= 0 && c.row < self.height && c.col < self.width
    }

    /// Convert a coordinate to a flat row-major index. `None` if out of bounds.
    #[inline]
    pub fn index_of(&self, c: Coord) -> Option<usize> {
        if !self.in_bounds(c) {
            return None;
        }
        Some((c.row * self.width + c.col) as usize)
    }

    /// Whether `c` is a wall. Out-of-bounds cells are not walls.
    #[inline]
    pub fn is_wall(&self, c: Coord) -> bool {
        match self.index_of(c) {
            Some(i) => self.walls[i],
            None => false,
        }
    }

    /// Whether `c` is inside the grid and not a wall.
    #[inline]
    pub fn is_open(&self, c: Coord) -> bool {
        matches!(self.index_of(c), Some(i) if !self.walls[i])
    }

    /// Flip the wall state of the cell at `(row, col)`.
    ///
    /// Toggling the start cell, the goal cell, or an out-of-bounds cell is
    /// a no-op. Returns `true` when the matrix changed, so callers that
    /// persist the matrix know a save is due.
    pub fn toggle_wall(&mut self, row: i32, col: i32) -> bool {
        let c = Coord::new(row, col);
        if c == self.start || c == self.goal {
            log::trace!("ignoring wall toggle on {c}: start/goal cells stay open");
            return false;
        }
        match self.index_of(c) {
            Some(i) => {
                self.walls[i] = !self.walls[i];
                true
            }
            None => false,
        }
    }

    /// Append the legal neighbors of `from` into `buf`, as
    /// `(move, coordinate)` pairs in [`Move::ALL`] order.
    ///
    /// A neighbor is legal when it is in bounds and not a wall. `buf` is
    /// cleared first.
    pub fn neighbors(&self, from: Coord, buf: &mut Vec<(Move, Coord)>) {
        buf.clear();
        for m in Move::ALL {
            let next = m.apply(from);
            if self.is_open(next) {
                buf.push((m, next));
            }
        }
    }
}

/// Errors constructing or restoring a [`Maze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Width or height was zero or negative.
    InvalidSize { width: i32, height: i32 },
    /// The start or goal cell lies outside the grid.
    OutOfBounds { cell: &'static str, pos: Coord },
    /// A restored wall matrix does not match `width * height`.
    WallMatrixMismatch { expected: usize, actual: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "maze dimensions must be positive, got {width}x{height}")
            }
            Self::OutOfBounds { cell, pos } => {
                write!(f, "maze {cell} cell {pos} is out of bounds")
            }
            Self::WallMatrixMismatch { expected, actual } => {
                write!(f, "wall matrix holds {actual} cells, expected {expected}")
            }
        }
    }
}

impl std::error::Error for MazeError {}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct MazeRepr {
    width: i32,
    height: i32,
    walls: Vec<bool>,
    start: Coord,
    goal: Coord,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Maze {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MazeRepr {
            width: self.width,
            height: self.height,
            walls: self.walls.clone(),
            start: self.start,
            goal: self.goal,
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Maze {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = MazeRepr::deserialize(deserializer)?;
        // Goes through the validating constructor so a tampered save cannot
        // produce a maze that violates the start/goal invariants.
        Maze::from_walls(repr.width, repr.height, repr.walls, repr.start, repr.goal)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze_3x3() -> Maze {
        Maze::new(3, 3, Coord::new(0, 0), Coord::new(2, 2)).unwrap()
    }

    #[test]
    fn new_rejects_bad_dimensions() {
        let err = Maze::new(0, 3, Coord::ZERO, Coord::ZERO).unwrap_err();
        assert_eq!(err, MazeError::InvalidSize { width: 0, height: 3 });
        assert!(Maze::new(3, -1, Coord::ZERO, Coord::ZERO).is_err());
    }

    #[test]
    fn new_rejects_out_of_bounds_endpoints() {
        let err = Maze::new(3, 3, Coord::new(0, 0), Coord::new(3, 3)).unwrap_err();
        assert_eq!(
            err,
            MazeError::OutOfBounds {
                cell: "goal",
                pos: Coord::new(3, 3)
            }
        );
        assert!(Maze::new(3, 3, Coord::new(-1, 0), Coord::new(2, 2)).is_err());
    }

    #[test]
    fn bounds_and_indexing() {
        let m = maze_3x3();
        assert!(m.in_bounds(Coord::new(0, 0)));
        assert!(m.in_bounds(Coord::new(2, 2)));
        assert!(!m.in_bounds(Coord::new(-1, 0)));
        assert!(!m.in_bounds(Coord::new(0, 3)));
        assert_eq!(m.index_of(Coord::new(1, 2)), Some(5));
        assert_eq!(m.index_of(Coord::new(3, 0)), None);
    }

    #[test]
    fn toggle_flips_and_reports_change() {
        let mut m = maze_3x3();
        let c = Coord::new(1, 1);
        assert!(!m.is_wall(c));
        assert!(m.toggle_wall(1, 1));
        assert!(m.is_wall(c));
        assert!(m.toggle_wall(1, 1));
        assert!(!m.is_wall(c));
    }

    #[test]
    fn toggle_on_start_or_goal_is_a_no_op() {
        let mut m = maze_3x3();
        let before = m.clone();
        assert!(!m.toggle_wall(0, 0));
        assert!(!m.toggle_wall(2, 2));
        assert_eq!(m, before);
    }

    #[test]
    fn toggle_out_of_bounds_is_a_no_op() {
        let mut m = maze_3x3();
        let before = m.clone();
        assert!(!m.toggle_wall(-1, 0));
        assert!(!m.toggle_wall(0, 9));
        assert_eq!(m, before);
    }

    #[test]
    fn start_and_goal_stay_open_under_any_toggles() {
        let mut m = maze_3x3();
        for row in -1..4 {
            for col in -1..4 {
                m.toggle_wall(row, col);
            }
        }
        assert!(!m.is_wall(m.start()));
        assert!(!m.is_wall(m.goal()));
    }

    #[test]
    fn neighbors_in_fixed_order() {
        let m = maze_3x3();
        let mut buf = Vec::new();
        m.neighbors(Coord::new(1, 1), &mut buf);
        assert_eq!(
            buf,
            vec![
                (Move::Up, Coord::new(0, 1)),
                (Move::Down, Coord::new(2, 1)),
                (Move::Right, Coord::new(1, 2)),
                (Move::Left, Coord::new(1, 0)),
            ]
        );
    }

    #[test]
    fn neighbors_filter_bounds_and_walls() {
        let mut m = maze_3x3();
        m.toggle_wall(0, 1);
        let mut buf = Vec::new();
        // Corner cell: up and left are out of bounds, right is now a wall.
        m.neighbors(Coord::new(0, 0), &mut buf);
        assert_eq!(buf, vec![(Move::Down, Coord::new(1, 0))]);
    }

    #[test]
    fn from_walls_restores_matrix() {
        let mut walls = vec![false; 9];
        walls[4] = true;
        let m = Maze::from_walls(3, 3, walls, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
        assert!(m.is_wall(Coord::new(1, 1)));
    }

    #[test]
    fn from_walls_rejects_length_mismatch() {
        let err =
            Maze::from_walls(3, 3, vec![false; 8], Coord::new(0, 0), Coord::new(2, 2)).unwrap_err();
        assert_eq!(
            err,
            MazeError::WallMatrixMismatch {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn from_walls_clears_saved_walls_on_endpoints() {
        let walls = vec![true; 9];
        let m = Maze::from_walls(3, 3, walls, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
        assert!(!m.is_wall(m.start()));
        assert!(!m.is_wall(m.goal()));
        assert!(m.is_wall(Coord::new(1, 1)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn maze_round_trip() {
        let mut m = Maze::new(4, 3, Coord::new(0, 0), Coord::new(2, 3)).unwrap();
        m.toggle_wall(1, 1);
        m.toggle_wall(0, 2);
        let json = serde_json::to_string(&m).unwrap();
        let back: Maze = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn deserialize_enforces_endpoint_invariant() {
        // A hand-edited save with a wall on the start cell.
        let json = r#"{"width":2,"height":2,"walls":[true,false,false,false],
                       "start":{"row":0,"col":0},"goal":{"row":1,"col":1}}"#;
        let m: Maze = serde_json::from_str(json).unwrap();
        assert!(!m.is_wall(m.start()));
    }

    #[test]
    fn deserialize_rejects_inconsistent_save() {
        let json = r#"{"width":2,"height":2,"walls":[false],
                       "start":{"row":0,"col":0},"goal":{"row":1,"col":1}}"#;
        assert!(serde_json::from_str::<Maze>(json).is_err());
    }
}
