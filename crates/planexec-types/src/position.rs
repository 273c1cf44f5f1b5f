//! Grid positions and compass directions.
//!
//! The runtime uses screen coordinates: `x` grows to the east and `y` grows
//! to the south, so north is `y - 1`. Directions are the eight compass points
//! a unit can face when gathering from or depositing into an adjacent cell.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A cell on the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, growing eastward.
    pub x: i32,
    /// Row, growing southward.
    pub y: i32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The 8-way direction from `self` toward `target`.
    ///
    /// Only the sign of each axis delta matters, so a target two cells to
    /// the north-east still yields [`Direction::NorthEast`]. Returns `None`
    /// when both positions coincide.
    pub fn direction_to(self, target: Self) -> Option<Direction> {
        Direction::from_signs(target.x.cmp(&self.x), target.y.cmp(&self.y))
    }

    /// The neighbouring cell in `direction`, or `None` at the edge of the
    /// coordinate space.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Chebyshev (king-move) distance: the number of turns a unit moving
    /// one cell per turn in any of 8 directions needs to reach `other`.
    pub const fn distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }

    /// Whether `other` is one of the eight cells surrounding `self`.
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.distance(other) == 1
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `y - 1`.
    North,
    /// `x + 1, y - 1`.
    NorthEast,
    /// `x + 1`.
    East,
    /// `x + 1, y + 1`.
    SouthEast,
    /// `y + 1`.
    South,
    /// `x - 1, y + 1`.
    SouthWest,
    /// `x - 1`.
    West,
    /// `x - 1, y - 1`.
    NorthWest,
}

impl Direction {
    /// All eight directions, clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// The unit `(dx, dy)` offset for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Map the signs of an axis delta onto a direction.
    const fn from_signs(x: Ordering, y: Ordering) -> Option<Self> {
        match (x, y) {
            (Ordering::Equal, Ordering::Less) => Some(Self::North),
            (Ordering::Greater, Ordering::Less) => Some(Self::NorthEast),
            (Ordering::Greater, Ordering::Equal) => Some(Self::East),
            (Ordering::Greater, Ordering::Greater) => Some(Self::SouthEast),
            (Ordering::Equal, Ordering::Greater) => Some(Self::South),
            (Ordering::Less, Ordering::Greater) => Some(Self::SouthWest),
            (Ordering::Less, Ordering::Equal) => Some(Self::West),
            (Ordering::Less, Ordering::Less) => Some(Self::NorthWest),
            (Ordering::Equal, Ordering::Equal) => None,
        }
    }
}
