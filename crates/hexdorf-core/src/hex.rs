//! Hex coordinate system using offset "odd-q" coordinates (x, y).
//!
//! This module provides the foundational geometry for the board:
//! - `HexCoord`: identifies individual cells
//! - `Direction`: the six edges of a cell, in a fixed order
//!
//! Columns are vertical and odd columns are shoved down by half a cell, so the
//! neighbor offsets depend on the parity of `x`. Cube coordinates are derived
//! on demand for distance computations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Number of edges (and distinct rotations) of a hex tile
pub const SIDES: u8 = 6;

/// Direction of an edge relative to a cell, clockwise from the top-left edge.
///
/// The discriminant is the direction index used throughout the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Top-left edge
    NorthWest = 0,
    /// Top edge
    North = 1,
    /// Top-right edge
    NorthEast = 2,
    /// Bottom-right edge
    SouthEast = 3,
    /// Bottom edge
    South = 4,
    /// Bottom-left edge
    SouthWest = 5,
}

impl Direction {
    /// All directions in index order
    pub const ALL: [Direction; 6] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
    ];

    /// Index of this direction (0..6)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for an index, wrapping modulo 6
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % SIDES as usize]
    }

    /// The edge facing this one on the neighboring cell
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + SIDES as usize / 2)
    }

    /// Translate an absolute board direction into the unrotated edge index
    /// of a tile placed with `rotation` clockwise steps.
    pub const fn to_tile_local(self, rotation: u8) -> Self {
        let rotation = (rotation % SIDES) as usize;
        Self::from_index(self.index() + SIDES as usize - rotation)
    }
}

const EVEN_COLUMN_OFFSETS: [(i32, i32); 6] = [(-1, -1), (0, -1), (1, -1), (1, 0), (0, 1), (-1, 0)];
const ODD_COLUMN_OFFSETS: [(i32, i32); 6] = [(-1, 0), (0, -1), (1, 0), (1, 1), (0, 1), (-1, 1)];

/// Offset coordinate of a cell on the grid.
///
/// - `x` is the column, increasing to the right
/// - `y` is the row, increasing downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct HexCoord {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl HexCoord {
    /// The cell the first tile of a game is placed on
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    /// Create a new hex coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn offsets(&self) -> &'static [(i32, i32); 6] {
        if self.x.rem_euclid(2) == 0 {
            &EVEN_COLUMN_OFFSETS
        } else {
            &ODD_COLUMN_OFFSETS
        }
    }

    /// The six cells around this one, indexed by `Direction`
    pub fn potential_neighbors(&self) -> [HexCoord; 6] {
        let offsets = *self.offsets();
        offsets.map(|(dx, dy)| *self + HexCoord::new(dx, dy))
    }

    /// The cell across the given edge
    pub fn neighbor(&self, direction: Direction) -> HexCoord {
        let (dx, dy) = self.offsets()[direction.index()];
        *self + HexCoord::new(dx, dy)
    }

    /// Direction under which `other` appears among this cell's neighbors
    pub fn direction_to(&self, other: &HexCoord) -> Option<Direction> {
        self.potential_neighbors()
            .iter()
            .position(|candidate| candidate == other)
            .map(Direction::from_index)
    }

    /// Whether `other` shares an edge with this cell
    pub fn is_neighbor(&self, other: &HexCoord) -> bool {
        self.direction_to(other).is_some()
    }

    /// Cube coordinates (q, r, s) with q + r + s = 0
    pub fn to_cube(&self) -> (i32, i32, i32) {
        let q = self.x;
        let r = self.y - (self.x - (self.x & 1)) / 2;
        (q, r, -q - r)
    }

    /// Distance to another cell (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let (q1, r1, s1) = self.to_cube();
        let (q2, r2, s2) = other.to_cube();
        ((q1 - q2).abs() + (r1 - r2).abs() + (s1 - s2).abs()) as u32 / 2
    }
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_hex_neighbors_even_column() {
        let center = HexCoord::new(0, 0);
        assert_eq!(
            center.potential_neighbors(),
            [
                HexCoord::new(-1, -1),
                HexCoord::new(0, -1),
                HexCoord::new(1, -1),
                HexCoord::new(1, 0),
                HexCoord::new(0, 1),
                HexCoord::new(-1, 0),
            ]
        );
    }

    #[test]
    fn test_hex_neighbors_odd_column() {
        let center = HexCoord::new(1, 0);
        assert_eq!(
            center.potential_neighbors(),
            [
                HexCoord::new(0, 0),
                HexCoord::new(1, -1),
                HexCoord::new(2, 0),
                HexCoord::new(2, 1),
                HexCoord::new(1, 1),
                HexCoord::new(0, 1),
            ]
        );
    }

    #[test]
    fn test_negative_odd_column_uses_odd_offsets() {
        let cell = HexCoord::new(-1, 0);
        assert_eq!(cell.neighbor(Direction::SouthEast), HexCoord::new(0, 1));
        assert_eq!(cell.neighbor(Direction::NorthEast), HexCoord::new(0, 0));
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::NorthWest.opposite(), Direction::SouthEast);
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::SouthWest.opposite(), Direction::NorthEast);
    }

    #[test]
    fn test_tile_local_direction() {
        assert_eq!(Direction::NorthEast.to_tile_local(0), Direction::NorthEast);
        assert_eq!(Direction::NorthEast.to_tile_local(2), Direction::NorthWest);
        assert_eq!(Direction::NorthWest.to_tile_local(1), Direction::SouthWest);
        assert_eq!(Direction::SouthWest.to_tile_local(5), Direction::NorthWest);
    }

    #[test]
    fn test_hex_distance() {
        let a = HexCoord::new(0, 0);
        assert_eq!(a.distance_to(&HexCoord::new(2, 0)), 2);
        assert_eq!(a.distance_to(&HexCoord::new(0, -3)), 3);
        assert_eq!(a.distance_to(&a), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(HexCoord::new(-2, 5).to_string(), "(-2, 5)");
    }

    proptest! {
        #[test]
        fn neighbors_are_distinct_and_adjacent(x in -50i32..50, y in -50i32..50) {
            let cell = HexCoord::new(x, y);
            let neighbors = cell.potential_neighbors();
            let unique: HashSet<_> = neighbors.iter().collect();
            prop_assert_eq!(unique.len(), 6);
            for neighbor in &neighbors {
                prop_assert_eq!(cell.distance_to(neighbor), 1);
            }
        }

        #[test]
        fn neighbor_relation_is_reciprocal(x in -50i32..50, y in -50i32..50, i in 0usize..6) {
            let cell = HexCoord::new(x, y);
            let direction = Direction::from_index(i);
            let neighbor = cell.neighbor(direction);
            prop_assert_eq!(neighbor.direction_to(&cell), Some(direction.opposite()));
        }
    }
}
