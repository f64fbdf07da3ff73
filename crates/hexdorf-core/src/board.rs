//! Board representation: placed tiles keyed by cell, plus adjacency queries.
//!
//! This module contains:
//! - `PlacedTile`, a tile committed to a cell with a rotation
//! - `Board`, the map of placed tiles
//! - `TileLookup`, the read-only view the region search runs against

use crate::hex::{Direction, HexCoord};
use crate::tile::{Terrain, Tile, TileId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors from board queries and mutations
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("cell {0} already holds a tile")]
    OccupiedCell(HexCoord),

    #[error("cell {0} holds no tile")]
    EmptyCell(HexCoord),

    #[error("cells {0} and {1} are not adjacent")]
    NotAdjacent(HexCoord, HexCoord),
}

/// A tile committed to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    /// Which deck tile this is
    pub id: TileId,
    /// The tile's edges and task marker
    pub tile: Tile,
    /// Where it was placed
    pub cell: HexCoord,
    /// Clockwise 60° steps applied when placing
    pub rotation: u8,
}

impl PlacedTile {
    /// Terrain facing the given absolute board direction
    pub fn edge_towards(&self, direction: Direction) -> Terrain {
        self.tile.edge_at(direction.to_tile_local(self.rotation))
    }
}

/// Read access to "which tile sits on this cell".
///
/// Implemented by the board itself and by hypothetical views that pretend an
/// extra tile has been placed.
pub trait TileLookup {
    fn tile_at_cell(&self, cell: HexCoord) -> Option<&PlacedTile>;
}

/// The board: every tile placed so far
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    tiles: HashMap<HexCoord, PlacedTile>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_tile_at(&self, cell: HexCoord) -> bool {
        self.tiles.contains_key(&cell)
    }

    /// The tile at `cell`, if any
    pub fn get(&self, cell: HexCoord) -> Option<&PlacedTile> {
        self.tiles.get(&cell)
    }

    /// The tile at `cell`; an empty cell is a usage error
    pub fn tile_at(&self, cell: HexCoord) -> Result<&PlacedTile, BoardError> {
        self.tiles.get(&cell).ok_or(BoardError::EmptyCell(cell))
    }

    /// Record a placement on an empty cell
    pub fn put_at(
        &mut self,
        cell: HexCoord,
        id: TileId,
        tile: Tile,
        rotation: u8,
    ) -> Result<(), BoardError> {
        if self.has_tile_at(cell) {
            return Err(BoardError::OccupiedCell(cell));
        }
        self.tiles.insert(
            cell,
            PlacedTile {
                id,
                tile,
                cell,
                rotation,
            },
        );
        Ok(())
    }

    /// Take a placed tile back off the board
    pub fn remove_at(&mut self, cell: HexCoord) -> Result<PlacedTile, BoardError> {
        self.tiles.remove(&cell).ok_or(BoardError::EmptyCell(cell))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over all placed tiles (in no particular order)
    pub fn iter(&self) -> impl Iterator<Item = &PlacedTile> {
        self.tiles.values()
    }

    /// Occupied cells around `cell`, in direction order
    pub fn neighbors(&self, cell: HexCoord) -> Vec<&PlacedTile> {
        cell.potential_neighbors()
            .iter()
            .filter_map(|neighbor| self.get(*neighbor))
            .collect()
    }

    /// Empty cells around `cell`, in direction order
    pub fn empty_neighbors(&self, cell: HexCoord) -> Vec<HexCoord> {
        cell.potential_neighbors()
            .into_iter()
            .filter(|neighbor| !self.has_tile_at(*neighbor))
            .collect()
    }

    /// The tile across the given edge of `cell`, if any
    pub fn neighbor(&self, cell: HexCoord, direction: Direction) -> Option<&PlacedTile> {
        self.get(cell.neighbor(direction))
    }

    /// Whether `cell` is empty and touches at least one placed tile
    pub fn is_adjacent_to_content(&self, cell: HexCoord) -> bool {
        !self.has_tile_at(cell)
            && cell
                .potential_neighbors()
                .iter()
                .any(|neighbor| self.has_tile_at(*neighbor))
    }

    /// Candidate cells for the next tile, sorted by (x, y).
    ///
    /// On an empty board the only candidate is the origin.
    pub fn places_for_next_tile(&self) -> Vec<HexCoord> {
        if self.is_empty() {
            return vec![HexCoord::ORIGIN];
        }
        let places: BTreeSet<HexCoord> = self
            .tiles
            .keys()
            .flat_map(|cell| self.empty_neighbors(*cell))
            .collect();
        places.into_iter().collect()
    }

    pub fn are_neighbors(a: HexCoord, b: HexCoord) -> bool {
        a.is_neighbor(&b)
    }

    /// Find which edge of each cell faces the other.
    ///
    /// Returns `(direction of b seen from a, direction of a seen from b)`.
    pub fn edge_between(a: HexCoord, b: HexCoord) -> Result<(Direction, Direction), BoardError> {
        let direction = a.direction_to(&b).ok_or(BoardError::NotAdjacent(a, b))?;
        Ok((direction, direction.opposite()))
    }
}

impl TileLookup for Board {
    fn tile_at_cell(&self, cell: HexCoord) -> Option<&PlacedTile> {
        self.get(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grass() -> Tile {
        "______".parse().unwrap()
    }

    #[test]
    fn test_add_two_first_tiles() {
        let mut board = Board::new();
        let start = HexCoord::ORIGIN;
        assert!(!board.has_tile_at(start));

        board.put_at(start, TileId::Land(0), grass(), 0).unwrap();
        assert!(board.has_tile_at(start));

        let empty = board.empty_neighbors(start);
        assert_eq!(empty.len(), 6);

        board.put_at(empty[0], TileId::Land(1), grass(), 0).unwrap();
        assert!(board.has_tile_at(empty[0]));
        assert_eq!(board.neighbors(start).len(), 1);
        assert_eq!(board.neighbors(empty[0]).len(), 1);
        assert_eq!(board.empty_neighbors(start).len(), 5);
    }

    #[test]
    fn test_put_on_occupied_cell_fails() {
        let mut board = Board::new();
        board.put_at(HexCoord::ORIGIN, TileId::Land(0), grass(), 0).unwrap();
        assert_eq!(
            board.put_at(HexCoord::ORIGIN, TileId::Land(1), grass(), 3),
            Err(BoardError::OccupiedCell(HexCoord::ORIGIN))
        );
        assert_eq!(board.tile_at(HexCoord::ORIGIN).unwrap().id, TileId::Land(0));
    }

    #[test]
    fn test_empty_cell_queries_fail() {
        let mut board = Board::new();
        let cell = HexCoord::new(3, 4);
        assert_eq!(board.tile_at(cell), Err(BoardError::EmptyCell(cell)));
        assert_eq!(board.remove_at(cell), Err(BoardError::EmptyCell(cell)));
    }

    #[test]
    fn test_remove_restores_empty_cell() {
        let mut board = Board::new();
        board.put_at(HexCoord::ORIGIN, TileId::Land(0), grass(), 2).unwrap();
        let removed = board.remove_at(HexCoord::ORIGIN).unwrap();
        assert_eq!(removed.rotation, 2);
        assert!(board.is_empty());
    }

    #[test]
    fn test_neighbor_in_direction() {
        let mut board = Board::new();
        board.put_at(HexCoord::new(1, -1), TileId::Land(0), grass(), 0).unwrap();
        assert!(board.neighbor(HexCoord::ORIGIN, Direction::NorthEast).is_some());
        assert!(board.neighbor(HexCoord::ORIGIN, Direction::North).is_none());
    }

    #[test]
    fn test_places_for_next_tile() {
        let mut board = Board::new();
        assert_eq!(board.places_for_next_tile(), vec![HexCoord::ORIGIN]);

        board.put_at(HexCoord::ORIGIN, TileId::Land(0), grass(), 0).unwrap();
        let places = board.places_for_next_tile();
        assert_eq!(places.len(), 6);
        assert!(places.windows(2).all(|pair| pair[0] < pair[1]));

        board.put_at(HexCoord::new(1, 0), TileId::Land(1), grass(), 0).unwrap();
        let places = board.places_for_next_tile();
        // Two touching cells have 8 distinct empty neighbors between them
        assert_eq!(places.len(), 8);
        assert!(places.iter().all(|cell| board.is_adjacent_to_content(*cell)));
    }

    #[test]
    fn test_edge_between_non_adjacent_fails() {
        let a = HexCoord::ORIGIN;
        let b = HexCoord::new(2, 0);
        assert!(!Board::are_neighbors(a, b));
        assert_eq!(Board::edge_between(a, b), Err(BoardError::NotAdjacent(a, b)));
    }

    #[test]
    fn test_edge_towards_applies_rotation() {
        let tile: Tile = "R_RW_W".parse().unwrap();
        let placed = PlacedTile {
            id: TileId::Land(0),
            tile,
            cell: HexCoord::ORIGIN,
            rotation: 2,
        };
        // Board direction 2 reads tile edge 0
        assert_eq!(placed.edge_towards(Direction::NorthEast), Terrain::Rail);
        assert_eq!(placed.edge_towards(Direction::NorthWest), Terrain::Grass);
        assert_eq!(placed.edge_towards(Direction::SouthWest), Terrain::River);
    }

    proptest! {
        #[test]
        fn edge_between_matches_neighbor_index(x in -40i32..40, y in -40i32..40, i in 0usize..6) {
            let a = HexCoord::new(x, y);
            let b = a.potential_neighbors()[i];
            let (d1, d2) = Board::edge_between(a, b).unwrap();
            prop_assert_eq!(d1.index(), i);
            prop_assert_eq!(d2.index(), (i + 3) % 6);
            prop_assert_eq!(Board::edge_between(b, a).unwrap(), (d2, d1));
        }
    }
}
