//! Connected-region search over placed tiles.
//!
//! A region is everything reachable from an anchor cell by walking out of
//! edges of one terrain. The search runs against any `TileLookup`, so legality
//! checks can evaluate a placement without committing it.

use crate::board::{PlacedTile, TileLookup};
use crate::hex::{Direction, HexCoord};
use crate::tile::Terrain;
use std::collections::{HashSet, VecDeque};

/// Outcome of a region search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Number of distinct tiles in the region
    pub size: usize,
    /// True if every matching edge leads to a placed tile
    pub closed: bool,
}

/// A board with one extra tile that has not actually been placed
pub struct Hypothetical<'a, L: TileLookup + ?Sized> {
    base: &'a L,
    extra: PlacedTile,
}

impl<'a, L: TileLookup + ?Sized> Hypothetical<'a, L> {
    pub fn new(base: &'a L, extra: PlacedTile) -> Self {
        Self { base, extra }
    }
}

impl<L: TileLookup + ?Sized> TileLookup for Hypothetical<'_, L> {
    fn tile_at_cell(&self, cell: HexCoord) -> Option<&PlacedTile> {
        if cell == self.extra.cell {
            Some(&self.extra)
        } else {
            self.base.tile_at_cell(cell)
        }
    }
}

/// Breadth-first flood fill of `terrain` starting at `anchor`.
///
/// An empty anchor yields an empty, open region.
pub fn find_region<L: TileLookup + ?Sized>(lookup: &L, terrain: Terrain, anchor: HexCoord) -> Region {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut closed = true;

    if lookup.tile_at_cell(anchor).is_none() {
        return Region {
            size: 0,
            closed: false,
        };
    }
    visited.insert(anchor);
    queue.push_back(anchor);

    while let Some(cell) = queue.pop_front() {
        let Some(placed) = lookup.tile_at_cell(cell) else {
            continue;
        };
        for direction in Direction::ALL {
            if placed.edge_towards(direction) != terrain {
                continue;
            }
            let next = cell.neighbor(direction);
            if lookup.tile_at_cell(next).is_none() {
                closed = false;
            } else if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    Region {
        size: visited.len(),
        closed,
    }
}
