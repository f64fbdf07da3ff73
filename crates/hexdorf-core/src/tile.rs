//! Terrain types and the immutable tile record.
//!
//! This module contains:
//! - The six edge terrains and their one-character notation
//! - The edge-matching law between neighboring tiles
//! - `Tile`, a six-edge record optionally carrying a task terrain
//! - `TileId`, the stable handle of a tile inside a deck

use crate::hex::{Direction, SIDES};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Terrain found along a tile edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Terrain {
    Grass,
    Plains,
    Forest,
    Town,
    /// Only connects to other rail
    Rail,
    /// Only connects to other river
    River,
}

impl Terrain {
    /// All terrain types
    pub const ALL: [Terrain; 6] = [
        Terrain::Grass,
        Terrain::Plains,
        Terrain::Forest,
        Terrain::Town,
        Terrain::Rail,
        Terrain::River,
    ];

    /// Parse the one-character notation used in deck files
    pub fn from_char(c: char) -> Result<Self, TileError> {
        match c {
            '_' => Ok(Terrain::Grass),
            'P' => Ok(Terrain::Plains),
            'F' => Ok(Terrain::Forest),
            'T' => Ok(Terrain::Town),
            'R' => Ok(Terrain::Rail),
            'W' => Ok(Terrain::River),
            other => Err(TileError::UnknownTerrain(other)),
        }
    }

    /// One-character notation of this terrain
    pub fn to_char(self) -> char {
        match self {
            Terrain::Grass => '_',
            Terrain::Plains => 'P',
            Terrain::Forest => 'F',
            Terrain::Town => 'T',
            Terrain::Rail => 'R',
            Terrain::River => 'W',
        }
    }

    /// Whether an edge of this terrain may touch an edge of `other`
    pub fn is_compatible_with(self, other: Terrain) -> bool {
        are_terrains_compatible(self, other)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Terrain::Grass => "grass",
            Terrain::Plains => "plains",
            Terrain::Forest => "forest",
            Terrain::Town => "town",
            Terrain::Rail => "rail",
            Terrain::River => "river",
        };
        f.write_str(name)
    }
}

/// The edge-matching law enforced at every shared border.
///
/// Rail and river only meet themselves; everything else meets anything else.
pub fn are_terrains_compatible(t1: Terrain, t2: Terrain) -> bool {
    match (t1, t2) {
        (Terrain::Rail, other) | (other, Terrain::Rail) => other == Terrain::Rail,
        (Terrain::River, other) | (other, Terrain::River) => other == Terrain::River,
        _ => true,
    }
}

/// Errors raised while reading tile notation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("unexpected terrain: {0:?}")]
    UnknownTerrain(char),

    #[error("expected {expected} edge chars, but got: {edges:?}")]
    EdgeCount { expected: usize, edges: String },

    #[error("unknown task: {0:?}")]
    InvalidTask(String),
}

/// Stable handle of a tile inside its deck.
///
/// Tiles are identified by where they live, not by their edges: two tiles with
/// identical edges are still different tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileId {
    /// Index into the land tiles
    Land(usize),
    /// Index into the task tiles
    Task(usize),
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileId::Land(index) => write!(f, "land #{}", index),
            TileId::Task(index) => write!(f, "task #{}", index),
        }
    }
}

/// A hex tile: six edge terrains in unrotated orientation, plus an optional
/// task terrain that turns it into a task tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    edges: [Terrain; 6],
    task: Option<Terrain>,
}

impl Tile {
    /// Create a land tile
    pub const fn land(edges: [Terrain; 6]) -> Self {
        Self { edges, task: None }
    }

    /// Create a task tile asking for a region of `task` terrain
    pub const fn with_task_terrain(edges: [Terrain; 6], task: Terrain) -> Self {
        Self {
            edges,
            task: Some(task),
        }
    }

    /// Turn this tile into a task tile (fixture helper)
    pub fn with_task(mut self, task: Terrain) -> Self {
        self.task = Some(task);
        self
    }

    /// Parse edges (one char per direction) and an optional task terrain
    pub fn from_edge_str(edges: &str, task: Option<&str>) -> Result<Self, TileError> {
        let edges = parse_edges(edges)?;
        match task {
            None => Ok(Self::land(edges)),
            Some(task) => {
                let mut chars = task.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::with_task_terrain(edges, Terrain::from_char(c)?)),
                    _ => Err(TileError::InvalidTask(task.to_string())),
                }
            }
        }
    }

    /// Terrain of the unrotated edge in `direction`
    pub fn edge_at(&self, direction: Direction) -> Terrain {
        self.edges[direction.index()]
    }

    /// All six unrotated edges
    pub fn edges(&self) -> &[Terrain; 6] {
        &self.edges
    }

    pub fn is_land(&self) -> bool {
        self.task.is_none()
    }

    pub fn is_task(&self) -> bool {
        self.task.is_some()
    }

    /// The terrain this task tile asks for, `None` for land tiles
    pub fn task(&self) -> Option<Terrain> {
        self.task
    }
}

fn parse_edges(edge_chars: &str) -> Result<[Terrain; 6], TileError> {
    let count = edge_chars.chars().count();
    if count != SIDES as usize {
        return Err(TileError::EdgeCount {
            expected: SIDES as usize,
            edges: edge_chars.to_string(),
        });
    }
    let mut edges = [Terrain::Grass; 6];
    for (edge, c) in edges.iter_mut().zip(edge_chars.chars()) {
        *edge = Terrain::from_char(c)?;
    }
    Ok(edges)
}

impl FromStr for Tile {
    type Err = TileError;

    /// Parse a land tile from its edge string, e.g. `"R_RW_W"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_edge_str(s, None)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for terrain in self.edges {
            write!(f, "{}", terrain.to_char())?;
        }
        if let Some(task) = self.task {
            write!(f, "[{}]", task.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_terrain() -> impl Strategy<Value = Terrain> {
        proptest::sample::select(Terrain::ALL.to_vec())
    }

    #[test]
    fn test_read_simple_tile() {
        let tile: Tile = "R_RW_W".parse().unwrap();
        assert_eq!(tile.edge_at(Direction::NorthWest), Terrain::Rail);
        assert_eq!(tile.edge_at(Direction::North), Terrain::Grass);
        assert_eq!(tile.edge_at(Direction::SouthEast), Terrain::River);
        assert!(tile.is_land());
        assert!(!tile.is_task());
    }

    #[test]
    fn test_read_task_tile() {
        let tile = Tile::from_edge_str("FFF___", Some("F")).unwrap();
        assert!(tile.is_task());
        assert_eq!(tile.task(), Some(Terrain::Forest));
    }

    #[test]
    fn test_wrong_edge_count() {
        assert!(matches!(
            Tile::from_str("F__F_"),
            Err(TileError::EdgeCount { expected: 6, .. })
        ));
        assert!(matches!(
            Tile::from_str("F__F___"),
            Err(TileError::EdgeCount { .. })
        ));
    }

    #[test]
    fn test_unknown_terrain_char() {
        assert_eq!(Tile::from_str("F__X__"), Err(TileError::UnknownTerrain('X')));
    }

    #[test]
    fn test_invalid_task() {
        assert_eq!(
            Tile::from_edge_str("______", Some("FF")),
            Err(TileError::InvalidTask("FF".to_string()))
        );
        assert_eq!(
            Tile::from_edge_str("______", Some("")),
            Err(TileError::InvalidTask(String::new()))
        );
        assert_eq!(
            Tile::from_edge_str("______", Some("?")),
            Err(TileError::UnknownTerrain('?'))
        );
    }

    #[test]
    fn test_char_notation_round_trip() {
        for terrain in Terrain::ALL {
            assert_eq!(Terrain::from_char(terrain.to_char()), Ok(terrain));
        }
    }

    #[test]
    fn test_with_task_marks_tile() {
        let tile: Tile = "T_T_T_".parse().unwrap();
        let task = tile.with_task(Terrain::Town);
        assert!(task.is_task());
        assert_eq!(task.edges(), tile.edges());
        assert_eq!(task.to_string(), "T_T_T_[T]");
    }

    #[test]
    fn test_rail_and_river_rules() {
        assert!(are_terrains_compatible(Terrain::Rail, Terrain::Rail));
        assert!(are_terrains_compatible(Terrain::River, Terrain::River));
        assert!(!are_terrains_compatible(Terrain::Rail, Terrain::River));
        assert!(!are_terrains_compatible(Terrain::Rail, Terrain::Grass));
        assert!(!are_terrains_compatible(Terrain::Plains, Terrain::River));
        assert!(are_terrains_compatible(Terrain::Forest, Terrain::Town));
        assert!(are_terrains_compatible(Terrain::Grass, Terrain::Plains));
    }

    proptest! {
        #[test]
        fn compatibility_is_symmetric(a in any_terrain(), b in any_terrain()) {
            prop_assert_eq!(are_terrains_compatible(a, b), are_terrains_compatible(b, a));
        }

        #[test]
        fn compatibility_follows_rail_and_river_law(a in any_terrain(), b in any_terrain()) {
            let special = [Terrain::Rail, Terrain::River];
            let expected = if special.contains(&a) || special.contains(&b) {
                a == b
            } else {
                true
            };
            prop_assert_eq!(a.is_compatible_with(b), expected);
        }
    }
}
