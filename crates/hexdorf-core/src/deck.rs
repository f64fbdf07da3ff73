//! Deck loading and storage.
//!
//! This module contains:
//! - `DeckDefinition`, the parsed YAML tile document
//! - `TaskSizePool`, the terrain → size multiset task tiles draw from
//! - `Deck`, the frozen tile arena a game hands out `TileId`s into
//!
//! A tile document looks like:
//!
//! ```yaml
//! tiles:
//!   - edges: 'F__F__'
//!   - edges: 'FF____'
//!     task: 'F'
//! tasks:
//!   - F: 5
//!   - F: 3
//! ```

use crate::random::GameRng;
use crate::tile::{Terrain, Tile, TileError, TileId};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a tile document
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tile document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("tile #{index}: {source}")]
    Tile {
        index: usize,
        #[source]
        source: TileError,
    },

    #[error("task entry #{index}: {source}")]
    TaskTerrain {
        index: usize,
        #[source]
        source: TileError,
    },

    #[error("task entry #{index}: size must be positive")]
    ZeroTaskSize { index: usize },
}

#[derive(Debug, Deserialize)]
struct DeckFile {
    tiles: Vec<TileEntry>,
    #[serde(default)]
    tasks: Vec<BTreeMap<String, u32>>,
}

#[derive(Debug, Deserialize)]
struct TileEntry {
    edges: String,
    #[serde(default)]
    task: Option<String>,
}

/// Sizes available to task tiles, per terrain.
///
/// Duplicates are meaningful: each entry is one task instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSizePool {
    sizes: HashMap<Terrain, Vec<u32>>,
}

impl TaskSizePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more task of `terrain` with the given size
    pub fn add(&mut self, terrain: Terrain, size: u32) {
        self.sizes.entry(terrain).or_default().push(size);
    }

    /// Sizes still available for `terrain`
    pub fn remaining(&self, terrain: Terrain) -> &[u32] {
        self.sizes.get(&terrain).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of sizes left across all terrains
    pub fn len(&self) -> usize {
        self.sizes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draw a size for `terrain` uniformly at random, without replacement
    pub fn draw(&mut self, terrain: Terrain, rng: &mut GameRng) -> Option<u32> {
        let sizes = self.sizes.get_mut(&terrain)?;
        if sizes.is_empty() {
            return None;
        }
        let index = rng.uniform(sizes.len());
        Some(sizes.swap_remove(index))
    }
}

impl FromIterator<(Terrain, u32)> for TaskSizePool {
    fn from_iter<I: IntoIterator<Item = (Terrain, u32)>>(iter: I) -> Self {
        let mut pool = Self::new();
        for (terrain, size) in iter {
            pool.add(terrain, size);
        }
        pool
    }
}

/// A parsed tile document, before it is frozen into a game
#[derive(Debug, Clone, Default)]
pub struct DeckDefinition {
    pub lands: Vec<Tile>,
    pub tasks: Vec<Tile>,
    pub task_sizes: TaskSizePool,
}

impl DeckDefinition {
    /// Parse a YAML tile document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DeckError> {
        let file: DeckFile = serde_yaml::from_str(yaml)?;
        let mut definition = Self::default();

        for (index, entry) in file.tiles.iter().enumerate() {
            let tile = Tile::from_edge_str(&entry.edges, entry.task.as_deref())
                .map_err(|source| DeckError::Tile { index, source })?;
            if tile.is_task() {
                definition.tasks.push(tile);
            } else {
                definition.lands.push(tile);
            }
        }

        for (index, entry) in file.tasks.iter().enumerate() {
            for (key, &size) in entry {
                let terrain = parse_task_terrain(key)
                    .map_err(|source| DeckError::TaskTerrain { index, source })?;
                if size == 0 {
                    return Err(DeckError::ZeroTaskSize { index });
                }
                definition.task_sizes.add(terrain, size);
            }
        }

        debug!(
            lands = definition.lands.len(),
            tasks = definition.tasks.len(),
            task_sizes = definition.task_sizes.len(),
            "Loaded tile document"
        );
        Ok(definition)
    }

    /// Read and parse a YAML tile document from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Number of tiles of both kinds
    pub fn tile_count(&self) -> usize {
        self.lands.len() + self.tasks.len()
    }
}

fn parse_task_terrain(key: &str) -> Result<Terrain, TileError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Terrain::from_char(c),
        _ => Err(TileError::InvalidTask(key.to_string())),
    }
}

/// Tile storage for one game.
///
/// Frozen at construction: the slices never grow or move, so every `TileId`
/// handed out stays valid for the game's lifetime.
#[derive(Debug, Clone)]
pub struct Deck {
    lands: Box<[Tile]>,
    tasks: Box<[Tile]>,
}

impl Deck {
    pub fn new(lands: Vec<Tile>, tasks: Vec<Tile>) -> Self {
        Self {
            lands: lands.into_boxed_slice(),
            tasks: tasks.into_boxed_slice(),
        }
    }

    /// Look up a tile by its handle
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        match id {
            TileId::Land(index) => self.lands.get(index),
            TileId::Task(index) => self.tasks.get(index),
        }
    }

    pub fn lands(&self) -> &[Tile] {
        &self.lands
    }

    pub fn tasks(&self) -> &[Tile] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.lands.len() + self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
