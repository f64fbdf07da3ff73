//! Hexdorf - a hex tile-placement puzzle engine
//!
//! This crate provides the core game logic for Hexdorf, including:
//! - Hex coordinate system for the game board
//! - Tiles with six terrain edges and the edge-matching law
//! - Board representation and adjacency queries
//! - Terrain region search for tasks
//! - Game state with placement legality and task tracking
//!
//! # Modules
//!
//! - [`hex`]: Offset coordinates and directions
//! - [`tile`]: Terrains, tiles and tile handles
//! - [`board`]: Placed tiles and neighbor queries
//! - [`region`]: Flood fill over one terrain
//! - [`deck`]: Tile document loading and the deck arena
//! - [`random`]: Seedable random source
//! - [`game`]: Game state, legality and move enumeration
//! - [`actions`]: Moves and the events they produce
//! - [`bot`]: Random move chooser

pub mod actions;
pub mod board;
pub mod bot;
pub mod deck;
pub mod game;
pub mod hex;
pub mod random;
pub mod region;
pub mod tile;

// Re-export commonly used types
pub use actions::{GameEvent, Move};
pub use board::{Board, BoardError, PlacedTile, TileLookup};
pub use bot::{Bot, PlayOutSummary};
pub use deck::{Deck, DeckDefinition, DeckError, TaskSizePool};
pub use game::{Game, GameError, Task, TaskStatus, MAX_CONCURRENT_TASKS, UNUSED_LANDS};
pub use hex::{Direction, HexCoord, SIDES};
pub use random::GameRng;
pub use region::{find_region, Hypothetical, Region};
pub use tile::{are_terrains_compatible, Terrain, Tile, TileError, TileId};
