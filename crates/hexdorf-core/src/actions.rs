//! Moves a player can make and the events they produce.

use crate::game::Task;
use crate::hex::HexCoord;
use crate::tile::TileId;
use serde::{Deserialize, Serialize};

/// A placement of the current tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The tile being placed
    pub tile: TileId,
    /// Target cell
    pub position: HexCoord,
    /// Clockwise 60° steps (0..6)
    pub rotation: u8,
    /// Size drawn for a task tile, `None` for land tiles
    pub task_size: Option<u32>,
}

impl Move {
    pub fn new(tile: TileId, position: HexCoord, rotation: u8, task_size: Option<u32>) -> Self {
        Self {
            tile,
            position,
            rotation,
            task_size,
        }
    }
}

/// Events that occur as a result of a placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tile was committed to the board
    TilePlaced {
        tile: TileId,
        position: HexCoord,
        rotation: u8,
    },

    /// A task tile opened a new task
    TaskStarted { task: Task },

    /// A task's region reached its target size
    TaskCompleted { task: Task },

    /// A task can no longer be completed and was dropped
    TaskFailed { task: Task, region_size: usize },
}
