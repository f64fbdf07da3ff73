//! Core game state.
//!
//! This module contains the `Game` struct: deck cursors, the board, running
//! tasks, the task-size pool, placement legality and move enumeration.

use crate::actions::{GameEvent, Move};
use crate::board::{Board, BoardError, PlacedTile, TileLookup};
use crate::deck::{Deck, DeckDefinition, TaskSizePool};
use crate::hex::{HexCoord, SIDES};
use crate::random::GameRng;
use crate::region::{find_region, Hypothetical, Region};
use crate::tile::{are_terrains_compatible, Terrain, Tile, TileId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::iter;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Maximum number of tasks in progress at once
pub const MAX_CONCURRENT_TASKS: usize = 3;

/// Land tiles held back at the end of the deck and never offered
pub const UNUSED_LANDS: usize = 3;

/// Errors that can occur when querying or changing the game
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("no such tile: {0}")]
    UnknownTile(TileId),

    #[error("{0} has already been placed")]
    TileAlreadyPlaced(TileId),

    #[error("rotation {0} is out of range")]
    InvalidRotation(u8),

    #[error("cell {0} does not touch any placed tile")]
    NotAdjacentToBoard(HexCoord),

    #[error("{0} is a task tile and needs a task size")]
    MissingTaskSize(TileId),

    #[error("{0} is a land tile and cannot take a task size")]
    UnexpectedTaskSize(TileId),

    #[error("no {0} task sizes left")]
    TaskPoolExhausted(Terrain),

    #[error("{tile} cannot be placed at {cell} with rotation {rotation}")]
    IllegalPlacement {
        tile: TileId,
        cell: HexCoord,
        rotation: u8,
    },
}

/// An objective: grow the `terrain` region containing `anchor` to exactly
/// `size` tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Cell of the task tile
    pub anchor: HexCoord,
    /// Target region size
    pub size: u32,
    /// Terrain the region is made of
    pub terrain: Terrain,
}

/// Where a task stands after a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Still growing toward its target
    Open,
    /// Region reached exactly the target size
    Finished,
    /// Region is closed short of the target, or overshot it
    Impossible,
}

impl Task {
    pub fn new(anchor: HexCoord, size: u32, terrain: Terrain) -> Self {
        Self {
            anchor,
            size,
            terrain,
        }
    }

    /// Classify a region found for this task.
    ///
    /// Hitting the exact size wins even if the region is still open.
    pub fn status(&self, region: Region) -> TaskStatus {
        let target = self.size as usize;
        if region.size == target {
            TaskStatus::Finished
        } else if region.closed || region.size > target {
            TaskStatus::Impossible
        } else {
            TaskStatus::Open
        }
    }

    /// Run the region search for this task and classify the result
    pub fn evaluate<L: TileLookup + ?Sized>(&self, lookup: &L) -> (Region, TaskStatus) {
        let region = find_region(lookup, self.terrain, self.anchor);
        (region, self.status(region))
    }
}

/// The complete game state
#[derive(Debug, Clone)]
pub struct Game {
    deck: Deck,
    next_land: usize,
    next_task: usize,
    active_tasks: Vec<Task>,
    finished_tasks: Vec<Task>,
    task_sizes: TaskSizePool,
    board: Board,
    placed: HashSet<TileId>,
    rng: GameRng,
}

impl Game {
    /// Create a game from land tiles, task tiles and the task-size pool.
    ///
    /// With `shuffle` both tile sequences are shuffled with `rng` before the
    /// deck is frozen.
    pub fn from_deck(
        mut lands: Vec<Tile>,
        mut tasks: Vec<Tile>,
        task_sizes: TaskSizePool,
        shuffle: bool,
        mut rng: GameRng,
    ) -> Self {
        if shuffle {
            rng.shuffle(&mut lands);
            rng.shuffle(&mut tasks);
        }
        debug!(
            lands = lands.len(),
            tasks = tasks.len(),
            shuffle,
            "Creating game"
        );
        Self {
            deck: Deck::new(lands, tasks),
            next_land: 0,
            next_task: 0,
            active_tasks: Vec::new(),
            finished_tasks: Vec::new(),
            task_sizes,
            board: Board::new(),
            placed: HashSet::new(),
            rng,
        }
    }

    /// Create a game from a parsed tile document
    pub fn from_definition(definition: DeckDefinition, shuffle: bool, rng: GameRng) -> Self {
        Self::from_deck(
            definition.lands,
            definition.tasks,
            definition.task_sizes,
            shuffle,
            rng,
        )
    }

    pub fn lands(&self) -> &[Tile] {
        self.deck.lands()
    }

    pub fn tasks(&self) -> &[Tile] {
        self.deck.tasks()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Tasks still in progress
    pub fn active_tasks(&self) -> &[Task] {
        &self.active_tasks
    }

    /// Tasks whose region reached its target
    pub fn finished_tasks(&self) -> &[Task] {
        &self.finished_tasks
    }

    pub fn task_sizes(&self) -> &TaskSizePool {
        &self.task_sizes
    }

    /// Land tiles not yet drawn, including the reserve
    pub fn remaining_lands(&self) -> usize {
        self.deck.lands().len() - self.next_land
    }

    /// Task tiles not yet drawn
    pub fn remaining_task_tiles(&self) -> usize {
        self.deck.tasks().len() - self.next_task
    }

    /// Restart the game's random sequence from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Look up a deck tile
    pub fn tile(&self, id: TileId) -> Result<&Tile, GameError> {
        self.deck.get(id).ok_or(GameError::UnknownTile(id))
    }

    // ==================== Legality ====================

    /// Whether `tile` may go on `cell` with `rotation`.
    ///
    /// Without `task_size` only edge compatibility is checked. With a size the
    /// tile must be a task tile, and the placement is legal only if neither the
    /// new task nor any running task becomes impossible. The board is never
    /// modified.
    pub fn can_place_tile_at(
        &self,
        id: TileId,
        cell: HexCoord,
        rotation: u8,
        task_size: Option<u32>,
    ) -> Result<bool, GameError> {
        let tile = *self.tile(id)?;
        if rotation >= SIDES {
            return Err(GameError::InvalidRotation(rotation));
        }
        if self.placed.contains(&id) {
            return Err(GameError::TileAlreadyPlaced(id));
        }
        if self.board.has_tile_at(cell) {
            return Err(BoardError::OccupiedCell(cell).into());
        }
        if !self.board.is_empty() && !self.board.is_adjacent_to_content(cell) {
            return Err(GameError::NotAdjacentToBoard(cell));
        }

        let new_task = match (task_size, tile.task()) {
            (None, _) => None,
            (Some(_), None) => return Err(GameError::UnexpectedTaskSize(id)),
            (Some(size), Some(terrain)) => Some(Task::new(cell, size, terrain)),
        };

        if !self.edges_match(&tile, cell, rotation)? {
            return Ok(false);
        }
        let Some(new_task) = new_task else {
            return Ok(true);
        };

        let extra = PlacedTile {
            id,
            tile,
            cell,
            rotation,
        };
        let view = Hypothetical::new(&self.board, extra);
        let all_possible = self
            .active_tasks
            .iter()
            .chain(iter::once(&new_task))
            .all(|task| task.evaluate(&view).1 != TaskStatus::Impossible);
        Ok(all_possible)
    }

    /// Check every shared border between `tile` (as placed) and its neighbors
    fn edges_match(&self, tile: &Tile, cell: HexCoord, rotation: u8) -> Result<bool, GameError> {
        for neighbor in self.board.neighbors(cell) {
            let (ours, theirs) = Board::edge_between(cell, neighbor.cell)?;
            let our_terrain = tile.edge_at(ours.to_tile_local(rotation));
            let their_terrain = neighbor.edge_towards(theirs);
            if !are_terrains_compatible(our_terrain, their_terrain) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ==================== Placement ====================

    /// Commit a placement and reconcile every running task.
    ///
    /// Task tiles need a `task_size`. Fails without changing anything if the
    /// placement is not legal.
    pub fn place_tile_at(
        &mut self,
        id: TileId,
        cell: HexCoord,
        rotation: u8,
        task_size: Option<u32>,
    ) -> Result<Vec<GameEvent>, GameError> {
        let tile = *self.tile(id)?;
        if tile.is_task() && task_size.is_none() {
            return Err(GameError::MissingTaskSize(id));
        }
        if !self.can_place_tile_at(id, cell, rotation, task_size)? {
            return Err(GameError::IllegalPlacement {
                tile: id,
                cell,
                rotation,
            });
        }

        self.board.put_at(cell, id, tile, rotation)?;
        self.placed.insert(id);
        debug!(%id, %cell, rotation, "Placed tile");

        let mut events = vec![GameEvent::TilePlaced {
            tile: id,
            position: cell,
            rotation,
        }];

        if let (Some(terrain), Some(size)) = (tile.task(), task_size) {
            let task = Task::new(cell, size, terrain);
            debug!(%terrain, size, %cell, "Started task");
            self.active_tasks.push(task);
            events.push(GameEvent::TaskStarted { task });
        }

        events.extend(self.reconcile_tasks());
        Ok(events)
    }

    /// Re-run the region search for every running task, retiring finished
    /// ones and dropping the ones that can no longer succeed.
    fn reconcile_tasks(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for task in std::mem::take(&mut self.active_tasks) {
            let (region, status) = task.evaluate(&self.board);
            match status {
                TaskStatus::Open => self.active_tasks.push(task),
                TaskStatus::Finished => {
                    debug!(terrain = %task.terrain, size = task.size, anchor = %task.anchor, "Task completed");
                    self.finished_tasks.push(task);
                    events.push(GameEvent::TaskCompleted { task });
                }
                TaskStatus::Impossible => {
                    warn!(
                        terrain = %task.terrain,
                        size = task.size,
                        anchor = %task.anchor,
                        region_size = region.size,
                        closed = region.closed,
                        "Task can no longer be completed"
                    );
                    events.push(GameEvent::TaskFailed {
                        task,
                        region_size: region.size,
                    });
                }
            }
        }
        events
    }

    // ==================== Drawing ====================

    /// Draw a size for a new `terrain` task, without replacement
    pub fn fetch_task_size(&mut self, terrain: Terrain) -> Result<u32, GameError> {
        self.task_sizes
            .draw(terrain, &mut self.rng)
            .ok_or(GameError::TaskPoolExhausted(terrain))
    }

    /// The tile `take_next_tile_to_play` would hand out, without drawing it
    pub fn peek_next_tile(&self) -> Option<TileId> {
        if self.active_tasks.len() < MAX_CONCURRENT_TASKS && self.next_task < self.deck.tasks().len() {
            Some(TileId::Task(self.next_task))
        } else if self.remaining_lands() > UNUSED_LANDS {
            Some(TileId::Land(self.next_land))
        } else {
            None
        }
    }

    /// Draw the next tile: a task tile while fewer than
    /// `MAX_CONCURRENT_TASKS` tasks run, otherwise a land tile while more than
    /// `UNUSED_LANDS` remain. `None` means the game is over.
    pub fn take_next_tile_to_play(&mut self) -> Option<TileId> {
        let next = self.peek_next_tile()?;
        match next {
            TileId::Task(_) => self.next_task += 1,
            TileId::Land(_) => self.next_land += 1,
        }
        Some(next)
    }

    /// Whether another tile can still be drawn
    pub fn has_tiles_to_play(&self) -> bool {
        self.peek_next_tile().is_some()
    }

    /// Draw the next tile and list every legal placement for it.
    ///
    /// Advances the deck, so call once per turn. An empty list when no tile is
    /// left means the game is over.
    pub fn next_moves(&mut self) -> Result<Vec<Move>, GameError> {
        let Some(id) = self.take_next_tile_to_play() else {
            debug!("No tiles left to play");
            return Ok(Vec::new());
        };
        let tile = *self.tile(id)?;
        let task_size = match tile.task() {
            Some(terrain) => Some(self.fetch_task_size(terrain)?),
            None => None,
        };

        let mut moves = Vec::new();
        for cell in self.board.places_for_next_tile() {
            for rotation in 0..SIDES {
                if self.can_place_tile_at(id, cell, rotation, task_size)? {
                    moves.push(Move::new(id, cell, rotation, task_size));
                }
            }
        }
        trace!(%id, ?task_size, moves = moves.len(), "Enumerated moves");
        Ok(moves)
    }

    /// Apply a move produced by `next_moves`
    pub fn make_move(&mut self, mv: Move) -> Result<Vec<GameEvent>, GameError> {
        self.place_tile_at(mv.tile, mv.position, mv.rotation, mv.task_size)
    }
}
