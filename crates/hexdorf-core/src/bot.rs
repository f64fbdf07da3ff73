//! Random move chooser for playing a deck out.
//!
//! Picks uniformly among the legal moves of each turn. There is no look-ahead:
//! this drives a game to its end, it does not try to win it.

use crate::actions::{GameEvent, Move};
use crate::game::{Game, GameError, Task};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What happened during a play-out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutSummary {
    /// Moves applied
    pub moves: Vec<Move>,
    /// Tasks that reached their target
    pub completed_tasks: Vec<Task>,
    /// Tasks dropped because they could no longer succeed
    pub failed_tasks: Vec<Task>,
    /// Tiles drawn for which no legal placement existed
    pub stuck_turns: usize,
}

/// A player that picks random legal moves
pub struct Bot {
    rng: StdRng,
}

impl Bot {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose one of the given moves
    pub fn choose_move(&mut self, moves: &[Move]) -> Option<Move> {
        moves.choose(&mut self.rng).copied()
    }

    /// Play `game` until no tile is left to draw.
    ///
    /// A drawn tile with no legal placement is discarded and play continues
    /// with the next tile.
    pub fn play_out(&mut self, game: &mut Game) -> Result<PlayOutSummary, GameError> {
        let mut summary = PlayOutSummary::default();

        while game.has_tiles_to_play() {
            let moves = game.next_moves()?;
            let Some(mv) = self.choose_move(&moves) else {
                summary.stuck_turns += 1;
                continue;
            };

            for event in game.make_move(mv)? {
                match event {
                    GameEvent::TaskCompleted { task } => summary.completed_tasks.push(task),
                    GameEvent::TaskFailed { task, .. } => summary.failed_tasks.push(task),
                    GameEvent::TilePlaced { .. } | GameEvent::TaskStarted { .. } => {}
                }
            }
            summary.moves.push(mv);
        }

        debug!(
            moves = summary.moves.len(),
            completed = summary.completed_tasks.len(),
            failed = summary.failed_tasks.len(),
            stuck = summary.stuck_turns,
            "Play-out finished"
        );
        Ok(summary)
    }
}

impl Default for Bot {
    fn default() -> Self {
        Self::new()
    }
}
