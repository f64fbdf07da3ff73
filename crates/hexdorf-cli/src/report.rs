//! Summary printed after loading (and possibly playing) a deck.

use hexdorf_core::{Game, PlayOutSummary, Task};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct Report {
    pub lands: usize,
    pub task_tiles: usize,
    pub placed: usize,
    pub stuck_turns: usize,
    pub completed_tasks: Vec<Task>,
    pub failed_tasks: Vec<Task>,
    pub active_tasks: Vec<Task>,
}

impl Report {
    pub fn new(game: &Game, summary: Option<PlayOutSummary>) -> Self {
        let summary = summary.unwrap_or_default();
        Self {
            lands: game.lands().len(),
            task_tiles: game.tasks().len(),
            placed: game.board().len(),
            stuck_turns: summary.stuck_turns,
            completed_tasks: summary.completed_tasks,
            failed_tasks: summary.failed_tasks,
            active_tasks: game.active_tasks().to_vec(),
        }
    }
}

fn write_tasks(f: &mut fmt::Formatter<'_>, label: &str, tasks: &[Task]) -> fmt::Result {
    writeln!(f, "{}: {}", label, tasks.len())?;
    for task in tasks {
        writeln!(f, "  {} x{} at {}", task.terrain, task.size, task.anchor)?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Placed {} tiles ({} drawn tiles had no legal spot).",
            self.placed, self.stuck_turns
        )?;
        write_tasks(f, "Completed tasks", &self.completed_tasks)?;
        write_tasks(f, "Failed tasks", &self.failed_tasks)?;
        write_tasks(f, "Unfinished tasks", &self.active_tasks)
    }
}
