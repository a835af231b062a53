use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::board::{Board, Solution};
use crate::difficulty;
use crate::puzzle::Puzzle;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a storage collaborator needs to put an in-progress game back
/// together: the cells as played so far, the solution, difficulty
/// metadata, and opaque play-session fields the engine itself never
/// interprets (elapsed time, notes mode, lives).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub solution: Solution,
    pub difficulty: u8,
    pub difficulty_label: String,
    pub clue_count: usize,
    pub elapsed_secs: u32,
    pub notes_mode: bool,
    pub lives: u8,
    pub saved_at_utc: String,
}

impl GameSnapshot {
    pub fn capture(puzzle: &Puzzle, elapsed_secs: u32, notes_mode: bool, lives: u8) -> Self {
        let ts_fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        let saved_at_utc = OffsetDateTime::now_utc()
            .format(&ts_fmt)
            .unwrap_or_else(|_| "unknown".into());
        Self {
            board: puzzle.board.clone(),
            solution: puzzle.solution,
            difficulty: puzzle.difficulty,
            difficulty_label: difficulty::difficulty_label(puzzle.difficulty).to_string(),
            clue_count: puzzle.clue_count,
            elapsed_secs,
            notes_mode,
            lives,
            saved_at_utc,
        }
    }

    pub fn restore(self) -> Puzzle {
        Puzzle {
            board: self.board,
            solution: self.solution,
            difficulty: self.difficulty,
            clue_count: self.clue_count,
        }
    }
}

/// Missing or corrupt files read as "no saved game".
pub fn load<P: AsRef<Path>>(path: P) -> Option<GameSnapshot> {
    let text = fs::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

pub fn save<P: AsRef<Path>>(path: P, snapshot: &GameSnapshot) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}
