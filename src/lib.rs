pub mod board;
pub mod difficulty;
pub mod puzzle;
pub mod snapshot;
pub mod solver;

pub use board::{Board, Cell, Solution};
pub use difficulty::{clues_for_difficulty, difficulty_label, DifficultyProfile};
pub use puzzle::{Puzzle, PuzzleGenerator};
pub use snapshot::{GameSnapshot, SnapshotError};
