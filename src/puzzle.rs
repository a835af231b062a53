use rand::{seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Solution};
use crate::difficulty::{self, DifficultyProfile, MAX_CLUES, MIN_CLUES};

const MAX_ATTEMPTS: usize = 20;
const CLUE_VARIANCE: usize = 2;
const GOOD_ENOUGH_SCORE: u32 = 10;

/// A playable board plus the completed grid it was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub board: Board,
    pub solution: Solution,
    /// Clamped 0-100 level the calibration actually targeted.
    pub difficulty: u8,
    /// Number of fixed cells in `board`.
    pub clue_count: usize,
}

impl Puzzle {
    /// Whether `value` is what the solution holds at (row, col).
    pub fn check_value(&self, row: usize, col: usize, value: u8) -> bool {
        self.solution[row][col] == value
    }

    /// Fill every non-fixed cell from the solution.
    pub fn auto_complete(&mut self) {
        for r in 0..9 { for c in 0..9 {
            let cell = &mut self.board.cells[r][c];
            if !cell.fixed {
                cell.value = self.solution[r][c];
                cell.correct = Some(true);
                cell.notes.clear();
            }
        }}
    }

    pub fn is_solved(&self) -> bool { self.board.is_solved() }
}

pub struct PuzzleGenerator {
    rng: rand::rngs::StdRng,
}

impl PuzzleGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => rand::rngs::StdRng::seed_from_u64(s),
            None => rand::rngs::StdRng::from_rng(rand::thread_rng()).unwrap(),
        };
        Self { rng }
    }

    /// Fill a grid from scratch and search for a cut matching `level`.
    pub fn generate(&mut self, level: u8) -> Puzzle {
        let full = self.generate_full_grid();
        self.calibrate(&full, level)
    }

    /// Complete, rule-valid grid with every cell marked fixed.
    /// Always succeeds when starting from empty.
    pub fn generate_full_grid(&mut self) -> Board {
        let mut b = Board::empty();
        self.fill_grid(&mut b);
        for r in 0..9 { for c in 0..9 { b.cells[r][c].fixed = true; }}
        b
    }

    /// Randomized backtracking over the first empty cell in row-major
    /// order. The shuffled digit order is what makes boards vary from run
    /// to run; ascending order would always rebuild the same grid.
    fn fill_grid(&mut self, b: &mut Board) -> bool {
        for row in 0..9 {
            for col in 0..9 {
                if b.cells[row][col].value == 0 {
                    let mut digits: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
                    digits.shuffle(&mut self.rng);
                    for d in digits {
                        if b.is_move_valid(row, col, d) {
                            b.cells[row][col].value = d;
                            if self.fill_grid(b) { return true; }
                            b.cells[row][col].value = 0;
                        }
                    }
                    return false;
                }
            }
        }
        true
    }

    /// Cut a candidate puzzle out of a completed grid, leaving `clues`
    /// values in place. Single shuffled pass; uniqueness of the resulting
    /// puzzle is not checked. Callers keep `clues` inside [22, 45].
    pub fn puzzle_with_clues(&mut self, full: &Board, clues: usize) -> Board {
        let mut b = full.generation_copy();
        let mut positions: Vec<usize> = (0..81).collect();
        positions.shuffle(&mut self.rng);
        for &idx in positions.iter().take(81usize.saturating_sub(clues)) {
            b.cells[idx / 9][idx % 9].value = 0;
        }
        for r in 0..9 { for c in 0..9 {
            b.cells[r][c].fixed = b.cells[r][c].value != 0;
        }}
        b
    }

    /// Bounded search for the cut that best matches `level`: up to 20
    /// candidates at jittered clue counts, keeping the best score seen and
    /// stopping early once one scores well enough. Never fails; a poorly
    /// calibrated puzzle beats no puzzle.
    pub fn calibrate(&mut self, full: &Board, level: u8) -> Puzzle {
        let level = level.min(100);
        let profile = DifficultyProfile::for_level(level);
        let solution: Solution = full.to_rows();
        let mut best: Option<(Board, u32)> = None;

        for attempt in 0..MAX_ATTEMPTS {
            let lo = profile.target_clues - CLUE_VARIANCE;
            let hi = profile.target_clues + CLUE_VARIANCE;
            let clues = self.rng.gen_range(lo..=hi).clamp(MIN_CLUES, MAX_CLUES);
            let candidate = self.puzzle_with_clues(full, clues);
            let score = difficulty::evaluate_puzzle(&candidate, &profile);
            log::debug!("attempt {attempt}: {clues} clues scored {score} for level {level}");
            if best.as_ref().map_or(true, |(_, s)| score < *s) {
                best = Some((candidate, score));
            }
            if score <= GOOD_ENOUGH_SCORE { break; }
        }

        let board = match best {
            Some((b, _)) => b,
            // Unreachable while the attempt loop runs at least once, but
            // the caller is still owed a puzzle.
            None => self.puzzle_with_clues(full, profile.target_clues),
        };
        let clue_count = board.fixed_count();
        Puzzle { board, solution, difficulty: level, clue_count }
    }
}
