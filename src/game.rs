use rand::{seq::SliceRandom, thread_rng, Rng};

use crate::board::{Board, GOAL};

/// A freshly scrambled board, solvable by construction.
pub fn shuffle() -> Board {
    shuffle_with(&mut thread_rng())
}

/// Scramble by walking 50 to 100 random legal moves from the goal. Every
/// step is a legal transition, so solvability is preserved no matter how the
/// walk meanders, including steps that undo the previous one.
pub fn shuffle_with<R: Rng>(rng: &mut R) -> Board {
    let mut board = GOAL;
    let steps = rng.gen_range(50..=100);
    for _ in 0..steps {
        if let Some(&next) = board.legal_moves().choose(rng) {
            board = next;
        }
    }
    board
}

/// A live puzzle: the current board plus a move counter. This is the mutable
/// per-session state the surrounding service creates, shuffles, and discards;
/// the search algorithms only ever see the board it hands them.
pub struct Game {
    board: Board,
    moves: u32,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: GOAL,
            moves: 0,
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_goal()
    }

    pub fn shuffle(&mut self) {
        self.board = shuffle();
        self.moves = 0;
    }

    pub fn reset(&mut self) {
        self.board = GOAL;
        self.moves = 0;
    }

    /// Slide the tile at `position` into the blank. Returns whether the move
    /// was legal; illegal moves (out of range, not grid-adjacent to the
    /// blank) leave the board and counter untouched.
    pub fn move_tile(&mut self, position: usize) -> bool {
        if position >= 9 {
            return false;
        }
        let blank = self.board.blank_position();
        let row_gap = (position / 3).abs_diff(blank / 3);
        let col_gap = (position % 3).abs_diff(blank % 3);
        if row_gap + col_gap != 1 {
            return false;
        }

        self.board = self.board.swap_blank(blank, position);
        self.moves += 1;
        true
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
