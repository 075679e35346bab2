//! Search core for the 3x3 sliding-tile puzzle.
//!
//! A [`Board`] is an immutable permutation of the tiles 0..=8 (0 is the
//! blank). [`solve`] runs one of four strategies against it and returns the
//! solution path plus the number of nodes expanded, or reports budget
//! exhaustion; [`shuffle`] produces a solvable scramble; [`Game`] tracks a
//! live board with a move counter for interactive play.

pub mod board;
pub mod game;
pub mod solver;

pub use board::{Board, BoardError, GOAL};
pub use game::{shuffle, shuffle_with, Game};
pub use solver::{solve, Heuristic, SearchResult, Strategy, UnknownStrategy};
