use std::fmt;

use thiserror::Error;

/// The solved configuration. Fixed for the lifetime of the process.
pub const GOAL: Board = Board([1, 2, 3, 4, 5, 6, 7, 8, 0]);

const SIZE: usize = 3;
const TILES: usize = SIZE * SIZE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must contain exactly 9 tiles, got {0}")]
    WrongLength(usize),
    #[error("tile value {0} is outside 0..=8")]
    ValueOutOfRange(u8),
    #[error("tile value {0} appears more than once")]
    DuplicateValue(u8),
}

/// A 3x3 tile configuration in row-major order. The blank is represented by 0.
///
/// Always a permutation of 0..=8; the validating constructors are the only
/// way to build one, so every `Board` in circulation satisfies the invariant.
/// Moves produce new boards rather than mutating in place, and the tile array
/// itself serves as the hash key in search bookkeeping.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([u8; TILES]);

impl Board {
    pub fn new(tiles: [u8; TILES]) -> Result<Self, BoardError> {
        let mut seen = [false; TILES];
        for &value in &tiles {
            if value as usize >= TILES {
                return Err(BoardError::ValueOutOfRange(value));
            }
            if seen[value as usize] {
                return Err(BoardError::DuplicateValue(value));
            }
            seen[value as usize] = true;
        }
        Ok(Self(tiles))
    }

    pub fn tiles(&self) -> &[u8; TILES] {
        &self.0
    }

    /// Index of the blank tile.
    pub fn blank_position(&self) -> usize {
        self.0
            .iter()
            .position(|&tile| tile == 0)
            .expect("a validated board always contains a blank")
    }

    /// Every board reachable by sliding one tile into the blank.
    ///
    /// Adjacency is checked in 2-D grid coordinates so the blank never wraps
    /// across a row boundary. Generation order is up, down, left, right,
    /// which the search algorithms rely on for deterministic expansion.
    /// Yields 2 neighbors from a corner, 3 from an edge, 4 from the center.
    pub fn legal_moves(&self) -> Vec<Board> {
        let blank = self.blank_position();
        let (row, col) = (blank / SIZE, blank % SIZE);
        let mut neighbors = Vec::with_capacity(4);

        for (dr, dc) in [(-1isize, 0isize), (1, 0), (0, -1), (0, 1)] {
            let (new_row, new_col) = (row as isize + dr, col as isize + dc);
            if (0..SIZE as isize).contains(&new_row) && (0..SIZE as isize).contains(&new_col) {
                let target = new_row as usize * SIZE + new_col as usize;
                neighbors.push(self.swap_blank(blank, target));
            }
        }

        neighbors
    }

    pub(crate) fn swap_blank(&self, blank: usize, target: usize) -> Board {
        let mut tiles = self.0;
        tiles.swap(blank, target);
        Board(tiles)
    }

    pub fn is_goal(&self) -> bool {
        *self == GOAL
    }

    /// Sum over non-blank tiles of the grid distance to each tile's goal
    /// position. Admissible and consistent, so A* on it is optimal.
    pub fn manhattan_distance(&self) -> u32 {
        let mut distance = 0;
        for (index, &tile) in self.0.iter().enumerate() {
            if tile != 0 {
                let goal = tile as usize - 1;
                let dr = (index / SIZE).abs_diff(goal / SIZE);
                let dc = (index % SIZE).abs_diff(goal % SIZE);
                distance += (dr + dc) as u32;
            }
        }
        distance
    }

    /// Count of non-blank tiles out of place. Admissible but weaker than
    /// Manhattan distance.
    pub fn misplaced_tiles(&self) -> u32 {
        self.0
            .iter()
            .zip(GOAL.0.iter())
            .filter(|(&tile, &goal)| tile != 0 && tile != goal)
            .count() as u32
    }

    /// Ordered pairs of non-blank tiles where the earlier value is larger.
    pub fn count_inversions(&self) -> u32 {
        let mut inversions = 0;
        for i in 0..TILES {
            for j in i + 1..TILES {
                if self.0[i] != 0 && self.0[j] != 0 && self.0[i] > self.0[j] {
                    inversions += 1;
                }
            }
        }
        inversions
    }

    /// On an odd-width board a configuration reaches the goal iff its
    /// inversion count is even; the blank's position does not affect parity.
    pub fn is_solvable(&self) -> bool {
        self.count_inversions() % 2 == 0
    }
}

impl TryFrom<&[u8]> for Board {
    type Error = BoardError;

    fn try_from(tiles: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; TILES] = tiles
            .try_into()
            .map_err(|_| BoardError::WrongLength(tiles.len()))?;
        Board::new(array)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.chunks(SIZE) {
            for &tile in row {
                write!(f, "{:2} ", tile)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(tiles: [u8; 9]) -> Board {
        Board::new(tiles).unwrap()
    }

    #[test]
    fn rejects_malformed_boards() {
        assert_eq!(
            Board::try_from(&[1u8, 2, 3][..]),
            Err(BoardError::WrongLength(3))
        );
        assert_eq!(
            Board::new([1, 2, 3, 4, 5, 6, 7, 8, 9]),
            Err(BoardError::ValueOutOfRange(9))
        );
        assert_eq!(
            Board::new([1, 1, 2, 3, 4, 5, 6, 7, 8]),
            Err(BoardError::DuplicateValue(1))
        );
    }

    #[test]
    fn blank_position_locates_zero() {
        assert_eq!(GOAL.blank_position(), 8);
        assert_eq!(board([0, 1, 2, 3, 4, 5, 6, 7, 8]).blank_position(), 0);
        assert_eq!(board([1, 2, 3, 4, 0, 5, 6, 7, 8]).blank_position(), 4);
    }

    #[test]
    fn legal_move_counts_by_blank_position() {
        // Corner, edge, center.
        assert_eq!(board([0, 1, 2, 3, 4, 5, 6, 7, 8]).legal_moves().len(), 2);
        assert_eq!(board([1, 0, 2, 3, 4, 5, 6, 7, 8]).legal_moves().len(), 3);
        assert_eq!(board([1, 2, 3, 4, 0, 5, 6, 7, 8]).legal_moves().len(), 4);
    }

    #[test]
    fn legal_moves_are_single_adjacent_swaps() {
        let start = board([1, 2, 3, 4, 0, 5, 6, 7, 8]);
        for neighbor in start.legal_moves() {
            // Still a permutation (the constructor invariant holds by type),
            // and exactly two positions differ: the old and new blank.
            let differing: Vec<usize> = (0..9)
                .filter(|&i| start.tiles()[i] != neighbor.tiles()[i])
                .collect();
            assert_eq!(differing.len(), 2);
            let (a, b) = (differing[0], differing[1]);
            assert!(start.tiles()[a] == 0 || start.tiles()[b] == 0);
            let manhattan = (a / 3).abs_diff(b / 3) + (a % 3).abs_diff(b % 3);
            assert_eq!(manhattan, 1);
        }
    }

    #[test]
    fn blank_does_not_wrap_rows() {
        // Blank at end of the first row: no "right" neighbor into index 3.
        let start = board([1, 2, 0, 3, 4, 5, 6, 7, 8]);
        let neighbors = start.legal_moves();
        assert_eq!(neighbors.len(), 2);
        for neighbor in neighbors {
            assert!(neighbor.blank_position() == 1 || neighbor.blank_position() == 5);
        }
    }

    #[test]
    fn heuristics_on_known_boards() {
        assert_eq!(GOAL.manhattan_distance(), 0);
        assert_eq!(GOAL.misplaced_tiles(), 0);

        let one_move = board([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(one_move.manhattan_distance(), 1);
        assert_eq!(one_move.misplaced_tiles(), 1);

        let scrambled = board([8, 6, 7, 2, 5, 4, 3, 0, 1]);
        assert_eq!(scrambled.misplaced_tiles(), 7);
        assert_eq!(scrambled.manhattan_distance(), 21);
    }

    #[test]
    fn inversion_parity_matches_solvability() {
        assert_eq!(GOAL.count_inversions(), 0);
        assert!(GOAL.is_solvable());

        let solvable = board([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(solvable.count_inversions(), 0);
        assert!(solvable.is_solvable());

        let unsolvable = board([8, 1, 2, 0, 4, 3, 7, 6, 5]);
        assert_eq!(unsolvable.count_inversions(), 11);
        assert!(!unsolvable.is_solvable());
    }
}
