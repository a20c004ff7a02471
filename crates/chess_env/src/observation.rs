//! Board observation encoding
//!
//! Converts a position into the dense 8×8 grid handed to the policy.
//! Row 0 is rank 8, so white's home rank sits at the bottom; column 0 is the
//! a-file. Values are signed piece codes (pawn = 1 .. king = 6, negative for
//! black), 0 for an empty square.

use crate::board::Position;
use crate::types::{file_of, rank_of};

pub const BOARD_SIZE: usize = 8;

/// Lowest and highest value a cell can hold.
pub const OBSERVATION_LOW: i8 = -6;
pub const OBSERVATION_HIGH: i8 = 6;

pub type Observation = [[i8; BOARD_SIZE]; BOARD_SIZE];

/// Encodes a position; touches only occupied squares.
pub fn encode(pos: &Position) -> Observation {
    let mut observation = [[0i8; BOARD_SIZE]; BOARD_SIZE];
    for (sq, piece) in pos.piece_map() {
        let row = 7 - rank_of(sq) as usize;
        let col = file_of(sq) as usize;
        observation[row][col] = piece.code();
    }
    observation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_startpos() {
        let observation = encode(&Position::startpos());

        assert_eq!(observation[0], [-4, -2, -3, -5, -6, -3, -2, -4]);
        assert_eq!(observation[1], [-1; 8]);
        for row in &observation[2..6] {
            assert_eq!(*row, [0; 8]);
        }
        assert_eq!(observation[6], [1; 8]);
        assert_eq!(observation[7], [4, 2, 3, 5, 6, 3, 2, 4]);
    }

    #[test]
    fn test_encode_values_in_range() {
        let pos = Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
            .unwrap();
        let observation = encode(&pos);

        assert!(observation
            .iter()
            .flatten()
            .all(|v| (OBSERVATION_LOW..=OBSERVATION_HIGH).contains(v)));
        // White queen on f7: rank 7 -> row 1, f-file -> column 5
        assert_eq!(observation[1][5], 5);
        // Black knight on c6
        assert_eq!(observation[2][2], -2);
    }
}
