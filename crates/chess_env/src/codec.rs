//! Action index <-> move table.
//!
//! Every from/to pair over the 64 squares gets one slot, from-square outer
//! and to-square inner, so index = from * 64 + to. The declared action space
//! is wider than the table; the tail is reserved and never decodes.

use std::collections::HashMap;

use crate::error::{EnvError, Result};
use crate::types::ChessMove;

pub const NUM_SQUARES: usize = 64;

/// Populated table entries: 64 × 64 from/to pairs.
pub const NUM_MOVE_SLOTS: usize = NUM_SQUARES * NUM_SQUARES;

/// Width of the action space advertised to the training loop.
pub const ACTION_SPACE_SIZE: usize = 4672;

/// Immutable two-way table built once per environment.
#[derive(Debug, Clone)]
pub struct MoveCodec {
    index_to_move: Vec<ChessMove>,
    move_to_index: HashMap<ChessMove, usize>,
}

impl Default for MoveCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveCodec {
    pub fn new() -> Self {
        let index_to_move = Self::generate_all_moves();
        let move_to_index = index_to_move
            .iter()
            .enumerate()
            .map(|(action, &mv)| (mv, action))
            .collect();
        Self {
            index_to_move,
            move_to_index,
        }
    }

    fn generate_all_moves() -> Vec<ChessMove> {
        let mut moves = Vec::with_capacity(NUM_MOVE_SLOTS);
        for from in 0..NUM_SQUARES as u8 {
            for to in 0..NUM_SQUARES as u8 {
                moves.push(ChessMove::new(from, to));
            }
        }
        moves
    }

    /// All moves in canonical index order.
    pub fn encode_all(&self) -> &[ChessMove] {
        &self.index_to_move
    }

    pub fn encode(&self, mv: ChessMove) -> Option<usize> {
        self.move_to_index.get(&mv).copied()
    }

    pub fn decode(&self, action: usize) -> Result<ChessMove> {
        self.index_to_move
            .get(action)
            .copied()
            .ok_or(EnvError::InvalidAction {
                index: action,
                populated: self.index_to_move.len(),
            })
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.index_to_move.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_move.is_empty()
    }

    pub fn action_space_size(&self) -> usize {
        ACTION_SPACE_SIZE
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod codec_tests;
