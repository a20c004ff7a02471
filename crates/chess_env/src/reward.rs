//! Reward shaping for a single transition.
//!
//! Every function here is pure: the result depends only on the positions
//! and the player passed in. `player` is the side the reward is scored for;
//! the episode controller passes the side that just moved.
//!
//! The shaped reward is the sum of:
//! - a terminal term (win / loss on mate, draw bonus on stalemate or dead
//!   material)
//! - the value of the captured piece
//! - a bonus for giving check
//! - the change in material balance, central control and king safety

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::types::*;

// ============================================================================
// Game Outcomes
// ============================================================================

pub const WIN_REWARD: f64 = 1.0;
pub const LOSS_REWARD: f64 = -1.0;

/// Stalemate or insufficient material.
pub const DRAW_REWARD: f64 = 0.5;

// ============================================================================
// Tactical Bonuses
// ============================================================================

/// Capture rewards indexed by PieceKind::idx(). Order: Pawn, Knight, Bishop,
/// Rook, Queen, King. A king is never captured.
const CAPTURE_VALUES: [f64; 6] = [0.1, 0.3, 0.3, 0.5, 0.9, 0.0];

pub const CHECK_REWARD: f64 = 0.5;

// ============================================================================
// Positional Terms
// ============================================================================

/// Material values in pawns, indexed by PieceKind::idx().
const MATERIAL_VALUES: [i32; 6] = [1, 3, 3, 5, 9, 0];

/// Non-king material each side starts with (8 + 6 + 6 + 10 + 9).
pub const STARTING_MATERIAL: f64 = 39.0;

/// Reward per own piece standing on the extended center.
pub const CENTER_REWARD: f64 = 0.1;

/// Files c..=f and ranks 3..=6, zero-based.
const CENTER_FILES: std::ops::RangeInclusive<i8> = 2..=5;
const CENTER_RANKS: std::ops::RangeInclusive<i8> = 2..=5;

/// Applied when no own pawn stands anywhere on the king's file.
pub const OPEN_KING_FILE_PENALTY: f64 = -0.5;

/// Per own pawn directly in front of the king (same or adjacent file).
pub const PAWN_SHIELD_REWARD: f64 = 0.2;

/// Per-term view of one transition's reward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    pub terminal: f64,
    pub capture: f64,
    pub check: f64,
    pub material_delta: f64,
    pub central_delta: f64,
    pub king_safety_delta: f64,
}

impl RewardBreakdown {
    pub fn total(&self) -> f64 {
        self.terminal
            + self.capture
            + self.check
            + self.material_delta
            + self.central_delta
            + self.king_safety_delta
    }
}

/// Value of the piece `mv` takes in `prev`, when it belongs to the opponent
/// of `player`. The lookup runs on the pre-move position because the victim
/// is already gone afterwards.
pub fn reward_for_capture(mv: ChessMove, prev: &Position, player: Color) -> f64 {
    if !prev.is_capture(mv) {
        return 0.0;
    }
    match prev.captured_piece(mv) {
        Some(piece) if piece.color != player => CAPTURE_VALUES[piece.kind.idx()],
        _ => 0.0,
    }
}

/// Bonus when the side to move in `new` is in check.
pub fn reward_for_check(new: &Position) -> f64 {
    if new.is_check() {
        CHECK_REWARD
    } else {
        0.0
    }
}

/// Win/loss on mate from `player`'s point of view, draw bonus on stalemate
/// or insufficient material, 0 otherwise.
pub fn terminal_reward(new: &Position, player: Color) -> f64 {
    if new.is_checkmate() {
        // The mated side is the one left to move
        if new.turn() != player {
            WIN_REWARD
        } else {
            LOSS_REWARD
        }
    } else if new.is_stalemate() || new.is_insufficient_material() {
        DRAW_REWARD
    } else {
        0.0
    }
}

/// (own material − opponent material) / 39.
pub fn calculate_material_balance(pos: &Position, player: Color) -> f64 {
    let mut balance = 0i32;
    for (_, piece) in pos.piece_map() {
        let value = MATERIAL_VALUES[piece.kind.idx()];
        if piece.color == player {
            balance += value;
        } else {
            balance -= value;
        }
    }
    f64::from(balance) / STARTING_MATERIAL
}

/// 0.1 for each of `player`'s pieces on the extended center.
pub fn calculate_central_control(pos: &Position, player: Color) -> f64 {
    let occupied = pos
        .piece_map()
        .filter(|(sq, piece)| {
            piece.color == player
                && CENTER_FILES.contains(&file_of(*sq))
                && CENTER_RANKS.contains(&rank_of(*sq))
        })
        .count();
    occupied as f64 * CENTER_REWARD
}

/// Pawn cover around `player`'s king.
///
/// −0.5 when the king's file holds no own pawn, plus 0.2 for each own pawn
/// on the three squares one rank ahead of the king. The bonus is not capped
/// and can outweigh the penalty. A position without that king scores 0.
pub fn calculate_king_safety(pos: &Position, player: Color) -> f64 {
    let Some(king) = pos.king(player) else {
        return 0.0;
    };
    let own_pawn = |s: u8| pos.piece_at(s) == Some(Piece::new(player, PieceKind::Pawn));

    let king_file = file_of(king);
    let king_rank = rank_of(king);

    let mut safety = 0.0;

    let file_covered = (0..8).filter_map(|rank| sq(king_file, rank)).any(&own_pawn);
    if !file_covered {
        safety += OPEN_KING_FILE_PENALTY;
    }

    let shield_rank = king_rank + player.forward();
    let shield = (-1..=1)
        .filter_map(|df| sq(king_file + df, shield_rank))
        .filter(|&s| own_pawn(s))
        .count();
    safety += shield as f64 * PAWN_SHIELD_REWARD;

    safety
}

/// Every reward term for the transition `prev --mv--> new`.
pub fn reward_breakdown(
    mv: ChessMove,
    prev: &Position,
    new: &Position,
    player: Color,
) -> RewardBreakdown {
    RewardBreakdown {
        terminal: terminal_reward(new, player),
        capture: reward_for_capture(mv, prev, player),
        check: reward_for_check(new),
        material_delta: calculate_material_balance(new, player)
            - calculate_material_balance(prev, player),
        central_delta: calculate_central_control(new, player)
            - calculate_central_control(prev, player),
        king_safety_delta: calculate_king_safety(new, player)
            - calculate_king_safety(prev, player),
    }
}

/// Scalar reward for the transition `prev --mv--> new`.
pub fn compute_reward(mv: ChessMove, prev: &Position, new: &Position, player: Color) -> f64 {
    reward_breakdown(mv, prev, new, player).total()
}

#[cfg(test)]
#[path = "reward_tests.rs"]
mod reward_tests;
