//! Adapter over the `shakmaty` rules engine.
//!
//! The environment never generates moves or detects mates itself; it asks
//! [`Position`] and consumes the answers. Squares are plain `u8` indices
//! (a1 = 0, h8 = 63) on this side of the boundary.

use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Outcome, Position as _, Role, Square};

use crate::error::{EnvError, Result};
use crate::types::*;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Full game state owned by the rules engine.
#[derive(Clone, Debug, Default)]
pub struct Position {
    inner: Chess,
}

impl Position {
    pub fn startpos() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        let parsed: Fen = fen.parse().map_err(|e: shakmaty::fen::ParseFenError| {
            EnvError::InvalidFen {
                fen: fen.to_string(),
                reason: e.to_string(),
            }
        })?;
        let inner: Chess =
            parsed
                .into_position(CastlingMode::Standard)
                .map_err(|e| EnvError::IllegalPosition {
                    fen: fen.to_string(),
                    reason: e.to_string(),
                })?;
        Ok(Self { inner })
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.inner.clone(), EnPassantMode::Legal).to_string()
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        color_from(self.inner.turn())
    }

    pub fn fullmove_number(&self) -> u32 {
        self.inner.fullmoves().get()
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.inner.board().piece_at(square(sq)).map(piece_from)
    }

    /// Occupied squares with their pieces, a1 first.
    pub fn piece_map(&self) -> impl Iterator<Item = (u8, Piece)> + '_ {
        let board = self.inner.board();
        board.occupied().into_iter().filter_map(move |s| {
            board
                .piece_at(s)
                .map(|piece| (s as u8, piece_from(piece)))
        })
    }

    pub fn king(&self, color: Color) -> Option<u8> {
        self.inner.board().king_of(color_to(color)).map(|s| s as u8)
    }

    /// Square a pawn could capture onto en passant after a double push.
    pub fn ep_square(&self) -> Option<u8> {
        self.inner.ep_square(EnPassantMode::Always).map(|s| s as u8)
    }

    /// Bitmask of the rook squares that still carry castling rights.
    pub fn castling_rights(&self) -> u64 {
        self.inner.castles().castling_rights().0
    }

    /// Legal moves as from/to pairs. Promotions collapse onto one entry and
    /// castling is reported with the king's destination square.
    pub fn legal_moves(&self) -> Vec<ChessMove> {
        let mut moves: Vec<ChessMove> = self
            .inner
            .legal_moves()
            .iter()
            .filter_map(from_to)
            .collect();
        moves.dedup();
        moves
    }

    pub fn is_legal(&self, mv: ChessMove) -> bool {
        self.resolve(mv).is_some()
    }

    pub fn is_capture(&self, mv: ChessMove) -> bool {
        self.resolve(mv).is_some_and(|m| m.is_capture())
    }

    /// The piece `mv` would take, including the pawn removed en passant.
    pub fn captured_piece(&self, mv: ChessMove) -> Option<Piece> {
        let m = self.resolve(mv)?;
        let role = m.capture()?;
        Some(Piece::new(self.turn().other(), kind_from(role)))
    }

    pub fn is_check(&self) -> bool {
        self.inner.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.inner.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.inner.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.inner.is_insufficient_material()
    }

    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    /// Final result, or `None` while the game is still running.
    pub fn outcome(&self) -> Option<Winner> {
        match self.inner.outcome()? {
            Outcome::Decisive { winner } => Some(Winner::from(color_from(winner))),
            Outcome::Draw => Some(Winner::Draw),
        }
    }

    /// Applies a legal move.
    pub fn push(&mut self, mv: ChessMove) -> Result<()> {
        let m = self
            .resolve(mv)
            .ok_or_else(|| EnvError::IllegalMove { uci: mv.to_uci() })?;
        self.inner.play_unchecked(&m);
        Ok(())
    }

    /// Finds the engine move behind a from/to pair, preferring the queen
    /// when several promotions share the same squares.
    fn resolve(&self, mv: ChessMove) -> Option<Move> {
        let mut under_promotion = None;
        for m in self.inner.legal_moves() {
            if from_to(&m) != Some(mv) {
                continue;
            }
            match m.promotion() {
                None | Some(Role::Queen) => return Some(m),
                Some(_) => {
                    under_promotion.get_or_insert(m);
                }
            }
        }
        under_promotion
    }
}

fn from_to(m: &Move) -> Option<ChessMove> {
    match *m {
        Move::Castle { king, rook } => {
            let king = king as u8;
            let file = if file_of(rook as u8) > file_of(king) { 6 } else { 2 };
            let to = sq(file, rank_of(king))?;
            Some(ChessMove::new(king, to))
        }
        _ => Some(ChessMove::new(m.from()? as u8, m.to() as u8)),
    }
}

fn square(sq: u8) -> Square {
    Square::new(u32::from(sq))
}

fn color_from(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

fn color_to(color: Color) -> shakmaty::Color {
    match color {
        Color::White => shakmaty::Color::White,
        Color::Black => shakmaty::Color::Black,
    }
}

fn kind_from(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn piece_from(piece: shakmaty::Piece) -> Piece {
    Piece::new(color_from(piece.color), kind_from(piece.role))
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
