//! Text rendering of a position for terminals.

use crate::board::Position;
use crate::types::{sq, Color, Piece, PieceKind};

const EMPTY: char = '·';

/// Unicode glyph for a piece. The outlined set is used for white unless
/// `invert_color` is set, which suits light text on a dark background.
pub fn piece_glyph(piece: Piece, invert_color: bool) -> char {
    let outlined = (piece.color == Color::White) != invert_color;
    match (piece.kind, outlined) {
        (PieceKind::King, true) => '♔',
        (PieceKind::Queen, true) => '♕',
        (PieceKind::Rook, true) => '♖',
        (PieceKind::Bishop, true) => '♗',
        (PieceKind::Knight, true) => '♘',
        (PieceKind::Pawn, true) => '♙',
        (PieceKind::King, false) => '♚',
        (PieceKind::Queen, false) => '♛',
        (PieceKind::Rook, false) => '♜',
        (PieceKind::Bishop, false) => '♝',
        (PieceKind::Knight, false) => '♞',
        (PieceKind::Pawn, false) => '♟',
    }
}

/// Eight lines, rank 8 first, glyphs separated by single spaces.
pub fn render_unicode(pos: &Position, invert_color: bool) -> String {
    let mut lines = Vec::with_capacity(8);
    for rank in (0..8).rev() {
        let line: Vec<String> = (0..8)
            .map(|file| {
                sq(file, rank)
                    .and_then(|s| pos.piece_at(s))
                    .map_or(EMPTY, |p| piece_glyph(p, invert_color))
                    .to_string()
            })
            .collect();
        lines.push(line.join(" "));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_startpos() {
        let text = render_unicode(&Position::startpos(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜");
        assert_eq!(lines[1], "♟ ♟ ♟ ♟ ♟ ♟ ♟ ♟");
        assert_eq!(lines[4], "· · · · · · · ·");
        assert_eq!(lines[7], "♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖");
    }

    #[test]
    fn test_render_inverted() {
        let text = render_unicode(&Position::startpos(), true);
        assert_eq!(text.lines().next(), Some("♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖"));
        assert_eq!(text.lines().last(), Some("♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜"));
    }
}
