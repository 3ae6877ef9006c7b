//! Heuristic position evaluation.
//!
//! Material plus a centrality term. Scores are from Black's perspective:
//! Black material counts positive, White material negative.

use crate::board::{Board, BoardSize, Color, PieceKind, Position};

/// Centrality weight for the Monarch, which prefers the edges.
pub const MONARCH_CENTER_WEIGHT: f64 = -10.0;
/// Centrality weight for every other piece.
pub const PIECE_CENTER_WEIGHT: f64 = 20.0;

/// Normalized distance of one coordinate from the board center, in [0, 1].
fn axis_distance(coord: i32, extent: i32) -> f64 {
    let center = f64::from(extent - 1) / 2.0;
    if center <= 0.0 {
        return 0.0;
    }
    (f64::from(coord) - center).abs() / center
}

/// Centrality bonus `round((1 - d) * m)` for a piece of `kind` at `pos`.
pub fn centrality_bonus(pos: Position, size: BoardSize, kind: PieceKind) -> i32 {
    let d = (axis_distance(pos.row, size.rows) + axis_distance(pos.col, size.cols)) / 2.0;
    let weight = if kind == PieceKind::Monarch { MONARCH_CENTER_WEIGHT } else { PIECE_CENTER_WEIGHT };
    // Half-up rounding, so negative halves round toward zero.
    ((1.0 - d) * weight + 0.5).floor() as i32
}

/// Static evaluation of `board`; positive favours Black.
pub fn evaluate(board: &Board) -> i32 {
    let size = board.size();
    board
        .pieces()
        .map(|(pos, p)| {
            let score = p.kind.value() + centrality_bonus(pos, size, p.kind);
            match p.color {
                Color::Black => score,
                Color::White => -score,
            }
        })
        .sum()
}

/// Evaluation from `side`'s point of view.
pub fn evaluate_for(board: &Board, side: Color) -> i32 {
    match side {
        Color::Black => evaluate(board),
        Color::White => -evaluate(board),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{place_formation, BoardSizeKey, Cell, Piece, PieceId};

    #[test]
    fn symmetric_formation_evaluates_to_zero() {
        for key in [BoardSizeKey::Small, BoardSizeKey::Medium, BoardSizeKey::Large] {
            let board = place_formation(key.size());
            assert_eq!(evaluate(&board), 0, "{:?}", key);
        }
    }

    #[test]
    fn material_sign_follows_colour() {
        let mut board = Board::empty(BoardSizeKey::Small.size());
        board.set(Position::new(0, 0), Cell::Piece(Piece::new(PieceId(1), PieceKind::Duchess, Color::Black)));
        assert!(evaluate(&board) > 0);
        assert_eq!(evaluate_for(&board, Color::White), -evaluate(&board));
        board.set(Position::new(0, 0), Cell::Piece(Piece::new(PieceId(1), PieceKind::Duchess, Color::White)));
        assert!(evaluate(&board) < 0);
    }

    #[test]
    fn centrality_rewards_center_except_for_monarch() {
        let size = BoardSizeKey::Small.size();
        let center = Position::new(5, 5);
        let corner = Position::new(0, 0);
        assert!(centrality_bonus(center, size, PieceKind::Paladin) > centrality_bonus(corner, size, PieceKind::Paladin));
        assert!(centrality_bonus(center, size, PieceKind::Monarch) < centrality_bonus(corner, size, PieceKind::Monarch));
        assert_eq!(centrality_bonus(corner, size, PieceKind::Paladin), 0);
    }
}
