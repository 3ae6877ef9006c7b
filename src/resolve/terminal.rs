//! Terminal-state detection.

use crate::board::{Board, Color, PieceKind, Position};
use crate::movegen::{has_legal_moves, valid_attacks, valid_moves};

pub fn find_monarch(board: &Board, color: Color) -> Option<Position> {
    board.find_piece(PieceKind::Monarch, color)
}

/// True when `color` has no Monarch left on the board.
pub fn is_monarch_captured(board: &Board, color: Color) -> bool {
    find_monarch(board, color).is_none()
}

/// True when some enemy move or attack targets the Monarch of `color`.
pub fn is_monarch_threatened(board: &Board, color: Color) -> bool {
    let monarch = match find_monarch(board, color) {
        Some(pos) => pos,
        None => return false,
    };
    board.pieces_of(color.opponent()).any(|(pos, _)| {
        valid_moves(board, pos).contains(&monarch) || valid_attacks(board, pos).contains(&monarch)
    })
}

/// Winner if the game ends with `next` about to move: `next` loses when
/// its Monarch is gone or it has no legal move or attack.
pub fn check_game_over(board: &Board, next: Color) -> Option<Color> {
    if is_monarch_captured(board, next) || !has_legal_moves(board, next) {
        Some(next.opponent())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardSizeKey, Cell, ObstacleKind, Piece, PieceId};

    fn monarchs() -> Board {
        let mut b = Board::empty(BoardSizeKey::Small.size());
        b.set(Position::new(0, 6), Cell::Piece(Piece::new(PieceId(1), PieceKind::Monarch, Color::Black)));
        b.set(Position::new(11, 6), Cell::Piece(Piece::new(PieceId(2), PieceKind::Monarch, Color::White)));
        b
    }

    #[test]
    fn missing_monarch_loses() {
        let mut b = monarchs();
        assert_eq!(check_game_over(&b, Color::Black), None);
        b.set(Position::new(0, 6), Cell::Empty);
        assert!(is_monarch_captured(&b, Color::Black));
        assert_eq!(check_game_over(&b, Color::Black), Some(Color::White));
    }

    #[test]
    fn no_legal_moves_loses() {
        let mut b = monarchs();
        for pos in [
            Position::new(0, 5),
            Position::new(0, 7),
            Position::new(1, 5),
            Position::new(1, 6),
            Position::new(1, 7),
        ] {
            b.set(pos, Cell::Obstacle(ObstacleKind::Tree));
        }
        assert_eq!(check_game_over(&b, Color::Black), Some(Color::White));
        assert_eq!(check_game_over(&b, Color::White), None);
    }

    #[test]
    fn threat_detection() {
        let mut b = monarchs();
        assert!(!is_monarch_threatened(&b, Color::Black));
        b.set(Position::new(5, 6), Cell::Piece(Piece::new(PieceId(3), PieceKind::RamTower, Color::White)));
        assert!(is_monarch_threatened(&b, Color::Black));
        assert!(!is_monarch_threatened(&b, Color::White));
    }
}
