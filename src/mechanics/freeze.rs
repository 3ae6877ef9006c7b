//! Necromancer freeze.

use crate::board::{Board, Color, PieceKind, Position};
use crate::movegen::necromancer_freeze_targets;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FreezeError {
    #[error("no necromancer at {0}")]
    NotNecromancer(Position),

    #[error("{0} is not a freeze target")]
    InvalidTarget(Position),
}

/// Freezes the piece at `target` using the Necromancer at `necromancer`.
pub fn execute_freeze(board: &Board, necromancer: Position, target: Position) -> Result<Board, FreezeError> {
    match board.piece_at(necromancer) {
        Some(p) if p.kind == PieceKind::Necromancer => {}
        _ => return Err(FreezeError::NotNecromancer(necromancer)),
    }
    if !necromancer_freeze_targets(board, necromancer).contains(&target) {
        return Err(FreezeError::InvalidTarget(target));
    }
    let mut next = board.clone();
    if let Some(p) = next.piece_mut(target) {
        p.frozen = true;
    }
    Ok(next)
}

/// Clears the frozen flag on every piece of `color`.
pub fn thaw_pieces(board: &Board, color: Color) -> Board {
    let frozen: Vec<Position> = board
        .pieces_of(color)
        .filter(|(_, p)| p.frozen)
        .map(|(pos, _)| pos)
        .collect();
    let mut next = board.clone();
    for pos in frozen {
        if let Some(p) = next.piece_mut(pos) {
            p.frozen = false;
        }
    }
    next
}
