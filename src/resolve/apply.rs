//! Applying a single move or attack to a board.

use serde::{Deserialize, Serialize};

use crate::board::{attack_piece, move_piece, Board, Piece, PieceKind, Position};
use crate::mechanics::narc::{check_narc_net_trigger, create_narcs_for_bomber, remove_narcs_for_bomber, Narc};
use crate::movegen::path_squares;

/// Structural violations of the move contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("no piece at source square {0}")]
    NoPieceAtSource(Position),
}

/// A recorded move or attack. `to` is where the piece actually stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub is_attack: bool,
    pub terminated_by_narc: bool,
}

/// Result of [`make_move`]: the new board, the record, and the updated narcs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub mv: Move,
    pub narcs: Vec<Narc>,
}

/// Applies a move (`is_attack == false`) or a ranged attack to `board`.
///
/// The input board and narcs are not modified. Attack and move legality is
/// the caller's responsibility; only a missing source piece is an error.
pub fn make_move(
    board: &Board,
    from: Position,
    to: Position,
    is_attack: bool,
    narcs: &[Narc],
) -> Result<MoveOutcome, RuleError> {
    let piece = *board.piece_at(from).ok_or(RuleError::NoPieceAtSource(from))?;

    if is_attack {
        let captured = board.piece_at(to).copied().filter(|p| p.color != piece.color);
        let mut next_narcs = narcs.to_vec();
        if let Some(victim) = captured.filter(|p| p.kind == PieceKind::Bomber) {
            next_narcs = remove_narcs_for_bomber(&next_narcs, victim.id);
        }
        return Ok(MoveOutcome {
            board: attack_piece(board, to),
            mv: Move { from, to, piece, captured, is_attack: true, terminated_by_narc: false },
            narcs: next_narcs,
        });
    }

    let path = path_squares(board, from, to);
    let trigger = check_narc_net_trigger(narcs, &path, piece.color, piece.kind);
    let stop = trigger.map_or(to, |n| n.position);

    let captured = board.piece_at(stop).copied().filter(|p| p.color != piece.color);
    let next_board = move_piece(board, from, stop);

    let mut next_narcs = narcs.to_vec();
    if let Some(narc) = trigger {
        next_narcs = remove_narcs_for_bomber(&next_narcs, narc.bomber_id);
    }
    if let Some(victim) = captured.filter(|p| p.kind == PieceKind::Bomber) {
        next_narcs = remove_narcs_for_bomber(&next_narcs, victim.id);
    }
    if piece.kind == PieceKind::Bomber {
        next_narcs = remove_narcs_for_bomber(&next_narcs, piece.id);
        next_narcs.extend(create_narcs_for_bomber(&next_board, stop));
    }

    Ok(MoveOutcome {
        board: next_board,
        mv: Move {
            from,
            to: stop,
            piece,
            captured,
            is_attack: false,
            terminated_by_narc: trigger.is_some(),
        },
        narcs: next_narcs,
    })
}
