//! Warlock swaps.
//!
//! A Warlock may trade places with its own Monarch, or send the Monarch to
//! any of its own Hoplites (the Hoplite takes the Monarch's square).

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, PieceKind, Position};
use crate::resolve::find_monarch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapKind {
    WarlockMonarch,
    HopliteMonarch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapTarget {
    pub position: Position,
    pub kind: SwapKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwapError {
    #[error("no piece at initiator position {0}")]
    NoInitiator(Position),

    #[error("no piece at target position {0}")]
    NoTarget(Position),

    #[error("only a warlock can initiate a swap")]
    NotWarlock,

    #[error("cannot swap with an enemy piece")]
    EnemyTarget,

    #[error("warlock can only swap with the monarch or a hoplite")]
    InvalidTargetType,

    #[error("monarch not found on board")]
    MonarchMissing,
}

/// True when the piece at `pos` is a Warlock.
pub fn can_initiate_swap(board: &Board, pos: Position) -> bool {
    board.piece_at(pos).is_some_and(|p| p.kind == PieceKind::Warlock)
}

/// Friendly Monarchs, then friendly Hoplites, of the Warlock at `pos`.
pub fn valid_swap_targets(board: &Board, pos: Position) -> Vec<SwapTarget> {
    let warlock = match board.piece_at(pos) {
        Some(p) if p.kind == PieceKind::Warlock && !p.frozen => *p,
        _ => return Vec::new(),
    };
    let mut targets = Vec::new();
    for (kind, swap) in [
        (PieceKind::Monarch, SwapKind::WarlockMonarch),
        (PieceKind::Hoplite, SwapKind::HopliteMonarch),
    ] {
        targets.extend(
            board
                .pieces_of(warlock.color)
                .filter(|(_, p)| p.kind == kind)
                .map(|(position, _)| SwapTarget { position, kind: swap }),
        );
    }
    targets
}

pub fn validate_swap(board: &Board, initiator: Position, target: Position) -> Result<SwapKind, SwapError> {
    let warlock = board.piece_at(initiator).ok_or(SwapError::NoInitiator(initiator))?;
    let other = board.piece_at(target).ok_or(SwapError::NoTarget(target))?;
    if warlock.kind != PieceKind::Warlock {
        return Err(SwapError::NotWarlock);
    }
    if warlock.color != other.color {
        return Err(SwapError::EnemyTarget);
    }
    match other.kind {
        PieceKind::Monarch => Ok(SwapKind::WarlockMonarch),
        PieceKind::Hoplite => Ok(SwapKind::HopliteMonarch),
        _ => Err(SwapError::InvalidTargetType),
    }
}

/// Performs a validated swap on a copy of the board.
pub fn execute_swap(board: &Board, initiator: Position, target: Position) -> Result<Board, SwapError> {
    let kind = validate_swap(board, initiator, target)?;
    let mut next = board.clone();
    match kind {
        SwapKind::WarlockMonarch => {
            next.set(initiator, board.cell(target));
            next.set(target, board.cell(initiator));
        }
        SwapKind::HopliteMonarch => {
            let color = board.piece_at(initiator).map(|p| p.color).ok_or(SwapError::NoInitiator(initiator))?;
            let monarch_pos = find_monarch(board, color).ok_or(SwapError::MonarchMissing)?;
            let monarch = board.cell(monarch_pos);
            if !matches!(monarch, Cell::Piece(_)) {
                return Err(SwapError::MonarchMissing);
            }
            next.set(target, monarch);
            next.set(monarch_pos, board.cell(target));
        }
    }
    Ok(next)
}
