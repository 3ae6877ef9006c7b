//! Bomber narc nets.
//!
//! A Bomber that finishes a move lays narcs on the empty cells orthogonally
//! next to it. An enemy piece (other than a Bomber) that crosses or lands
//! on a narc is stopped there, and the whole net of that Bomber is spent.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, PieceId, PieceKind, Position};

/// A trap marker left by a Bomber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Narc {
    pub position: Position,
    pub owner: Color,
    pub bomber_id: PieceId,
}

/// Cells around `bomber_pos` that can hold a narc.
pub fn narc_positions(board: &Board, bomber_pos: Position) -> Vec<Position> {
    bomber_pos
        .orthogonal_neighbors()
        .into_iter()
        .filter(|&p| board.is_empty_at(p))
        .collect()
}

/// A fresh net for the Bomber standing at `bomber_pos`.
pub fn create_narcs_for_bomber(board: &Board, bomber_pos: Position) -> Vec<Narc> {
    let bomber = match board.piece_at(bomber_pos) {
        Some(p) if p.kind == PieceKind::Bomber => *p,
        _ => return Vec::new(),
    };
    narc_positions(board, bomber_pos)
        .into_iter()
        .map(|position| Narc { position, owner: bomber.color, bomber_id: bomber.id })
        .collect()
}

pub fn find_narc_at(narcs: &[Narc], pos: Position) -> Option<&Narc> {
    narcs.iter().find(|n| n.position == pos)
}

/// Drops every narc laid by the given Bomber.
pub fn remove_narcs_for_bomber(narcs: &[Narc], bomber_id: PieceId) -> Vec<Narc> {
    narcs.iter().copied().filter(|n| n.bomber_id != bomber_id).collect()
}

/// The enemy narc at `pos` that would stop a piece of `mover`, if any.
pub fn check_narc_trigger(narcs: &[Narc], pos: Position, mover: Color) -> Option<Narc> {
    narcs.iter().copied().find(|n| n.position == pos && n.owner != mover)
}

/// First narc along `path` that stops a `mover_kind` piece of `mover`.
/// Bombers pass through narcs unharmed.
pub fn check_narc_net_trigger(
    narcs: &[Narc],
    path: &[Position],
    mover: Color,
    mover_kind: PieceKind,
) -> Option<Narc> {
    if mover_kind == PieceKind::Bomber {
        return None;
    }
    path.iter().find_map(|&pos| check_narc_trigger(narcs, pos, mover))
}

/// Positions of all narcs owned by `owner`.
pub fn narc_net_positions(narcs: &[Narc], owner: Color) -> Vec<Position> {
    narcs.iter().filter(|n| n.owner == owner).map(|n| n.position).collect()
}
