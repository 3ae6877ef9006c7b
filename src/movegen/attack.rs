//! Ranged attacks and Necromancer target sets.

use crate::board::{Board, Cell, Piece, PieceKind, Position};

use super::movement::ALL_DIRECTIONS;

/// Maximum Chebyshev distance of a Necromancer freeze.
pub const FREEZE_RANGE: i32 = 2;

/// Range lost by a Necromancer for each revival it has performed.
pub const RANGE_LOSS_PER_REVIVE: i32 = 2;

/// Applies revival and zombie penalties to a base attack range.
pub fn adjusted_attack_range(piece: &Piece, base: i32) -> i32 {
    if piece.kind == PieceKind::Necromancer {
        return (base - RANGE_LOSS_PER_REVIVE * piece.revive_count as i32).max(0);
    }
    if piece.is_zombie {
        return if piece.kind == PieceKind::Bomber { 1 } else { base.min(1) };
    }
    base
}

/// Ranged targets of the piece at `pos`: enemy pieces along the eight
/// straight lines within the adjusted range, with clear line of sight.
pub fn valid_attacks(board: &Board, pos: Position) -> Vec<Position> {
    let piece = match board.piece_at(pos) {
        Some(p) if !p.frozen => *p,
        _ => return Vec::new(),
    };
    let range = adjusted_attack_range(&piece, piece.kind.rules().attack_range);
    if range == 0 {
        return Vec::new();
    }

    let mut out = Vec::new();
    for &(dr, dc) in &ALL_DIRECTIONS {
        let mut cur = pos;
        for _ in 0..range {
            cur = cur.offset(dr, dc);
            match board.get(cur) {
                Some(Cell::Empty) => continue,
                Some(Cell::Piece(target)) if target.color != piece.color => out.push(cur),
                _ => {}
            }
            break;
        }
    }
    out
}

/// Kill targets of a Necromancer at `pos`; empty for other kinds.
pub fn necromancer_kill_targets(board: &Board, pos: Position) -> Vec<Position> {
    match board.piece_at(pos) {
        Some(p) if p.kind == PieceKind::Necromancer => valid_attacks(board, pos),
        _ => Vec::new(),
    }
}

/// Freeze targets of a Necromancer at `pos`: enemy non-Monarch pieces
/// within [`FREEZE_RANGE`] that are not already frozen.
pub fn necromancer_freeze_targets(board: &Board, pos: Position) -> Vec<Position> {
    let necro = match board.piece_at(pos) {
        Some(p) if p.kind == PieceKind::Necromancer && !p.frozen => *p,
        _ => return Vec::new(),
    };
    board
        .pieces()
        .filter(|(at, p)| {
            p.color != necro.color
                && p.kind != PieceKind::Monarch
                && !p.frozen
                && at.chebyshev(pos) <= FREEZE_RANGE
        })
        .map(|(at, _)| at)
        .collect()
}
