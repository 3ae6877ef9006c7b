//! Legal move generation.
//!
//! Combines geometric patterns, cave tunnels, and ranged attacks into the
//! move and attack sets the controller and the bot work from.

pub mod attack;
pub mod cave;
pub mod movement;

pub use attack::{
    adjusted_attack_range, necromancer_freeze_targets, necromancer_kill_targets, valid_attacks,
    FREEZE_RANGE,
};
pub use cave::tunnel_moves;
pub use movement::{path_squares, piece_moves};

use crate::board::{Board, Color, Position};

/// Legal move destinations for the piece at `pos`: geometric moves plus
/// cave tunnels. Empty for an empty cell or a frozen piece.
pub fn valid_moves(board: &Board, pos: Position) -> Vec<Position> {
    match board.piece_at(pos) {
        Some(p) if !p.frozen => {}
        _ => return Vec::new(),
    }
    let mut moves = piece_moves(board, pos);
    for dest in tunnel_moves(board, pos) {
        if !moves.contains(&dest) {
            moves.push(dest);
        }
    }
    moves
}

/// Returns true if any piece of `color` has a valid move or attack.
pub fn has_legal_moves(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(pos, _)| !valid_moves(board, pos).is_empty() || !valid_attacks(board, pos).is_empty())
}

/// Every (from, to, is_attack) action available to `color`, in row-major
/// order of the acting piece, moves before attacks.
pub fn legal_actions(board: &Board, color: Color) -> Vec<(Position, Position, bool)> {
    let mut out = Vec::new();
    for (from, _) in board.pieces_of(color) {
        out.extend(valid_moves(board, from).into_iter().map(|to| (from, to, false)));
        out.extend(valid_attacks(board, from).into_iter().map(|to| (from, to, true)));
    }
    out
}
