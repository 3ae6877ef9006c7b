//! Cave tunnel moves.
//!
//! A piece standing orthogonally next to a cave may exit next to any other
//! cave. RamTowers and zombies cannot tunnel, and tunnel moves never
//! capture.

use crate::board::{Board, PieceKind, Position};

/// Caves orthogonally adjacent to `pos`.
pub fn adjacent_caves(caves: &[Position], pos: Position) -> Vec<Position> {
    let neighbors = pos.orthogonal_neighbors();
    caves.iter().copied().filter(|c| neighbors.contains(c)).collect()
}

/// Tunnel destinations for the piece at `pos`.
pub fn tunnel_moves(board: &Board, pos: Position) -> Vec<Position> {
    let piece = match board.piece_at(pos) {
        Some(p) => p,
        None => return Vec::new(),
    };
    if piece.kind == PieceKind::RamTower || piece.is_zombie {
        return Vec::new();
    }

    let caves = board.find_caves();
    let entries = adjacent_caves(&caves, pos);
    if entries.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    for exit in caves.iter().filter(|c| !entries.contains(c)) {
        for dest in exit.orthogonal_neighbors() {
            if dest != pos && board.is_empty_at(dest) && !out.contains(&dest) {
                out.push(dest);
            }
        }
    }
    out
}
