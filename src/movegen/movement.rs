//! Geometric move patterns.
//!
//! Produces the raw destination set for each piece kind, including
//! move-captures. Cave tunnels and ranged attacks live in sibling modules.

use crate::board::{Board, Cell, Color, ObstacleKind, Piece, PieceKind, Position};

pub const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
pub const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Slide length with no limit beyond the board edge.
const UNLIMITED: i32 = i32::MAX;

/// How a piece kind moves.
enum Pattern {
    Slide(&'static [(i32, i32)], i32),
    Step { capture: bool },
    Leap,
    Hoplite,
}

fn pattern(piece: &Piece) -> Pattern {
    let slide = |dirs: &'static [(i32, i32)], range: i32| {
        Pattern::Slide(dirs, if piece.is_zombie { 1 } else { range })
    };
    match piece.kind {
        PieceKind::Monarch | PieceKind::Bomber => Pattern::Step { capture: true },
        PieceKind::Necromancer => Pattern::Step { capture: false },
        PieceKind::Duchess => slide(&ALL_DIRECTIONS, 5),
        PieceKind::RamTower => slide(&ORTHOGONAL, UNLIMITED),
        PieceKind::Chariot => slide(&DIAGONAL, UNLIMITED),
        PieceKind::Warlock => slide(&ALL_DIRECTIONS, 2),
        PieceKind::Paladin if piece.is_zombie => Pattern::Step { capture: true },
        PieceKind::Paladin => Pattern::Leap,
        PieceKind::Hoplite => Pattern::Hoplite,
    }
}

/// What a single landing square allows for a piece of `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    /// Empty or a mystery box: land, and keep sliding only if empty.
    Free { continues: bool },
    Capture,
    Blocked,
}

fn landing(board: &Board, pos: Position, color: Color) -> Landing {
    match board.get(pos) {
        None => Landing::Blocked,
        Some(Cell::Empty) => Landing::Free { continues: true },
        Some(Cell::Obstacle(ObstacleKind::MysteryBox)) => Landing::Free { continues: false },
        Some(Cell::Obstacle(_)) => Landing::Blocked,
        Some(Cell::Piece(p)) if p.color != color => Landing::Capture,
        Some(Cell::Piece(_)) => Landing::Blocked,
    }
}

/// Raw destinations for the piece at `pos`, ignoring frozen state and
/// tunnels. Empty if no piece stands there.
pub fn piece_moves(board: &Board, pos: Position) -> Vec<Position> {
    let piece = match board.piece_at(pos) {
        Some(p) => *p,
        None => return Vec::new(),
    };
    let mut out = Vec::new();

    match pattern(&piece) {
        Pattern::Slide(dirs, range) => {
            for &(dr, dc) in dirs {
                let mut cur = pos;
                let mut steps = 0;
                while steps < range {
                    cur = cur.offset(dr, dc);
                    steps += 1;
                    match landing(board, cur, piece.color) {
                        Landing::Free { continues } => {
                            out.push(cur);
                            if !continues {
                                break;
                            }
                        }
                        Landing::Capture => {
                            out.push(cur);
                            break;
                        }
                        Landing::Blocked => break,
                    }
                }
            }
        }
        Pattern::Step { capture } => {
            for &(dr, dc) in &ALL_DIRECTIONS {
                let to = pos.offset(dr, dc);
                match landing(board, to, piece.color) {
                    Landing::Free { .. } => out.push(to),
                    Landing::Capture if capture => out.push(to),
                    _ => {}
                }
            }
        }
        Pattern::Leap => {
            for &(dr, dc) in &KNIGHT_JUMPS {
                let to = pos.offset(dr, dc);
                if matches!(landing(board, to, piece.color), Landing::Free { .. } | Landing::Capture) {
                    out.push(to);
                }
            }
        }
        Pattern::Hoplite => {
            let fwd = piece.color.forward();
            let ahead = pos.offset(fwd, 0);
            if matches!(landing(board, ahead, piece.color), Landing::Free { .. }) {
                out.push(ahead);
            }
            for dc in [-1, 1] {
                let diag = pos.offset(fwd, dc);
                if landing(board, diag, piece.color) == Landing::Capture {
                    out.push(diag);
                }
            }
        }
    }
    out
}

/// Returns true when `from -> to` is a straight line in one of the eight
/// directions, so every intermediate square is crossed.
pub fn is_straight_line(from: Position, to: Position) -> bool {
    let dr = (to.row - from.row).abs();
    let dc = (to.col - from.col).abs();
    (dr == 0) != (dc == 0) || (dr == dc && dr != 0)
}

/// Squares crossed by the move `from -> to` on `board`, from the square
/// after `from` up to and including `to`. Only geometric slides cross
/// intermediate squares; steps, leaps, and tunnels touch the destination.
pub fn path_squares(board: &Board, from: Position, to: Position) -> Vec<Position> {
    let slides = match board.piece_at(from) {
        Some(piece) => matches!(pattern(piece), Pattern::Slide(..)),
        None => false,
    };
    if !slides || !is_straight_line(from, to) || !piece_moves(board, from).contains(&to) {
        return vec![to];
    }
    let dr = (to.row - from.row).signum();
    let dc = (to.col - from.col).signum();
    let mut out = Vec::new();
    let mut cur = from;
    while cur != to {
        cur = cur.offset(dr, dc);
        out.push(cur);
    }
    out
}
