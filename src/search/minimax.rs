//! Fixed-depth minimax with alpha-beta pruning.
//!
//! Black is the maximizing side and White the minimizing side, matching
//! the sign convention of [`crate::eval::evaluate`]. Special mechanics are
//! not searched; only plain moves and ranged attacks are expanded.

use crate::board::{Board, Color};
use crate::eval::evaluate;
use crate::mechanics::Narc;
use crate::movegen::legal_actions;
use crate::resolve::make_move;

/// Plies searched after a candidate move by the Hard tier.
pub const SEARCH_DEPTH: u32 = 2;

/// Search statistics for one root call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Minimax value of `board` with `depth` plies left. A side with no
/// actions, or depth zero, falls back to the static evaluation.
pub fn minimax(
    board: &Board,
    narcs: &[Narc],
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;
    if depth == 0 {
        return evaluate(board);
    }

    let side = if maximizing { Color::Black } else { Color::White };
    let mut best: Option<i32> = None;

    for (from, to, is_attack) in legal_actions(board, side) {
        let outcome = match make_move(board, from, to, is_attack, narcs) {
            Ok(o) => o,
            Err(_) => continue,
        };
        let score = minimax(&outcome.board, &outcome.narcs, depth - 1, alpha, beta, !maximizing, stats);

        if maximizing {
            best = Some(best.map_or(score, |b| b.max(score)));
            alpha = alpha.max(score);
        } else {
            best = Some(best.map_or(score, |b| b.min(score)));
            beta = beta.min(score);
        }
        if beta <= alpha {
            stats.cutoffs += 1;
            break;
        }
    }

    best.unwrap_or_else(|| evaluate(board))
}

/// Minimax value of `board` after `mover` has just moved, seen from
/// `mover`'s side.
pub fn reply_value(board: &Board, narcs: &[Narc], mover: Color, depth: u32, stats: &mut SearchStats) -> i32 {
    let opponent_maximizes = mover == Color::White;
    let value = minimax(board, narcs, depth, i32::MIN, i32::MAX, opponent_maximizes, stats);
    match mover {
        Color::Black => value,
        Color::White => -value,
    }
}
