//! Bot move selection.
//!
//! Three difficulty tiers score every candidate move and attack of the
//! side to move, then pick from the top of the ranking. The hint engine
//! is the Hard tier run for White without randomness.

use std::fmt;

use log::debug;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Position};
use crate::eval::{centrality_bonus, evaluate_for};
use crate::mechanics::Narc;
use crate::movegen::legal_actions;
use crate::resolve::{is_monarch_threatened, make_move};

use super::minimax::{reply_value, SearchStats, SEARCH_DEPTH};

/// Candidates the Easy tier picks from.
pub const EASY_POOL: usize = 5;
/// Candidates the Medium tier picks from.
pub const MEDIUM_POOL: usize = 3;
/// Upper bound (exclusive) of the Easy tier's random jitter.
pub const EASY_JITTER: i32 = 10;
pub const EASY_THREAT_BONUS: i32 = 30;
pub const THREAT_BONUS: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_name(s: &str) -> Option<Difficulty> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate action: a move, or a ranged attack when `is_attack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BotMove {
    pub from: Position,
    pub to: Position,
    pub is_attack: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: BotMove,
    pub score: i32,
}

/// Every move and attack of `side`, in row-major order of the actor.
pub fn candidate_moves(board: &Board, side: Color) -> Vec<BotMove> {
    legal_actions(board, side)
        .into_iter()
        .map(|(from, to, is_attack)| BotMove { from, to, is_attack })
        .collect()
}

/// Features shared by all tiers for one candidate.
struct Applied {
    board: Board,
    narcs: Vec<Narc>,
    capture_value: i32,
    threatens: bool,
    centrality_delta: i32,
}

fn apply(board: &Board, narcs: &[Narc], side: Color, mv: BotMove) -> Option<Applied> {
    let piece = *board.piece_at(mv.from)?;
    let outcome = make_move(board, mv.from, mv.to, mv.is_attack, narcs).ok()?;
    let size = board.size();
    let centrality_delta = if mv.is_attack {
        0
    } else {
        centrality_bonus(outcome.mv.to, size, piece.kind) - centrality_bonus(mv.from, size, piece.kind)
    };
    Some(Applied {
        threatens: is_monarch_threatened(&outcome.board, side.opponent()),
        capture_value: outcome.mv.captured.map_or(0, |p| p.kind.value()),
        centrality_delta,
        board: outcome.board,
        narcs: outcome.narcs,
    })
}

fn hard_score(board: &Board, narcs: &[Narc], side: Color, mv: BotMove) -> Option<(i32, u64)> {
    let a = apply(board, narcs, side, mv)?;
    let mut stats = SearchStats::default();
    let mut score = reply_value(&a.board, &a.narcs, side, SEARCH_DEPTH, &mut stats);
    if a.threatens {
        score += THREAT_BONUS;
    }
    score += a.capture_value / 10;
    Some((score, stats.nodes))
}

/// Scores every candidate of `side` for `difficulty`, in candidate order.
pub fn score_candidates(
    board: &Board,
    narcs: &[Narc],
    side: Color,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Vec<ScoredMove> {
    let candidates = candidate_moves(board, side);
    match difficulty {
        Difficulty::Easy => candidates
            .into_iter()
            .filter_map(|mv| {
                let a = apply(board, narcs, side, mv)?;
                let mut score = a.capture_value + rng.gen_range(0..EASY_JITTER);
                if a.threatens {
                    score += EASY_THREAT_BONUS;
                }
                Some(ScoredMove { mv, score })
            })
            .collect(),
        Difficulty::Medium => candidates
            .into_iter()
            .filter_map(|mv| {
                let a = apply(board, narcs, side, mv)?;
                let mut score = a.capture_value * 10 + a.centrality_delta + evaluate_for(&a.board, side) / 10;
                if a.threatens {
                    score += THREAT_BONUS;
                }
                Some(ScoredMove { mv, score })
            })
            .collect(),
        Difficulty::Hard => score_hard(board, narcs, side, &candidates),
    }
}

/// Hard-tier scoring; candidates are searched in parallel.
fn score_hard(board: &Board, narcs: &[Narc], side: Color, candidates: &[BotMove]) -> Vec<ScoredMove> {
    let scored: Vec<(ScoredMove, u64)> = candidates
        .par_iter()
        .filter_map(|&mv| hard_score(board, narcs, side, mv).map(|(score, nodes)| (ScoredMove { mv, score }, nodes)))
        .collect();
    let nodes: u64 = scored.iter().map(|(_, n)| n).sum();
    debug!("hard search for {}: {} candidates, {} nodes", side.name(), scored.len(), nodes);
    scored.into_iter().map(|(s, _)| s).collect()
}

/// Sorts best-first; ties keep candidate order.
fn rank(mut scored: Vec<ScoredMove>) -> Vec<ScoredMove> {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

fn pool_size(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => EASY_POOL,
        Difficulty::Medium => MEDIUM_POOL,
        Difficulty::Hard => 1,
    }
}

/// Picks a move for `side` at the given difficulty.
pub fn choose_move(
    board: &Board,
    narcs: &[Narc],
    side: Color,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Option<BotMove> {
    let ranked = rank(score_candidates(board, narcs, side, difficulty, rng));
    if ranked.is_empty() {
        return None;
    }
    let pool = pool_size(difficulty).min(ranked.len());
    let pick = ranked[rng.gen_range(0..pool)];
    debug!(
        "{} bot ({}) picked {} -> {}{} score {} of {} candidates",
        side.name(),
        difficulty,
        pick.mv.from,
        pick.mv.to,
        if pick.mv.is_attack { " (attack)" } else { "" },
        pick.score,
        ranked.len()
    );
    Some(pick.mv)
}

/// The bot plays Black.
pub fn get_bot_move(board: &Board, narcs: &[Narc], difficulty: Difficulty, rng: &mut impl Rng) -> Option<BotMove> {
    choose_move(board, narcs, Color::Black, difficulty, rng)
}

/// Deterministic Hard-tier suggestion for White.
pub fn get_hint_move(board: &Board, narcs: &[Narc]) -> Option<BotMove> {
    let candidates = candidate_moves(board, Color::White);
    rank(score_hard(board, narcs, Color::White, &candidates)).first().map(|s| s.mv)
}
