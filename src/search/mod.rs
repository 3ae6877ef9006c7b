//! Search and move selection.
//!
//! Depth-limited alpha-beta minimax plus the three bot tiers and the hint
//! engine built on it.

pub mod bot;
pub mod minimax;

pub use bot::{
    candidate_moves, choose_move, get_bot_move, get_hint_move, score_candidates, BotMove, Difficulty,
    ScoredMove,
};
pub use minimax::{minimax, SearchStats, SEARCH_DEPTH};
