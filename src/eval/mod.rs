//! Position evaluation.
//!
//! Scores a board as material plus centrality, from Black's perspective.

pub mod heuristic;

pub use heuristic::{centrality_bonus, evaluate, evaluate_for};
