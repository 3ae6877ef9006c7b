//! Move application and game-end detection.

pub mod apply;
pub mod terminal;

pub use apply::{make_move, Move, MoveOutcome, RuleError};
pub use terminal::{check_game_over, find_monarch, is_monarch_captured, is_monarch_threatened};
