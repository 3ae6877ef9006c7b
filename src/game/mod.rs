//! Game state and the action reducer driving it.

pub mod reducer;
pub mod state;

pub use reducer::{apply_bot_move, is_awaiting, reduce, Action, Commit, Reduced};
pub use state::{AttackMode, CapturedPieces, GameState};
