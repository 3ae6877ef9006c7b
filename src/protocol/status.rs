//! The one-line `status` report sent after every state-changing command.

use crate::game::GameState;

/// `status turn <color> over <bool> winner <color|none> mystery <phase|none>`
pub fn format_status(state: &GameState) -> String {
    format!(
        "status turn {} over {} winner {} mystery {}",
        state.current_player.name(),
        state.game_over,
        state.winner.map_or("none", |c| c.name()),
        state.mystery.phase.map_or("none", |p| p.name()),
    )
}
