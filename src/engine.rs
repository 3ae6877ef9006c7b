//! Game session management.
//!
//! A `Session` holds the current game, its undo stack, the session options,
//! and the random source. The text front end drives one session; the
//! [`crate::registry::SessionRegistry`] drives many.

use std::io::{self, Write};

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardSizeKey, Color};
use crate::game::{apply_bot_move, is_awaiting, reduce, Action, Commit, GameState};
use crate::mechanics::Narc;
use crate::protocol::{format_diagram, format_status};
use crate::resolve::RuleError;
use crate::search::{get_bot_move, get_hint_move, BotMove, Difficulty};

/// Errors surfaced by a session or the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session is busy")]
    Busy,

    #[error("unknown session '{0}'")]
    UnknownSession(String),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value {value:?} for option '{name}'")]
    InvalidOption { name: String, value: Option<String> },
}

/// Options of a session. `board_size` applies from the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub board_size: BoardSizeKey,
    pub bot_enabled: bool,
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            board_size: BoardSizeKey::Small,
            bot_enabled: false,
            difficulty: Difficulty::default(),
            seed: None,
        }
    }
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_entropy(),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Some(true),
        "false" | "off" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// A bot search detached from its session. The session stays locked out
/// for player actions until the reply is handed back.
#[derive(Debug, Clone)]
pub struct BotSearch {
    ticket: u64,
    board: Board,
    narcs: Vec<Narc>,
    difficulty: Difficulty,
    rng: SmallRng,
}

impl BotSearch {
    pub fn run(mut self) -> BotReply {
        let mv = get_bot_move(&self.board, &self.narcs, self.difficulty, &mut self.rng);
        BotReply { ticket: self.ticket, mv }
    }
}

/// The outcome of a [`BotSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotReply {
    ticket: u64,
    pub mv: Option<BotMove>,
}

pub struct Session {
    state: GameState,
    history: Vec<GameState>,
    /// State before the move that opened the running mystery sequence.
    pending: Option<GameState>,
    config: SessionConfig,
    rng: SmallRng,
    /// Set between `begin_bot_turn` and `finish_bot_turn`.
    bot_thinking: bool,
    bot_ticket: u64,
    last_hint: Option<BotMove>,
}

impl Session {
    /// Creates a session and deals its first board.
    pub fn new(config: SessionConfig) -> Self {
        let mut rng = seeded_rng(config.seed);
        let state = GameState::new_game(config.board_size, &mut rng);
        Session {
            state,
            history: Vec::new(),
            pending: None,
            config,
            rng,
            bot_thinking: false,
            bot_ticket: 0,
            last_hint: None,
        }
    }

    /// A session over a prepared state, e.g. one parsed from a diagram.
    pub fn with_state(config: SessionConfig, state: GameState) -> Self {
        Session {
            state,
            history: Vec::new(),
            pending: None,
            config,
            rng: seeded_rng(config.seed),
            bot_thinking: false,
            bot_ticket: 0,
            last_hint: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn last_hint(&self) -> Option<BotMove> {
        self.last_hint
    }

    pub fn is_bot_thinking(&self) -> bool {
        self.bot_thinking
    }

    /// Starts a new game, optionally switching the board size.
    pub fn reset(&mut self, size: Option<BoardSizeKey>) {
        if let Some(key) = size {
            self.config.board_size = key;
        }
        self.state = GameState::new_game(self.config.board_size, &mut self.rng);
        self.history.clear();
        self.pending = None;
        self.last_hint = None;
        self.bot_thinking = false;
        info!("new {} game (bot {}, {})", self.config.board_size.name(), self.config.bot_enabled, self.config.difficulty);
    }

    /// Sets a session option by name: `Bot`, `Difficulty`, `BoardSize`, or `Seed`.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), SessionError> {
        let invalid = || SessionError::InvalidOption {
            name: name.to_string(),
            value: value.map(str::to_string),
        };
        match name.to_ascii_lowercase().as_str() {
            "bot" => self.config.bot_enabled = value.and_then(parse_bool).ok_or_else(invalid)?,
            "difficulty" => self.config.difficulty = value.and_then(Difficulty::from_name).ok_or_else(invalid)?,
            "boardsize" => self.config.board_size = value.and_then(BoardSizeKey::from_name).ok_or_else(invalid)?,
            "seed" => {
                let seed = match value {
                    None => None,
                    Some(v) => Some(v.parse::<u64>().map_err(|_| invalid())?),
                };
                self.config.seed = seed;
                self.rng = seeded_rng(seed);
            }
            _ => return Err(SessionError::UnknownOption(name.to_string())),
        }
        debug!("option {} set to {:?}", name, value);
        Ok(())
    }

    /// Applies a player action. Actions are ignored while the bot owns the
    /// turn.
    pub fn dispatch(&mut self, action: Action) -> Result<Commit, SessionError> {
        if self.bot_thinking {
            return Err(SessionError::Busy);
        }
        if self.config.bot_enabled && self.state.current_player == Color::Black {
            debug!("{:?} ignored: bot to move", action);
            return Ok(Commit::None);
        }

        let reduced = reduce(&self.state, action, &mut self.rng)?;
        let prior = std::mem::replace(&mut self.state, reduced.state);
        match reduced.commit {
            Commit::Turn => self.history.push(prior),
            Commit::MysteryStarted => self.pending = Some(prior),
            Commit::MysteryFinished => {
                let snapshot = self.pending.take().unwrap_or(prior);
                self.history.push(snapshot);
            }
            Commit::None | Commit::Selection | Commit::MysteryStep => {}
        }
        if matches!(reduced.commit, Commit::Turn | Commit::MysteryStarted | Commit::MysteryFinished) {
            self.last_hint = None;
        }
        Ok(reduced.commit)
    }

    pub fn can_undo(&self) -> bool {
        if self.history.is_empty() || self.state.mystery.is_active || self.bot_thinking {
            return false;
        }
        !self.config.bot_enabled || self.state.current_player == Color::White
    }

    /// Restores the state before the last player action.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        match self.history.pop() {
            Some(mut previous) => {
                previous.clear_selection();
                self.state = previous;
                self.last_hint = None;
                true
            }
            None => false,
        }
    }

    pub fn can_hint(&self) -> bool {
        !self.bot_thinking && is_awaiting(&self.state, Color::White)
    }

    /// Suggests a move for White.
    pub fn hint(&mut self) -> Option<BotMove> {
        if !self.can_hint() {
            return None;
        }
        self.last_hint = get_hint_move(&self.state.board, &self.state.narcs);
        self.last_hint
    }

    /// Plays Black's turn when the bot is enabled and it is Black to move.
    /// Bot turns do not push undo snapshots.
    pub fn play_bot_turn(&mut self) -> Result<Option<BotMove>, SessionError> {
        match self.begin_bot_turn() {
            Some(search) => self.finish_bot_turn(search.run()),
            None => Ok(None),
        }
    }

    /// Hands out Black's search and rejects player actions until the reply
    /// comes back. `None` when the bot is off, not to move, or already
    /// thinking.
    pub fn begin_bot_turn(&mut self) -> Option<BotSearch> {
        if self.bot_thinking || !self.config.bot_enabled || !is_awaiting(&self.state, Color::Black) {
            return None;
        }
        self.bot_thinking = true;
        self.bot_ticket += 1;
        Some(BotSearch {
            ticket: self.bot_ticket,
            board: self.state.board.clone(),
            narcs: self.state.narcs.clone(),
            difficulty: self.config.difficulty,
            rng: SmallRng::seed_from_u64(self.rng.gen()),
        })
    }

    /// Applies a bot reply. Replies to a search the session no longer
    /// waits for (after a reset, say) are dropped.
    pub fn finish_bot_turn(&mut self, reply: BotReply) -> Result<Option<BotMove>, SessionError> {
        if !self.bot_thinking || reply.ticket != self.bot_ticket {
            debug!("stale bot reply dropped");
            return Ok(None);
        }
        self.bot_thinking = false;
        if let Some(mv) = reply.mv {
            self.state = apply_bot_move(&self.state, mv)?;
            self.last_hint = None;
        }
        Ok(reply.mv)
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    pub fn handle_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", format_status(&self.state))?;
        out.flush()
    }

    pub fn handle_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "board {}", format_diagram(&self.state.board))?;
        out.flush()
    }

    /// Writes the full game state as one line of JSON.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = serde_json::to_string(&self.state).map_err(io::Error::other)?;
        writeln!(out, "state {}", json)?;
        out.flush()
    }

    pub fn handle_hint<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.hint() {
            Some(mv) => writeln!(out, "hint {}", describe(mv))?,
            None => writeln!(out, "hint none")?,
        }
        out.flush()
    }

    /// Handles `go`: plays the bot turn and reports the move.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.play_bot_turn() {
            Ok(Some(mv)) => writeln!(out, "bestmove {}", describe(mv))?,
            Ok(None) => writeln!(out, "bestmove none")?,
            Err(e) => {
                warn!("go: {}", e);
                return Ok(());
            }
        }
        self.handle_status(out)
    }
}

/// `<r> <c> <r> <c>`, with a trailing `attack` for ranged attacks.
fn describe(mv: BotMove) -> String {
    if mv.is_attack {
        format!("{} {} attack", mv.from, mv.to)
    } else {
        format!("{} {}", mv.from, mv.to)
    }
}
