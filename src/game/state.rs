//! The full state of one game, as seen by a front end.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{create_initial_board, Board, BoardSize, BoardSizeKey, Color, Piece, PieceId, Position};
use crate::mechanics::{MysteryBoxState, Narc, SwapTarget};
use crate::resolve::Move;

/// How a square that is both a move and an attack target is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackMode {
    #[default]
    Ranged,
    Melee,
}

impl AttackMode {
    pub fn from_name(s: &str) -> Option<AttackMode> {
        match s.to_ascii_lowercase().as_str() {
            "ranged" => Some(AttackMode::Ranged),
            "melee" => Some(AttackMode::Melee),
            _ => None,
        }
    }
}

/// Captured pieces, keyed by the colour of the piece that was lost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPieces {
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
}

impl CapturedPieces {
    pub fn of(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn of_mut(&mut self, color: Color) -> &mut Vec<Piece> {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Records a lost piece under its own colour.
    pub fn push(&mut self, piece: Piece) {
        self.of_mut(piece.color).push(piece);
    }

    /// Removes the piece with `id` from `color`'s list, returning it.
    pub fn remove_by_id(&mut self, color: Color, id: PieceId) -> Option<Piece> {
        let list = self.of_mut(color);
        let idx = list.iter().position(|p| p.id == id)?;
        Some(list.remove(idx))
    }

    /// Capture points earned by `color` so far.
    pub fn score_for(&self, color: Color) -> u32 {
        self.of(color.opponent()).iter().map(Piece::points).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub board_size: BoardSize,
    pub current_player: Color,
    pub selected_position: Option<Position>,
    pub valid_moves: Vec<Position>,
    pub valid_attacks: Vec<Position>,
    pub valid_swaps: Vec<SwapTarget>,
    pub valid_freezes: Vec<Position>,
    pub move_history: Vec<Move>,
    pub captured: CapturedPieces,
    pub last_move: Option<Move>,
    pub game_over: bool,
    pub winner: Option<Color>,
    pub narcs: Vec<Narc>,
    pub attack_mode: AttackMode,
    pub mystery: MysteryBoxState,
}

impl GameState {
    /// A game on an existing board, with White to move.
    pub fn new(board: Board) -> Self {
        GameState {
            board_size: board.size(),
            board,
            current_player: Color::White,
            selected_position: None,
            valid_moves: Vec::new(),
            valid_attacks: Vec::new(),
            valid_swaps: Vec::new(),
            valid_freezes: Vec::new(),
            move_history: Vec::new(),
            captured: CapturedPieces::default(),
            last_move: None,
            game_over: false,
            winner: None,
            narcs: Vec::new(),
            attack_mode: AttackMode::default(),
            mystery: MysteryBoxState::inactive(),
        }
    }

    /// A fresh game with a generated board.
    pub fn new_game(key: BoardSizeKey, rng: &mut impl Rng) -> Self {
        GameState::new(create_initial_board(key.size(), rng))
    }

    pub fn clear_selection(&mut self) {
        self.selected_position = None;
        self.valid_moves.clear();
        self.valid_attacks.clear();
        self.valid_swaps.clear();
        self.valid_freezes.clear();
    }
}
