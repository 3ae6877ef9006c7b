//! Player actions and the pure state reducer.
//!
//! [`reduce`] never mutates its input. Rule violations by the player are
//! no-ops reported through [`Commit::None`]; only structural failures of
//! the move contract surface as a [`RuleError`].

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Color, ObstacleKind, PieceId, PieceKind, Position};
use crate::mechanics::mystery::{self, cancel, choose_revive_piece, confirm_obstacle_selection, handle_selection};
use crate::mechanics::{
    apply_effects, execute_freeze, execute_swap, plan_revival, random_mystery_box_option, revivable_pieces,
    revive_zombie, roll_dice, thaw_pieces, valid_swap_targets, BoardEffect, MysteryBoxOption, MysteryBoxState,
    Transition,
};
use crate::movegen::{necromancer_freeze_targets, valid_attacks, valid_moves};
use crate::resolve::{check_game_over, make_move, MoveOutcome, RuleError};
use crate::search::BotMove;

use super::state::{AttackMode, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    SelectSquare(Position),
    SetAttackMode(AttackMode),
    /// Freeze the target with the selected Necromancer.
    Freeze(Position),
    ReviveZombie(PieceId),
    MysterySelect(Position),
    ChooseRevivePiece(PieceId),
    ConfirmObstacleSelection,
    CancelMysteryBox,
}

/// What kind of change an action produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Commit {
    /// Nothing changed.
    None,
    /// Selection or display state changed; no turn was played.
    Selection,
    /// A turn was completed.
    Turn,
    /// A move landed on a mystery box and opened a sequence.
    MysteryStarted,
    /// A mystery sequence advanced without finishing.
    MysteryStep,
    /// A mystery sequence finished or was cancelled; the turn passed.
    MysteryFinished,
}

impl Commit {
    pub const fn is_noop(self) -> bool {
        matches!(self, Commit::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduced {
    pub state: GameState,
    pub commit: Commit,
}

impl Reduced {
    fn noop(state: &GameState) -> Self {
        Reduced { state: state.clone(), commit: Commit::None }
    }
}

/// Applies `action` to `state`.
pub fn reduce(state: &GameState, action: Action, rng: &mut impl Rng) -> Result<Reduced, RuleError> {
    match action {
        Action::SelectSquare(pos) => select_square(state, pos, rng),
        Action::SetAttackMode(mode) => {
            if state.attack_mode == mode {
                return Ok(Reduced::noop(state));
            }
            let mut next = state.clone();
            next.attack_mode = mode;
            Ok(Reduced { state: next, commit: Commit::Selection })
        }
        Action::Freeze(target) => Ok(freeze(state, target)),
        Action::ReviveZombie(id) => Ok(revive(state, id)),
        Action::MysterySelect(pos) => {
            let result = handle_selection(&state.mystery, &state.board, state.current_player, pos);
            Ok(apply_transition(state, result))
        }
        Action::ChooseRevivePiece(id) => Ok(apply_transition(state, choose_revive_piece(&state.mystery, id))),
        Action::ConfirmObstacleSelection => Ok(apply_transition(state, confirm_obstacle_selection(&state.mystery))),
        Action::CancelMysteryBox => match cancel(&state.mystery) {
            Ok(inactive) => {
                let mut next = state.clone();
                next.mystery = inactive;
                end_turn(&mut next);
                Ok(Reduced { state: next, commit: Commit::MysteryFinished })
            }
            Err(e) => {
                debug!("cancel ignored: {}", e);
                Ok(Reduced::noop(state))
            }
        },
    }
}

fn accepts_input(state: &GameState) -> bool {
    !state.game_over && !state.mystery.is_active
}

fn select_square(state: &GameState, pos: Position, rng: &mut impl Rng) -> Result<Reduced, RuleError> {
    if !accepts_input(state) || !state.board.in_bounds(pos) {
        return Ok(Reduced::noop(state));
    }

    if let Some(selected) = state.selected_position {
        if state.valid_swaps.iter().any(|t| t.position == pos) {
            match execute_swap(&state.board, selected, pos) {
                Ok(board) => {
                    let mut next = state.clone();
                    next.board = board;
                    next.last_move = None;
                    end_turn(&mut next);
                    return Ok(Reduced { state: next, commit: Commit::Turn });
                }
                Err(e) => debug!("swap {} -> {} rejected: {}", selected, pos, e),
            }
        }

        let is_move = state.valid_moves.contains(&pos);
        let is_attack = state.valid_attacks.contains(&pos);
        if is_move || is_attack {
            let as_attack = match (is_move, is_attack) {
                (true, true) => state.attack_mode == AttackMode::Ranged,
                (_, attack) => attack,
            };
            return play_move(state, selected, pos, as_attack, rng);
        }

        if state.board.piece_at(pos).is_some_and(|p| p.color == state.current_player) {
            let mut next = state.clone();
            select_piece(&mut next, pos);
            return Ok(Reduced { state: next, commit: Commit::Selection });
        }

        let mut next = state.clone();
        next.clear_selection();
        return Ok(Reduced { state: next, commit: Commit::Selection });
    }

    if state.board.piece_at(pos).is_some_and(|p| p.color == state.current_player) {
        let mut next = state.clone();
        select_piece(&mut next, pos);
        return Ok(Reduced { state: next, commit: Commit::Selection });
    }
    Ok(Reduced::noop(state))
}

/// Selects the piece at `pos` and fills in its targets.
fn select_piece(state: &mut GameState, pos: Position) {
    let board = &state.board;
    state.valid_moves = valid_moves(board, pos);
    state.valid_attacks = valid_attacks(board, pos);
    state.valid_swaps = valid_swap_targets(board, pos);
    state.valid_freezes = match board.piece_at(pos) {
        Some(p) if p.kind == PieceKind::Necromancer => necromancer_freeze_targets(board, pos),
        _ => Vec::new(),
    };
    state.selected_position = Some(pos);
}

/// Records a move outcome in `state`: board, narcs, capture, history.
fn record_move(state: &mut GameState, outcome: MoveOutcome) {
    if let Some(victim) = outcome.mv.captured {
        state.captured.push(victim);
    }
    state.board = outcome.board;
    state.narcs = outcome.narcs;
    state.move_history.push(outcome.mv);
    state.last_move = Some(outcome.mv);
}

fn play_move(
    state: &GameState,
    from: Position,
    to: Position,
    is_attack: bool,
    rng: &mut impl Rng,
) -> Result<Reduced, RuleError> {
    let onto_box = !is_attack && state.board.obstacle_at(to) == Some(ObstacleKind::MysteryBox);
    let outcome = make_move(&state.board, from, to, is_attack, &state.narcs)?;
    let reached_box = onto_box && !outcome.mv.terminated_by_narc;

    let mut next = state.clone();
    record_move(&mut next, outcome);
    next.clear_selection();

    if reached_box {
        let current = next.current_player;
        let captured_enemy = next.captured.of(current.opponent()).to_vec();
        let option = random_mystery_box_option(&next.board, current, &captured_enemy, rng);
        let dice = match option {
            MysteryBoxOption::ObstacleSwap => Some(roll_dice(rng)),
            _ => None,
        };
        let revivable = match option {
            MysteryBoxOption::HopliteSacrifice => revivable_pieces(&captured_enemy),
            _ => Vec::new(),
        };
        debug!("{} opened a mystery box at {}: {:?}", current.name(), to, option);
        next.mystery = MysteryBoxState::start(option, to, dice, revivable);
        return Ok(Reduced { state: next, commit: Commit::MysteryStarted });
    }

    end_turn(&mut next);
    Ok(Reduced { state: next, commit: Commit::Turn })
}

fn freeze(state: &GameState, target: Position) -> Reduced {
    if !accepts_input(state) {
        return Reduced::noop(state);
    }
    let Some(necromancer) = state.selected_position else {
        return Reduced::noop(state);
    };
    if state.board.piece_at(necromancer).map(|p| p.color) != Some(state.current_player) {
        return Reduced::noop(state);
    }
    match execute_freeze(&state.board, necromancer, target) {
        Ok(board) => {
            let mut next = state.clone();
            next.board = board;
            end_turn(&mut next);
            Reduced { state: next, commit: Commit::Turn }
        }
        Err(e) => {
            debug!("freeze rejected: {}", e);
            Reduced::noop(state)
        }
    }
}

fn revive(state: &GameState, id: PieceId) -> Reduced {
    if !accepts_input(state) {
        return Reduced::noop(state);
    }
    let current = state.current_player;
    let captured_own = state.captured.of(current);
    let Some(piece) = captured_own.iter().find(|p| p.id == id).copied() else {
        debug!("revive ignored: {:?} is not among {}'s captured pieces", id, current.name());
        return Reduced::noop(state);
    };
    match plan_revival(&state.board, current, captured_own, &piece) {
        Ok((necromancer, target)) => {
            let mut next = state.clone();
            next.board = revive_zombie(&state.board, necromancer, &piece, target, current);
            next.captured.remove_by_id(current, id);
            end_turn(&mut next);
            Reduced { state: next, commit: Commit::Turn }
        }
        Err(e) => {
            debug!("revive rejected: {}", e);
            Reduced::noop(state)
        }
    }
}

fn apply_transition(state: &GameState, result: Result<Transition, mystery::MysteryError>) -> Reduced {
    let transition = match result {
        Ok(t) => t,
        Err(e) => {
            debug!("mystery action ignored: {}", e);
            return Reduced::noop(state);
        }
    };
    let mut next = state.clone();
    next.board = apply_effects(&state.board, &transition.effects);
    let opponent = state.current_player.opponent();
    for effect in &transition.effects {
        if let BoardEffect::RevivePiece { piece, .. } = effect {
            next.captured.remove_by_id(opponent, piece.id);
        }
    }
    next.mystery = transition.state;
    if transition.completed {
        end_turn(&mut next);
        return Reduced { state: next, commit: Commit::MysteryFinished };
    }
    Reduced { state: next, commit: Commit::MysteryStep }
}

/// Thaws the mover's pieces, passes the turn, and checks for a winner.
fn end_turn(state: &mut GameState) {
    let mover = state.current_player;
    state.board = thaw_pieces(&state.board, mover);
    state.current_player = mover.opponent();
    state.clear_selection();
    state.winner = check_game_over(&state.board, state.current_player);
    state.game_over = state.winner.is_some();
    if let Some(winner) = state.winner {
        info!("game over after {} moves: {} wins", state.move_history.len(), winner.name());
    }
}

/// Plays a bot move for the side to move. Mystery boxes reached by the
/// bot are consumed without effect.
pub fn apply_bot_move(state: &GameState, mv: BotMove) -> Result<GameState, RuleError> {
    let outcome = make_move(&state.board, mv.from, mv.to, mv.is_attack, &state.narcs)?;
    let mut next = state.clone();
    record_move(&mut next, outcome);
    end_turn(&mut next);
    Ok(next)
}

/// True when `color` is the side to move and no sequence blocks input.
pub fn is_awaiting(state: &GameState, color: Color) -> bool {
    accepts_input(state) && state.current_player == color
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, BoardSizeKey, Cell, Piece};
    use crate::mechanics::MysteryPhase;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn put(b: &mut Board, r: i32, c: i32, id: u32, kind: PieceKind, color: Color) {
        b.set(Position::new(r, c), Cell::Piece(Piece::new(PieceId(id), kind, color)));
    }

    fn monarchs() -> Board {
        let mut b = Board::empty(BoardSizeKey::Small.size());
        put(&mut b, 0, 0, 1, PieceKind::Monarch, Color::Black);
        put(&mut b, 11, 11, 2, PieceKind::Monarch, Color::White);
        b
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(5)
    }

    fn act(state: &GameState, action: Action) -> Reduced {
        reduce(state, action, &mut rng()).unwrap()
    }

    #[test]
    fn selecting_own_piece_fills_targets() {
        let mut b = monarchs();
        put(&mut b, 8, 5, 3, PieceKind::RamTower, Color::White);
        let state = GameState::new(b);
        let r = act(&state, Action::SelectSquare(Position::new(8, 5)));
        assert_eq!(r.commit, Commit::Selection);
        assert_eq!(r.state.selected_position, Some(Position::new(8, 5)));
        assert!(r.state.valid_moves.contains(&Position::new(0, 5)));
    }

    #[test]
    fn selecting_enemy_or_empty_is_noop() {
        let state = GameState::new(monarchs());
        assert_eq!(act(&state, Action::SelectSquare(Position::new(0, 0))).commit, Commit::None);
        assert_eq!(act(&state, Action::SelectSquare(Position::new(5, 5))).commit, Commit::None);
        assert_eq!(act(&state, Action::SelectSquare(Position::new(-1, 5))).commit, Commit::None);
    }

    #[test]
    fn move_passes_turn_and_records_history() {
        let mut b = monarchs();
        put(&mut b, 8, 5, 3, PieceKind::RamTower, Color::White);
        let state = GameState::new(b);
        let s = act(&state, Action::SelectSquare(Position::new(8, 5))).state;
        let r = act(&s, Action::SelectSquare(Position::new(4, 5)));
        assert_eq!(r.commit, Commit::Turn);
        assert_eq!(r.state.current_player, Color::Black);
        assert_eq!(r.state.move_history.len(), 1);
        assert_eq!(r.state.selected_position, None);
        assert!(r.state.board.piece_at(Position::new(4, 5)).is_some());
        // input state untouched
        assert_eq!(state.current_player, Color::White);
    }

    #[test]
    fn clicking_elsewhere_clears_selection() {
        let mut b = monarchs();
        put(&mut b, 8, 5, 3, PieceKind::Hoplite, Color::White);
        let s = act(&GameState::new(b), Action::SelectSquare(Position::new(8, 5))).state;
        let r = act(&s, Action::SelectSquare(Position::new(2, 2)));
        assert_eq!(r.commit, Commit::Selection);
        assert_eq!(r.state.selected_position, None);
        assert_eq!(r.state.current_player, Color::White);
    }

    #[test]
    fn capture_is_recorded_under_victim_colour() {
        let mut b = monarchs();
        put(&mut b, 8, 5, 3, PieceKind::RamTower, Color::White);
        put(&mut b, 4, 5, 4, PieceKind::Paladin, Color::Black);
        let s = act(&GameState::new(b), Action::SelectSquare(Position::new(8, 5))).state;
        let r = act(&s, Action::SelectSquare(Position::new(4, 5)));
        assert_eq!(r.state.captured.black.len(), 1);
        assert!(r.state.captured.white.is_empty());
    }

    #[test]
    fn attack_mode_decides_dual_targets() {
        let mut b = monarchs();
        put(&mut b, 6, 5, 3, PieceKind::Bomber, Color::White);
        put(&mut b, 5, 5, 4, PieceKind::Hoplite, Color::Black);
        let selected = act(&GameState::new(b), Action::SelectSquare(Position::new(6, 5))).state;
        let target = Position::new(5, 5);
        assert!(selected.valid_moves.contains(&target));
        assert!(selected.valid_attacks.contains(&target));

        let ranged = act(&selected, Action::SelectSquare(target)).state;
        assert!(ranged.last_move.unwrap().is_attack);
        assert!(ranged.board.piece_at(Position::new(6, 5)).is_some());

        let melee_mode = act(&selected, Action::SetAttackMode(AttackMode::Melee)).state;
        let melee = act(&melee_mode, Action::SelectSquare(target)).state;
        assert!(!melee.last_move.unwrap().is_attack);
        assert_eq!(melee.board.piece_at(target).map(|p| p.kind), Some(PieceKind::Bomber));
    }

    #[test]
    fn capturing_the_monarch_ends_the_game() {
        let mut b = monarchs();
        put(&mut b, 5, 0, 3, PieceKind::RamTower, Color::White);
        let s = act(&GameState::new(b), Action::SelectSquare(Position::new(5, 0))).state;
        let r = act(&s, Action::SelectSquare(Position::new(0, 0)));
        assert!(r.state.game_over);
        assert_eq!(r.state.winner, Some(Color::White));
        assert_eq!(act(&r.state, Action::SelectSquare(Position::new(11, 11))).commit, Commit::None);
    }

    #[test]
    fn warlock_swap_passes_turn() {
        let mut b = monarchs();
        put(&mut b, 9, 3, 3, PieceKind::Warlock, Color::White);
        let s = act(&GameState::new(b), Action::SelectSquare(Position::new(9, 3))).state;
        assert!(s.valid_swaps.iter().any(|t| t.position == Position::new(11, 11)));
        let r = act(&s, Action::SelectSquare(Position::new(11, 11)));
        assert_eq!(r.commit, Commit::Turn);
        assert_eq!(r.state.board.piece_at(Position::new(9, 3)).map(|p| p.kind), Some(PieceKind::Monarch));
        assert_eq!(r.state.last_move, None);
    }

    #[test]
    fn freeze_then_thaw_after_owner_turn() {
        let mut b = monarchs();
        put(&mut b, 6, 6, 3, PieceKind::Necromancer, Color::White);
        put(&mut b, 4, 6, 4, PieceKind::Paladin, Color::Black);
        put(&mut b, 1, 9, 5, PieceKind::Hoplite, Color::Black);
        let s = act(&GameState::new(b), Action::SelectSquare(Position::new(6, 6))).state;
        assert!(s.valid_freezes.contains(&Position::new(4, 6)));
        let frozen = act(&s, Action::Freeze(Position::new(4, 6)));
        assert_eq!(frozen.commit, Commit::Turn);
        assert!(frozen.state.board.piece_at(Position::new(4, 6)).unwrap().frozen);
        assert!(valid_moves(&frozen.state.board, Position::new(4, 6)).is_empty());

        // Black plays its Hoplite; the Paladin thaws at the end of that turn.
        let s = act(&frozen.state, Action::SelectSquare(Position::new(1, 9))).state;
        let after = act(&s, Action::SelectSquare(Position::new(2, 9))).state;
        assert!(!after.board.piece_at(Position::new(4, 6)).unwrap().frozen);
    }

    #[test]
    fn freeze_without_necromancer_selected_is_noop() {
        let mut b = monarchs();
        put(&mut b, 4, 6, 4, PieceKind::Paladin, Color::Black);
        let state = GameState::new(b);
        assert_eq!(act(&state, Action::Freeze(Position::new(4, 6))).commit, Commit::None);
    }

    #[test]
    fn mystery_box_opens_sequence_without_passing_turn() {
        let mut b = monarchs();
        put(&mut b, 8, 5, 3, PieceKind::RamTower, Color::White);
        put(&mut b, 9, 9, 4, PieceKind::Paladin, Color::White);
        b.set(Position::new(5, 5), Cell::Obstacle(ObstacleKind::MysteryBox));
        let s = act(&GameState::new(b), Action::SelectSquare(Position::new(8, 5))).state;
        assert!(s.valid_moves.contains(&Position::new(5, 5)));
        let r = act(&s, Action::SelectSquare(Position::new(5, 5)));
        assert_eq!(r.commit, Commit::MysteryStarted);
        assert_eq!(r.state.current_player, Color::White);
        assert!(r.state.mystery.is_active);
        assert_eq!(r.state.board.piece_at(Position::new(5, 5)).map(|p| p.kind), Some(PieceKind::RamTower));
        // Board clicks are routed to the sequence only.
        assert_eq!(act(&r.state, Action::SelectSquare(Position::new(9, 9))).commit, Commit::None);

        let cancelled = act(&r.state, Action::CancelMysteryBox);
        assert_eq!(cancelled.commit, Commit::MysteryFinished);
        assert!(!cancelled.state.mystery.is_active);
        assert_eq!(cancelled.state.current_player, Color::Black);
    }

    #[test]
    fn figure_swap_sequence_completes_turn() {
        let mut b = monarchs();
        put(&mut b, 5, 5, 3, PieceKind::RamTower, Color::White);
        put(&mut b, 9, 9, 4, PieceKind::Paladin, Color::White);
        let mut state = GameState::new(b);
        state.mystery = MysteryBoxState::start(MysteryBoxOption::FigureSwap, Position::new(5, 5), None, Vec::new());

        let step = act(&state, Action::MysterySelect(Position::new(5, 5)));
        assert_eq!(step.commit, Commit::MysteryStep);
        assert_eq!(step.state.mystery.phase, Some(MysteryPhase::WaitingSecondFigure));
        let done = act(&step.state, Action::MysterySelect(Position::new(9, 9)));
        assert_eq!(done.commit, Commit::MysteryFinished);
        assert_eq!(done.state.board.piece_at(Position::new(5, 5)).map(|p| p.kind), Some(PieceKind::Paladin));
        assert_eq!(done.state.current_player, Color::Black);
    }

    #[test]
    fn mystery_revival_removes_from_enemy_captures() {
        let mut b = monarchs();
        put(&mut b, 8, 2, 3, PieceKind::Hoplite, Color::White);
        let mut state = GameState::new(b);
        let lost = Piece::new(PieceId(40), PieceKind::Chariot, Color::Black);
        state.captured.push(lost);
        state.mystery = MysteryBoxState::start(
            MysteryBoxOption::HopliteSacrifice,
            Position::new(5, 5),
            None,
            revivable_pieces(state.captured.of(Color::Black)),
        );

        let s = act(&state, Action::MysterySelect(Position::new(8, 2))).state;
        assert!(s.board.is_empty_at(Position::new(8, 2)));
        let s = act(&s, Action::ChooseRevivePiece(PieceId(40))).state;
        let done = act(&s, Action::MysterySelect(Position::new(7, 7)));
        assert_eq!(done.commit, Commit::MysteryFinished);
        let revived = done.state.board.piece_at(Position::new(7, 7)).unwrap();
        assert_eq!((revived.kind, revived.color), (PieceKind::Chariot, Color::White));
        assert!(done.state.captured.black.is_empty());
    }

    #[test]
    fn zombie_revival_consumes_captured_entry() {
        let mut rng = rng();
        let mut state = GameState::new_game(BoardSizeKey::Small, &mut rng);
        let home = crate::mechanics::zombie::starting_position(state.board_size, PieceKind::Chariot, Color::White).unwrap();
        let chariot = *state.board.piece_at(home).unwrap();
        state.board.set(home, Cell::Empty);
        state.captured.push(chariot);

        let r = act(&state, Action::ReviveZombie(chariot.id));
        assert_eq!(r.commit, Commit::Turn);
        assert!(r.state.captured.white.is_empty());
        let zombie = r.state.board.piece_at(home).unwrap();
        assert!(zombie.is_zombie);
        assert_eq!(r.state.current_player, Color::Black);

        assert_eq!(act(&state, Action::ReviveZombie(PieceId(9999))).commit, Commit::None);
    }

    #[test]
    fn bot_move_passes_turn() {
        let mut b = monarchs();
        put(&mut b, 3, 4, 3, PieceKind::Chariot, Color::Black);
        let mut state = GameState::new(b);
        state.current_player = Color::Black;
        let mv = BotMove { from: Position::new(3, 4), to: Position::new(4, 4), is_attack: false };
        let next = apply_bot_move(&state, mv).unwrap();
        assert_eq!(next.current_player, Color::White);
        assert_eq!(next.last_move.map(|m| m.to), Some(Position::new(4, 4)));
        assert!(is_awaiting(&next, Color::White));

        let bad = BotMove { from: Position::new(6, 6), to: Position::new(7, 7), is_attack: false };
        assert!(matches!(apply_bot_move(&state, bad), Err(RuleError::NoPieceAtSource(_))));
    }
}
