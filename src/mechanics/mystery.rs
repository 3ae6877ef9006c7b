//! Mystery-box state machine.
//!
//! Landing on a mystery box opens a multi-step sequence. Each phase has
//! its own transition function returning the next [`MysteryBoxState`] plus
//! the board effects to apply. The caller applies the effects, and passes
//! the turn once a transition reports `completed`.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Color, ObstacleKind, Piece, PieceId, PieceKind, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MysteryBoxOption {
    FigureSwap,
    HopliteSacrifice,
    ObstacleSwap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MysteryPhase {
    WaitingFirstFigure,
    WaitingSecondFigure,
    WaitingHopliteSacrifice,
    WaitingReviveFigure,
    WaitingRevivePlacement,
    WaitingObstacleSelection,
    WaitingEmptyTileSelection,
}

impl MysteryPhase {
    pub const fn name(self) -> &'static str {
        match self {
            MysteryPhase::WaitingFirstFigure => "first_figure",
            MysteryPhase::WaitingSecondFigure => "second_figure",
            MysteryPhase::WaitingHopliteSacrifice => "hoplite_sacrifice",
            MysteryPhase::WaitingReviveFigure => "revive_figure",
            MysteryPhase::WaitingRevivePlacement => "revive_placement",
            MysteryPhase::WaitingObstacleSelection => "obstacle_selection",
            MysteryPhase::WaitingEmptyTileSelection => "empty_tile_selection",
        }
    }
}

/// Progress of an in-flight mystery-box sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MysteryBoxState {
    pub is_active: bool,
    pub option: Option<MysteryBoxOption>,
    pub phase: Option<MysteryPhase>,
    pub trigger_position: Option<Position>,
    pub dice_roll: Option<u8>,
    pub first_figure_position: Option<Position>,
    pub selected_obstacles: Vec<Position>,
    pub selected_empty_tiles: Vec<Position>,
    pub revivable_pieces: Vec<Piece>,
    pub selected_revive_piece: Option<Piece>,
}

impl Default for MysteryBoxState {
    fn default() -> Self {
        MysteryBoxState::inactive()
    }
}

impl MysteryBoxState {
    pub fn inactive() -> Self {
        MysteryBoxState {
            is_active: false,
            option: None,
            phase: None,
            trigger_position: None,
            dice_roll: None,
            first_figure_position: None,
            selected_obstacles: Vec::new(),
            selected_empty_tiles: Vec::new(),
            revivable_pieces: Vec::new(),
            selected_revive_piece: None,
        }
    }

    /// Opens a sequence for `option` triggered at `trigger`.
    pub fn start(option: MysteryBoxOption, trigger: Position, dice_roll: Option<u8>, revivable: Vec<Piece>) -> Self {
        MysteryBoxState {
            is_active: true,
            option: Some(option),
            phase: Some(phase_for_option(option)),
            trigger_position: Some(trigger),
            dice_roll,
            revivable_pieces: revivable,
            ..MysteryBoxState::inactive()
        }
    }
}

/// A board change requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEffect {
    SwapFigures { first: Position, second: Position },
    SacrificeHoplite(Position),
    RevivePiece { piece: Piece, target: Position, color: Color },
    SwapObstacles { obstacles: Vec<Position>, empty_tiles: Vec<Position> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: MysteryBoxState,
    pub effects: Vec<BoardEffect>,
    pub completed: bool,
}

impl Transition {
    fn pending(state: MysteryBoxState) -> Self {
        Transition { state, effects: Vec::new(), completed: false }
    }

    fn with_effect(state: MysteryBoxState, effect: BoardEffect) -> Self {
        Transition { state, effects: vec![effect], completed: false }
    }

    fn complete(effect: BoardEffect) -> Self {
        Transition { state: MysteryBoxState::inactive(), effects: vec![effect], completed: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MysteryError {
    #[error("no mystery box sequence is active")]
    Inactive,

    #[error("action does not apply to the current phase")]
    WrongPhase,

    #[error("{0} does not hold one of your pieces")]
    NotOwnPiece(Position),

    #[error("cannot swap a piece with itself")]
    SamePiece,

    #[error("{0} does not hold one of your hoplites")]
    NotOwnHoplite(Position),

    #[error("piece is not revivable")]
    NotRevivable,

    #[error("{0} is not an empty tile")]
    NotEmpty(Position),

    #[error("{0} is not a selectable obstacle")]
    NotSelectableObstacle(Position),

    #[error("selection is already full")]
    SelectionFull,

    #[error("no obstacle selected")]
    NothingSelected,
}

pub const DICE_SIDES: u8 = 6;

/// Rolls a six-sided die.
pub fn roll_dice(rng: &mut impl Rng) -> u8 {
    rng.gen_range(1..=DICE_SIDES)
}

/// Options usable by `current` on `board` given the enemy pieces it has
/// captured.
pub fn available_options(board: &Board, current: Color, captured_enemy: &[Piece]) -> Vec<MysteryBoxOption> {
    let mut options = vec![MysteryBoxOption::FigureSwap];
    let has_hoplite = board.pieces_of(current).any(|(_, p)| p.kind == PieceKind::Hoplite);
    if has_hoplite && !captured_enemy.is_empty() {
        options.push(MysteryBoxOption::HopliteSacrifice);
    }
    if board.cells().any(|(pos, _)| is_selectable_obstacle(board, pos)) {
        options.push(MysteryBoxOption::ObstacleSwap);
    }
    options
}

/// Draws uniformly from [`available_options`].
pub fn random_mystery_box_option(
    board: &Board,
    current: Color,
    captured_enemy: &[Piece],
    rng: &mut impl Rng,
) -> MysteryBoxOption {
    available_options(board, current, captured_enemy)
        .choose(rng)
        .copied()
        .unwrap_or(MysteryBoxOption::FigureSwap)
}

/// Enemy pieces the current player may bring back through a sacrifice.
pub fn revivable_pieces(captured_enemy: &[Piece]) -> Vec<Piece> {
    captured_enemy.to_vec()
}

pub const fn phase_for_option(option: MysteryBoxOption) -> MysteryPhase {
    match option {
        MysteryBoxOption::FigureSwap => MysteryPhase::WaitingFirstFigure,
        MysteryBoxOption::HopliteSacrifice => MysteryPhase::WaitingHopliteSacrifice,
        MysteryBoxOption::ObstacleSwap => MysteryPhase::WaitingObstacleSelection,
    }
}

pub fn remove_mystery_box(board: &Board, pos: Position) -> Board {
    let mut next = board.clone();
    if board.obstacle_at(pos) == Some(ObstacleKind::MysteryBox) {
        next.set(pos, Cell::Empty);
    }
    next
}

/// Any obstacle except a mystery box.
pub fn is_selectable_obstacle(board: &Board, pos: Position) -> bool {
    matches!(board.obstacle_at(pos), Some(kind) if kind != ObstacleKind::MysteryBox)
}

pub fn execute_figure_swap(board: &Board, first: Position, second: Position) -> Board {
    let mut next = board.clone();
    next.set(first, board.cell(second));
    next.set(second, board.cell(first));
    next
}

pub fn execute_hoplite_sacrifice(board: &Board, pos: Position) -> Board {
    let mut next = board.clone();
    next.set(pos, Cell::Empty);
    next
}

/// Places `piece` at `target` as a zombie of `color`.
pub fn execute_revive_piece(board: &Board, piece: &Piece, target: Position, color: Color) -> Board {
    let mut next = board.clone();
    next.set(
        target,
        Cell::Piece(Piece { color, is_zombie: true, has_moved: false, frozen: false, ..*piece }),
    );
    next
}

/// Moves each selected obstacle onto the empty tile at the same index.
pub fn execute_obstacle_swap(board: &Board, obstacles: &[Position], empty_tiles: &[Position]) -> Board {
    let mut next = board.clone();
    for (&from, &to) in obstacles.iter().zip(empty_tiles) {
        next.set(to, board.cell(from));
        next.set(from, Cell::Empty);
    }
    next
}

/// Applies transition effects in order.
pub fn apply_effects(board: &Board, effects: &[BoardEffect]) -> Board {
    effects.iter().fold(board.clone(), |b, effect| match effect {
        BoardEffect::SwapFigures { first, second } => execute_figure_swap(&b, *first, *second),
        BoardEffect::SacrificeHoplite(pos) => execute_hoplite_sacrifice(&b, *pos),
        BoardEffect::RevivePiece { piece, target, color } => execute_revive_piece(&b, piece, *target, *color),
        BoardEffect::SwapObstacles { obstacles, empty_tiles } => execute_obstacle_swap(&b, obstacles, empty_tiles),
    })
}

fn require_phase(state: &MysteryBoxState, phase: MysteryPhase) -> Result<(), MysteryError> {
    if !state.is_active {
        return Err(MysteryError::Inactive);
    }
    if state.phase != Some(phase) {
        return Err(MysteryError::WrongPhase);
    }
    Ok(())
}

fn own_piece(board: &Board, current: Color, pos: Position) -> Result<Piece, MysteryError> {
    board
        .piece_at(pos)
        .filter(|p| p.color == current)
        .copied()
        .ok_or(MysteryError::NotOwnPiece(pos))
}

pub fn select_first_figure(
    state: &MysteryBoxState,
    board: &Board,
    current: Color,
    pos: Position,
) -> Result<Transition, MysteryError> {
    require_phase(state, MysteryPhase::WaitingFirstFigure)?;
    own_piece(board, current, pos)?;
    Ok(Transition::pending(MysteryBoxState {
        phase: Some(MysteryPhase::WaitingSecondFigure),
        first_figure_position: Some(pos),
        ..state.clone()
    }))
}

pub fn select_second_figure(
    state: &MysteryBoxState,
    board: &Board,
    current: Color,
    pos: Position,
) -> Result<Transition, MysteryError> {
    require_phase(state, MysteryPhase::WaitingSecondFigure)?;
    own_piece(board, current, pos)?;
    let first = state.first_figure_position.ok_or(MysteryError::WrongPhase)?;
    if first == pos {
        return Err(MysteryError::SamePiece);
    }
    Ok(Transition::complete(BoardEffect::SwapFigures { first, second: pos }))
}

pub fn select_hoplite_sacrifice(
    state: &MysteryBoxState,
    board: &Board,
    current: Color,
    pos: Position,
) -> Result<Transition, MysteryError> {
    require_phase(state, MysteryPhase::WaitingHopliteSacrifice)?;
    match board.piece_at(pos) {
        Some(p) if p.color == current && p.kind == PieceKind::Hoplite => {}
        _ => return Err(MysteryError::NotOwnHoplite(pos)),
    }
    Ok(Transition::with_effect(
        MysteryBoxState {
            phase: Some(MysteryPhase::WaitingReviveFigure),
            first_figure_position: Some(pos),
            ..state.clone()
        },
        BoardEffect::SacrificeHoplite(pos),
    ))
}

/// Picks a captured enemy piece by id.
pub fn choose_revive_piece(state: &MysteryBoxState, id: PieceId) -> Result<Transition, MysteryError> {
    require_phase(state, MysteryPhase::WaitingReviveFigure)?;
    let piece = state
        .revivable_pieces
        .iter()
        .find(|p| p.id == id)
        .copied()
        .ok_or(MysteryError::NotRevivable)?;
    Ok(Transition::pending(MysteryBoxState {
        phase: Some(MysteryPhase::WaitingRevivePlacement),
        selected_revive_piece: Some(piece),
        ..state.clone()
    }))
}

pub fn place_revived_piece(
    state: &MysteryBoxState,
    board: &Board,
    current: Color,
    pos: Position,
) -> Result<Transition, MysteryError> {
    require_phase(state, MysteryPhase::WaitingRevivePlacement)?;
    let piece = state.selected_revive_piece.ok_or(MysteryError::NotRevivable)?;
    if !board.is_empty_at(pos) {
        return Err(MysteryError::NotEmpty(pos));
    }
    Ok(Transition::complete(BoardEffect::RevivePiece { piece, target: pos, color: current }))
}

/// Toggles an obstacle in the selection; advances once the die count is reached.
pub fn toggle_obstacle(state: &MysteryBoxState, board: &Board, pos: Position) -> Result<Transition, MysteryError> {
    require_phase(state, MysteryPhase::WaitingObstacleSelection)?;
    if !is_selectable_obstacle(board, pos) {
        return Err(MysteryError::NotSelectableObstacle(pos));
    }
    let limit = state.dice_roll.unwrap_or(0) as usize;
    let mut next = state.clone();
    if let Some(i) = next.selected_obstacles.iter().position(|&p| p == pos) {
        next.selected_obstacles.remove(i);
        return Ok(Transition::pending(next));
    }
    if next.selected_obstacles.len() >= limit {
        return Err(MysteryError::SelectionFull);
    }
    next.selected_obstacles.push(pos);
    if next.selected_obstacles.len() == limit {
        next.phase = Some(MysteryPhase::WaitingEmptyTileSelection);
    }
    Ok(Transition::pending(next))
}

/// Advances to empty-tile selection with fewer obstacles than rolled.
pub fn confirm_obstacle_selection(state: &MysteryBoxState) -> Result<Transition, MysteryError> {
    require_phase(state, MysteryPhase::WaitingObstacleSelection)?;
    if state.selected_obstacles.is_empty() {
        return Err(MysteryError::NothingSelected);
    }
    Ok(Transition::pending(MysteryBoxState {
        phase: Some(MysteryPhase::WaitingEmptyTileSelection),
        ..state.clone()
    }))
}

/// Toggles an empty tile; completes once it matches the obstacle count.
pub fn toggle_empty_tile(state: &MysteryBoxState, board: &Board, pos: Position) -> Result<Transition, MysteryError> {
    require_phase(state, MysteryPhase::WaitingEmptyTileSelection)?;
    if !board.is_empty_at(pos) {
        return Err(MysteryError::NotEmpty(pos));
    }
    let limit = state.selected_obstacles.len();
    let mut next = state.clone();
    if let Some(i) = next.selected_empty_tiles.iter().position(|&p| p == pos) {
        next.selected_empty_tiles.remove(i);
        return Ok(Transition::pending(next));
    }
    if next.selected_empty_tiles.len() >= limit {
        return Err(MysteryError::SelectionFull);
    }
    next.selected_empty_tiles.push(pos);
    if next.selected_empty_tiles.len() == limit {
        return Ok(Transition::complete(BoardEffect::SwapObstacles {
            obstacles: next.selected_obstacles,
            empty_tiles: next.selected_empty_tiles,
        }));
    }
    Ok(Transition::pending(next))
}

/// Routes a board click to the transition for the current phase.
pub fn handle_selection(
    state: &MysteryBoxState,
    board: &Board,
    current: Color,
    pos: Position,
) -> Result<Transition, MysteryError> {
    if !state.is_active {
        return Err(MysteryError::Inactive);
    }
    match state.phase {
        Some(MysteryPhase::WaitingFirstFigure) => select_first_figure(state, board, current, pos),
        Some(MysteryPhase::WaitingSecondFigure) => select_second_figure(state, board, current, pos),
        Some(MysteryPhase::WaitingHopliteSacrifice) => select_hoplite_sacrifice(state, board, current, pos),
        Some(MysteryPhase::WaitingRevivePlacement) => place_revived_piece(state, board, current, pos),
        Some(MysteryPhase::WaitingObstacleSelection) => toggle_obstacle(state, board, pos),
        Some(MysteryPhase::WaitingEmptyTileSelection) => toggle_empty_tile(state, board, pos),
        Some(MysteryPhase::WaitingReviveFigure) | None => Err(MysteryError::WrongPhase),
    }
}

/// Abandons the sequence.
pub fn cancel(state: &MysteryBoxState) -> Result<MysteryBoxState, MysteryError> {
    if !state.is_active {
        return Err(MysteryError::Inactive);
    }
    Ok(MysteryBoxState::inactive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSizeKey;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn piece(id: u32, kind: PieceKind, color: Color) -> Cell {
        Cell::Piece(Piece::new(PieceId(id), kind, color))
    }

    fn board() -> Board {
        let mut b = Board::empty(BoardSizeKey::Small.size());
        b.set(Position::new(10, 0), piece(1, PieceKind::Hoplite, Color::White));
        b.set(Position::new(11, 6), piece(2, PieceKind::Monarch, Color::White));
        b.set(Position::new(0, 6), piece(3, PieceKind::Monarch, Color::Black));
        b.set(Position::new(5, 5), Cell::Obstacle(ObstacleKind::Rock));
        b.set(Position::new(6, 2), Cell::Obstacle(ObstacleKind::Tree));
        b.set(Position::new(4, 8), Cell::Obstacle(ObstacleKind::MysteryBox));
        b
    }

    #[test]
    fn dice_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..200 {
            let roll = roll_dice(&mut rng);
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn options_depend_on_material() {
        let b = board();
        assert_eq!(
            available_options(&b, Color::White, &[]),
            vec![MysteryBoxOption::FigureSwap, MysteryBoxOption::ObstacleSwap]
        );
        let captured = [Piece::new(PieceId(9), PieceKind::Chariot, Color::Black)];
        assert_eq!(available_options(&b, Color::White, &captured).len(), 3);
        // Black has no hoplites.
        assert_eq!(available_options(&b, Color::Black, &captured).len(), 2);

        let mut bare = Board::empty(BoardSizeKey::Small.size());
        bare.set(Position::new(4, 8), Cell::Obstacle(ObstacleKind::MysteryBox));
        assert_eq!(available_options(&bare, Color::White, &[]), vec![MysteryBoxOption::FigureSwap]);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(random_mystery_box_option(&bare, Color::White, &[], &mut rng), MysteryBoxOption::FigureSwap);
    }

    #[test]
    fn figure_swap_sequence() {
        let b = board();
        let state = MysteryBoxState::start(MysteryBoxOption::FigureSwap, Position::new(4, 8), None, Vec::new());
        assert_eq!(
            select_first_figure(&state, &b, Color::White, Position::new(0, 6)),
            Err(MysteryError::NotOwnPiece(Position::new(0, 6)))
        );
        let t = handle_selection(&state, &b, Color::White, Position::new(10, 0)).unwrap();
        assert!(!t.completed);
        assert_eq!(t.state.phase, Some(MysteryPhase::WaitingSecondFigure));
        assert_eq!(
            handle_selection(&t.state, &b, Color::White, Position::new(10, 0)),
            Err(MysteryError::SamePiece)
        );
        let done = handle_selection(&t.state, &b, Color::White, Position::new(11, 6)).unwrap();
        assert!(done.completed);
        assert!(!done.state.is_active);
        let after = apply_effects(&b, &done.effects);
        assert_eq!(after.piece_at(Position::new(10, 0)).map(|p| p.kind), Some(PieceKind::Monarch));
        assert_eq!(after.piece_at(Position::new(11, 6)).map(|p| p.kind), Some(PieceKind::Hoplite));
    }

    #[test]
    fn hoplite_sacrifice_sequence() {
        let b = board();
        let victim = Piece::new(PieceId(9), PieceKind::Chariot, Color::Black);
        let state = MysteryBoxState::start(
            MysteryBoxOption::HopliteSacrifice,
            Position::new(4, 8),
            None,
            revivable_pieces(&[victim]),
        );
        assert_eq!(
            handle_selection(&state, &b, Color::White, Position::new(11, 6)),
            Err(MysteryError::NotOwnHoplite(Position::new(11, 6)))
        );
        let t = handle_selection(&state, &b, Color::White, Position::new(10, 0)).unwrap();
        assert_eq!(t.effects, vec![BoardEffect::SacrificeHoplite(Position::new(10, 0))]);
        let b = apply_effects(&b, &t.effects);
        assert!(b.is_empty_at(Position::new(10, 0)));

        assert_eq!(handle_selection(&t.state, &b, Color::White, Position::new(7, 7)), Err(MysteryError::WrongPhase));
        assert_eq!(choose_revive_piece(&t.state, PieceId(77)), Err(MysteryError::NotRevivable));
        let picked = choose_revive_piece(&t.state, PieceId(9)).unwrap();
        assert_eq!(picked.state.phase, Some(MysteryPhase::WaitingRevivePlacement));
        assert_eq!(
            handle_selection(&picked.state, &b, Color::White, Position::new(5, 5)),
            Err(MysteryError::NotEmpty(Position::new(5, 5)))
        );
        let done = handle_selection(&picked.state, &b, Color::White, Position::new(7, 7)).unwrap();
        assert!(done.completed);
        let after = apply_effects(&b, &done.effects);
        let revived = after.piece_at(Position::new(7, 7)).unwrap();
        assert_eq!(revived.color, Color::White);
        assert!(revived.is_zombie);
        assert_eq!(revived.id, PieceId(9));
    }

    #[test]
    fn obstacle_selection_toggles_and_fills() {
        let b = board();
        let state = MysteryBoxState::start(MysteryBoxOption::ObstacleSwap, Position::new(4, 8), Some(2), Vec::new());
        assert_eq!(
            toggle_obstacle(&state, &b, Position::new(4, 8)),
            Err(MysteryError::NotSelectableObstacle(Position::new(4, 8)))
        );
        let t = toggle_obstacle(&state, &b, Position::new(5, 5)).unwrap();
        assert_eq!(t.state.selected_obstacles, vec![Position::new(5, 5)]);
        let t = toggle_obstacle(&t.state, &b, Position::new(5, 5)).unwrap();
        assert!(t.state.selected_obstacles.is_empty());
        assert_eq!(confirm_obstacle_selection(&t.state), Err(MysteryError::NothingSelected));

        let t = toggle_obstacle(&t.state, &b, Position::new(5, 5)).unwrap();
        let t = toggle_obstacle(&t.state, &b, Position::new(6, 2)).unwrap();
        assert_eq!(t.state.phase, Some(MysteryPhase::WaitingEmptyTileSelection));

        let e = toggle_empty_tile(&t.state, &b, Position::new(7, 7)).unwrap();
        let e = toggle_empty_tile(&e.state, &b, Position::new(7, 7)).unwrap();
        assert!(e.state.selected_empty_tiles.is_empty());
        let e = toggle_empty_tile(&e.state, &b, Position::new(7, 7)).unwrap();
        let done = toggle_empty_tile(&e.state, &b, Position::new(8, 8)).unwrap();
        assert!(done.completed);
        let after = apply_effects(&b, &done.effects);
        assert_eq!(after.obstacle_at(Position::new(7, 7)), Some(ObstacleKind::Rock));
        assert_eq!(after.obstacle_at(Position::new(8, 8)), Some(ObstacleKind::Tree));
        assert!(after.is_empty_at(Position::new(5, 5)));
        assert!(after.is_empty_at(Position::new(6, 2)));
    }

    #[test]
    fn overflow_is_rejected() {
        let b = board();
        let state = MysteryBoxState::start(MysteryBoxOption::ObstacleSwap, Position::new(4, 8), Some(1), Vec::new());
        let t = toggle_obstacle(&state, &b, Position::new(5, 5)).unwrap();
        // One rolled, one selected: the phase advanced on its own.
        assert_eq!(t.state.phase, Some(MysteryPhase::WaitingEmptyTileSelection));
        assert_eq!(toggle_obstacle(&t.state, &b, Position::new(6, 2)), Err(MysteryError::WrongPhase));

        let state = MysteryBoxState::start(MysteryBoxOption::ObstacleSwap, Position::new(4, 8), Some(3), Vec::new());
        let t = toggle_obstacle(&state, &b, Position::new(5, 5)).unwrap();
        let t = confirm_obstacle_selection(&t.state).unwrap();
        let mut filled = t.state.clone();
        filled.selected_empty_tiles = vec![Position::new(7, 7)];
        assert_eq!(toggle_empty_tile(&filled, &b, Position::new(8, 8)), Err(MysteryError::SelectionFull));
    }

    #[test]
    fn cancel_resets() {
        let state = MysteryBoxState::start(MysteryBoxOption::FigureSwap, Position::new(4, 8), None, Vec::new());
        assert_eq!(cancel(&state), Ok(MysteryBoxState::inactive()));
        assert_eq!(cancel(&MysteryBoxState::inactive()), Err(MysteryError::Inactive));
    }

    #[test]
    fn remove_box_only_touches_boxes() {
        let b = board();
        let cleared = remove_mystery_box(&b, Position::new(4, 8));
        assert!(cleared.is_empty_at(Position::new(4, 8)));
        let same = remove_mystery_box(&b, Position::new(5, 5));
        assert_eq!(same, b);
    }
}
