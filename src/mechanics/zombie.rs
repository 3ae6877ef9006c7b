//! Necromancer zombie revival.
//!
//! A Necromancer brings back one of its side's captured RamTowers,
//! Chariots, Bombers, or Paladins as a zombie. The Warlock, Monarch, and
//! Duchess must still stand unmoved on their starting squares.

use crate::board::{back_row_for_cols, Board, BoardSize, Cell, Color, Piece, PieceKind, Position};

pub const ZOMBIE_ELIGIBLE_KINDS: [PieceKind; 4] =
    [PieceKind::RamTower, PieceKind::Chariot, PieceKind::Bomber, PieceKind::Paladin];

/// Pieces that must be in formation for a revival.
pub const REVIVAL_GUARDS: [PieceKind; 3] = [PieceKind::Warlock, PieceKind::Monarch, PieceKind::Duchess];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviveError {
    #[error("no necromancer on the board")]
    NoNecromancer,

    #[error("warlock, monarch, and duchess must be in their starting positions and must not have moved")]
    GuardsNotInPlace,

    #[error("piece is not among the revivable captured pieces")]
    NotRevivable,

    #[error("no empty tile available to place the zombie")]
    NoPlacement,
}

pub fn is_zombie_eligible(kind: PieceKind) -> bool {
    ZOMBIE_ELIGIBLE_KINDS.contains(&kind)
}

/// Starting square of the first back-row occurrence of `kind`.
pub fn starting_position(size: BoardSize, kind: PieceKind, color: Color) -> Option<Position> {
    let col = back_row_for_cols(size.cols).iter().position(|&k| k == kind)?;
    let row = match color {
        Color::White => size.rows - 1,
        Color::Black => 0,
    };
    Some(Position::new(row, col as i32))
}

/// True when every guard of `color` stands unmoved on its starting square.
pub fn revival_guards_in_place(board: &Board, color: Color) -> bool {
    REVIVAL_GUARDS.iter().all(|&kind| {
        starting_position(board.size(), kind, color)
            .and_then(|pos| board.piece_at(pos))
            .is_some_and(|p| p.kind == kind && p.color == color && !p.has_moved)
    })
}

/// Captured pieces of `color` that a Necromancer can revive.
pub fn revivable_zombies(captured_own: &[Piece]) -> Vec<Piece> {
    captured_own.iter().copied().filter(|p| is_zombie_eligible(p.kind)).collect()
}

/// Where a revived piece lands: its formation square if empty, otherwise
/// the nearest empty cell by Manhattan distance (lowest row, then column).
pub fn revive_placement_target(board: &Board, kind: PieceKind, color: Color) -> Option<Position> {
    let home = starting_position(board.size(), kind, color)?;
    if board.is_empty_at(home) {
        return Some(home);
    }
    board
        .cells()
        .filter(|(_, c)| c.is_empty())
        .map(|(pos, _)| pos)
        .min_by_key(|pos| (pos.manhattan(home), pos.row, pos.col))
}

/// Places `piece` as a zombie of `color` at `target` and bumps the
/// Necromancer's revive count.
pub fn revive_zombie(board: &Board, necromancer: Position, piece: &Piece, target: Position, color: Color) -> Board {
    let mut next = board.clone();
    if let Some(necro) = next.piece_mut(necromancer).filter(|p| p.kind == PieceKind::Necromancer) {
        necro.revive_count += 1;
    }
    next.set(
        target,
        Cell::Piece(Piece { color, is_zombie: true, has_moved: false, frozen: false, ..*piece }),
    );
    next
}

/// Checks every revival precondition and returns the placement square.
pub fn plan_revival(board: &Board, color: Color, captured_own: &[Piece], piece: &Piece) -> Result<(Position, Position), ReviveError> {
    let necromancer = board.find_piece(PieceKind::Necromancer, color).ok_or(ReviveError::NoNecromancer)?;
    if !revival_guards_in_place(board, color) {
        return Err(ReviveError::GuardsNotInPlace);
    }
    if !revivable_zombies(captured_own).iter().any(|p| p.id == piece.id) {
        return Err(ReviveError::NotRevivable);
    }
    let target = revive_placement_target(board, piece.kind, color).ok_or(ReviveError::NoPlacement)?;
    Ok((necromancer, target))
}
