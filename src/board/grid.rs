//! Grid representation.
//!
//! A board is a row-major vector of cells sized by a [`BoardSize`]. Cells
//! are an explicit sum type, so every cell is exactly one of empty, a
//! piece, or an obstacle.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::piece::{Color, ObstacleKind, Piece, PieceId, PieceKind};

/// A grid coordinate. Signed so that off-board offsets are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Position { row: self.row + dr, col: self.col + dc }
    }

    pub fn manhattan(self, other: Position) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub fn chebyshev(self, other: Position) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }

    /// The four orthogonal neighbours, right/down/left/up.
    pub fn orthogonal_neighbors(self) -> [Position; 4] {
        [
            self.offset(0, 1),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(-1, 0),
        ]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// Named board configurations offered at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardSizeKey {
    #[serde(rename = "12x12")]
    Small,
    #[serde(rename = "12x16")]
    Medium,
    #[serde(rename = "12x20")]
    Large,
}

impl BoardSizeKey {
    pub const fn size(self) -> BoardSize {
        match self {
            BoardSizeKey::Small => BoardSize { rows: 12, cols: 12 },
            BoardSizeKey::Medium => BoardSize { rows: 12, cols: 16 },
            BoardSizeKey::Large => BoardSize { rows: 12, cols: 20 },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BoardSizeKey::Small => "12x12",
            BoardSizeKey::Medium => "12x16",
            BoardSizeKey::Large => "12x20",
        }
    }

    pub fn from_name(s: &str) -> Option<BoardSizeKey> {
        match s {
            "12x12" => Some(BoardSizeKey::Small),
            "12x16" => Some(BoardSizeKey::Medium),
            "12x20" => Some(BoardSizeKey::Large),
            _ => None,
        }
    }

    /// Maps an arbitrary size to the closest configuration by column count.
    pub fn for_size(size: BoardSize) -> BoardSizeKey {
        match size.cols {
            20 => BoardSizeKey::Large,
            16 => BoardSizeKey::Medium,
            _ => BoardSizeKey::Small,
        }
    }
}

/// Board dimensions; fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    pub rows: i32,
    pub cols: i32,
}

impl BoardSize {
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    pub const fn cell_count(&self) -> usize {
        (self.rows * self.cols) as usize
    }
}

/// Content of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Cell {
    Empty,
    Piece(Piece),
    Obstacle(ObstacleKind),
}

impl Cell {
    pub const fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub const fn piece(&self) -> Option<&Piece> {
        match self {
            Cell::Piece(p) => Some(p),
            _ => None,
        }
    }

    pub const fn obstacle(&self) -> Option<ObstacleKind> {
        match self {
            Cell::Obstacle(o) => Some(*o),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Piece(p) => p.symbol(),
            Cell::Obstacle(o) => o.symbol(),
        }
    }
}

/// The playing grid. Cloning produces an independent deep copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board with every cell empty.
    pub fn empty(size: BoardSize) -> Self {
        Board { size, cells: vec![Cell::Empty; size.cell_count()] }
    }

    pub const fn size(&self) -> BoardSize {
        self.size
    }

    pub const fn rows(&self) -> i32 {
        self.size.rows
    }

    pub const fn cols(&self) -> i32 {
        self.size.cols
    }

    pub const fn in_bounds(&self, pos: Position) -> bool {
        self.size.contains(pos)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.row * self.size.cols + pos.col) as usize)
        } else {
            None
        }
    }

    /// Returns the cell at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Returns the cell at `pos`, treating off-board as empty.
    pub fn cell(&self, pos: Position) -> Cell {
        self.get(pos).copied().unwrap_or(Cell::Empty)
    }

    /// Overwrites the cell at `pos`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Mutable access to a piece, if one stands at `pos`.
    pub fn piece_mut(&mut self, pos: Position) -> Option<&mut Piece> {
        let i = self.index(pos)?;
        match &mut self.cells[i] {
            Cell::Piece(p) => Some(p),
            _ => None,
        }
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.get(pos).and_then(Cell::piece)
    }

    pub fn obstacle_at(&self, pos: Position) -> Option<ObstacleKind> {
        self.get(pos).and_then(Cell::obstacle)
    }

    pub fn is_blocked_by_obstacle(&self, pos: Position) -> bool {
        self.obstacle_at(pos).is_some()
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Cell::Empty))
    }

    /// Iterates over every position with its cell, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        let cols = self.size.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (Position::new(i as i32 / cols, i as i32 % cols), c))
    }

    /// Iterates over every piece with its position, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.cells().filter_map(|(pos, c)| c.piece().map(|p| (pos, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// All positions holding a piece of the given kind, either colour.
    pub fn find_pieces(&self, kind: PieceKind) -> Vec<Position> {
        self.pieces().filter(|(_, p)| p.kind == kind).map(|(pos, _)| pos).collect()
    }

    /// First position (row-major) of a piece of the given kind and colour.
    pub fn find_piece(&self, kind: PieceKind, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.kind == kind && p.color == color)
            .map(|(pos, _)| pos)
    }

    pub fn find_piece_by_id(&self, id: PieceId) -> Option<Position> {
        self.pieces().find(|(_, p)| p.id == id).map(|(pos, _)| pos)
    }

    pub fn find_caves(&self) -> Vec<Position> {
        self.find_obstacles(ObstacleKind::Cave)
    }

    pub fn find_obstacles(&self, kind: ObstacleKind) -> Vec<Position> {
        self.cells()
            .filter(|(_, c)| c.obstacle() == Some(kind))
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn count_obstacles(&self) -> usize {
        self.cells.iter().filter(|c| c.obstacle().is_some()).count()
    }

    pub fn count_pieces(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    /// Largest piece id on the board, used to continue id allocation.
    pub fn max_piece_id(&self) -> u32 {
        self.pieces().map(|(_, p)| p.id.0).max().unwrap_or(0)
    }
}

/// Returns a copy of the board with the piece at `from` moved to `to`.
pub fn move_piece(board: &Board, from: Position, to: Position) -> Board {
    let mut next = board.clone();
    if let Some(piece) = board.piece_at(from) {
        next.set(to, Cell::Piece(Piece { has_moved: true, ..*piece }));
        next.set(from, Cell::Empty);
    }
    next
}

/// Returns a copy of the board with the target square cleared.
pub fn attack_piece(board: &Board, target: Position) -> Board {
    let mut next = board.clone();
    next.set(target, Cell::Empty);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> BoardSize {
        BoardSizeKey::Small.size()
    }

    #[test]
    fn bounds_checks() {
        let board = Board::empty(small());
        assert!(board.in_bounds(Position::new(0, 0)));
        assert!(board.in_bounds(Position::new(11, 11)));
        assert!(!board.in_bounds(Position::new(-1, 0)));
        assert!(!board.in_bounds(Position::new(0, 12)));
        assert!(board.get(Position::new(12, 0)).is_none());
        assert_eq!(board.cell(Position::new(12, 0)), Cell::Empty);
    }

    #[test]
    fn size_keys_have_twelve_rows() {
        for key in [BoardSizeKey::Small, BoardSizeKey::Medium, BoardSizeKey::Large] {
            assert_eq!(key.size().rows, 12);
            assert_eq!(BoardSizeKey::from_name(key.name()), Some(key));
            assert_eq!(BoardSizeKey::for_size(key.size()), key);
        }
    }

    #[test]
    fn clone_is_independent() {
        let mut board = Board::empty(small());
        let pos = Position::new(4, 4);
        board.set(pos, Cell::Piece(Piece::new(PieceId(1), PieceKind::Duchess, Color::White)));
        let mut copy = board.clone();
        assert_eq!(copy, board);
        copy.set(pos, Cell::Obstacle(ObstacleKind::Rock));
        assert_eq!(board.piece_at(pos).map(|p| p.kind), Some(PieceKind::Duchess));
        assert_ne!(copy, board);
    }

    #[test]
    fn obstacle_queries() {
        let mut board = Board::empty(small());
        board.set(Position::new(5, 5), Cell::Obstacle(ObstacleKind::Cave));
        board.set(Position::new(6, 2), Cell::Obstacle(ObstacleKind::Cave));
        assert!(board.is_blocked_by_obstacle(Position::new(5, 5)));
        assert!(!board.is_blocked_by_obstacle(Position::new(5, 6)));
        assert!(!board.is_blocked_by_obstacle(Position::new(-3, 5)));
        assert_eq!(board.find_caves(), vec![Position::new(5, 5), Position::new(6, 2)]);
        assert_eq!(board.count_obstacles(), 2);
    }

    #[test]
    fn move_piece_marks_moved_and_clears_source() {
        let mut board = Board::empty(small());
        let from = Position::new(10, 3);
        let to = Position::new(9, 3);
        board.set(from, Cell::Piece(Piece::new(PieceId(7), PieceKind::Hoplite, Color::White)));
        let next = move_piece(&board, from, to);
        assert!(next.is_empty_at(from));
        let moved = next.piece_at(to).unwrap();
        assert!(moved.has_moved);
        assert_eq!(moved.id, PieceId(7));
        // Input board untouched.
        assert!(board.piece_at(from).is_some());
    }

    #[test]
    fn attack_piece_clears_target() {
        let mut board = Board::empty(small());
        let target = Position::new(3, 3);
        board.set(target, Cell::Piece(Piece::new(PieceId(2), PieceKind::Bomber, Color::Black)));
        let next = attack_piece(&board, target);
        assert!(next.is_empty_at(target));
    }

    #[test]
    fn cells_iterate_row_major() {
        let board = Board::empty(small());
        let positions: Vec<Position> = board.cells().take(13).map(|(p, _)| p).collect();
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[11], Position::new(0, 11));
        assert_eq!(positions[12], Position::new(1, 0));
    }
}
