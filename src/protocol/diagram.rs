//! Board diagram encoding and decoding.
//!
//! A diagram is a compact one-line picture of the board, inspired by chess
//! FEN: rows from 0 to the last, separated by `/`, one character per cell.
//!
//! - Pieces use their kind letter, uppercase for White and lowercase for
//!   Black (`M D R C P N W B H`).
//! - Obstacles: `#` cave, `^` tree, `*` rock, `~` river, `%` lake,
//!   `=` canyon, `?` mystery box.
//! - `.` is an empty cell.
//!
//! Parsed pieces are fresh and unmoved, numbered in row-major order from 1.

use crate::board::{Board, BoardSize, Cell, Color, ObstacleKind, Piece, PieceId, PieceKind, Position};

/// Errors that can occur during diagram parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagramError {
    #[error("diagram is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },

    #[error("invalid cell character '{ch}' at row {row}, column {col}")]
    InvalidCell { ch: char, row: usize, col: usize },
}

fn parse_cell(ch: char, id: &mut u32) -> Option<Cell> {
    if ch == '.' {
        return Some(Cell::Empty);
    }
    if let Some(kind) = ObstacleKind::from_symbol(ch) {
        return Some(Cell::Obstacle(kind));
    }
    let kind = PieceKind::from_letter(ch)?;
    let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
    *id += 1;
    Some(Cell::Piece(Piece::new(PieceId(*id), kind, color)))
}

/// Parses a diagram string into a board.
pub fn parse_diagram(s: &str) -> Result<Board, DiagramError> {
    let rows: Vec<&str> = s.trim().split('/').collect();
    let cols = rows.first().map_or(0, |r| r.chars().count());
    if cols == 0 {
        return Err(DiagramError::Empty);
    }

    let mut board = Board::empty(BoardSize { rows: rows.len() as i32, cols: cols as i32 });
    let mut id = 0;
    for (r, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != cols {
            return Err(DiagramError::RaggedRow { row: r, found, expected: cols });
        }
        for (c, ch) in row.chars().enumerate() {
            let cell = parse_cell(ch, &mut id).ok_or(DiagramError::InvalidCell { ch, row: r, col: c })?;
            board.set(Position::new(r as i32, c as i32), cell);
        }
    }
    Ok(board)
}

/// Encodes a board as a diagram string.
pub fn format_diagram(board: &Board) -> String {
    let mut out = String::with_capacity(board.size().cell_count() + board.rows() as usize);
    for r in 0..board.rows() {
        if r > 0 {
            out.push('/');
        }
        for c in 0..board.cols() {
            out.push(board.cell(Position::new(r, c)).symbol());
        }
    }
    out
}
