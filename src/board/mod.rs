//! Board representation.
//!
//! Contains the grid, piece and obstacle types, and initial board
//! generation.

pub mod grid;
pub mod piece;
pub mod setup;

pub use grid::{attack_piece, move_piece, Board, BoardSize, BoardSizeKey, Cell, Position};
pub use piece::{Color, ObstacleKind, Piece, PieceId, PieceKind, PieceRules};
pub use setup::{
    back_row_for_cols, create_initial_board, create_initial_board_with_report, is_protected_zone,
    place_formation, PlacementEntry, PlacementReport, BACK_ROW_PIECES, OBSTACLE_COUNTS,
};
