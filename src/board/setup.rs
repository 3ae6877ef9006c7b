//! Initial board generation.
//!
//! Places the mirrored back-row formation and Hoplite rows, then scatters
//! terrain with a per-kind placement policy. Every policy works within a
//! fixed attempt budget and places fewer obstacles rather than failing
//! when the budget runs out.

use log::{debug, info};
use rand::Rng;

use super::grid::{Board, BoardSize, BoardSizeKey, Cell, Position};
use super::piece::{Color, ObstacleKind, Piece, PieceId, PieceKind};

/// Back row for a 12-column board, left to right.
pub const BACK_ROW_PIECES: [PieceKind; 12] = [
    PieceKind::RamTower,
    PieceKind::Paladin,
    PieceKind::Chariot,
    PieceKind::Bomber,
    PieceKind::Warlock,
    PieceKind::Duchess,
    PieceKind::Monarch,
    PieceKind::Necromancer,
    PieceKind::Bomber,
    PieceKind::Chariot,
    PieceKind::Paladin,
    PieceKind::RamTower,
];

/// Rows adjacent to each back line that never receive obstacles.
pub const PROTECTED_ROWS: i32 = 3;

/// Minimum distance (rows from the figure lines, Manhattan between caves).
pub const CAVE_MIN_DISTANCE: i32 = 4;

pub const CAVE_ATTEMPTS_PER_OBSTACLE: usize = 200;
pub const SHAPE_ATTEMPTS: usize = 150;
pub const CLUSTER_ATTEMPTS_PER_CELL: usize = 200;
pub const MYSTERY_BOX_ATTEMPTS_PER_BOX: usize = 100;

/// Obstacle counts per board configuration, in placement order.
pub const OBSTACLE_COUNTS: [(BoardSizeKey, [usize; 7]); 3] = [
    (BoardSizeKey::Small, [2, 4, 4, 4, 4, 3, 2]),
    (BoardSizeKey::Medium, [2, 5, 5, 5, 4, 4, 4]),
    (BoardSizeKey::Large, [3, 6, 6, 6, 5, 5, 4]),
];

/// Pairs each obstacle kind with its count for a configuration.
pub fn obstacle_counts(key: BoardSizeKey) -> [(ObstacleKind, usize); 7] {
    let counts = OBSTACLE_COUNTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, c)| *c)
        .unwrap_or([0; 7]);
    let mut out = [(ObstacleKind::Cave, 0); 7];
    for (i, kind) in ObstacleKind::ALL.into_iter().enumerate() {
        out[i] = (kind, counts[i]);
    }
    out
}

/// Requested versus placed obstacle counts from one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub entries: Vec<PlacementEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementEntry {
    pub kind: ObstacleKind,
    pub requested: usize,
    pub placed: usize,
}

impl PlacementReport {
    /// Total obstacles that could not be placed.
    pub fn shortfall(&self) -> usize {
        self.entries.iter().map(|e| e.requested.saturating_sub(e.placed)).sum()
    }

    pub fn placed(&self) -> usize {
        self.entries.iter().map(|e| e.placed).sum()
    }
}

/// Returns true for rows reserved next to either back line.
pub fn is_protected_zone(row: i32, rows: i32) -> bool {
    row < PROTECTED_ROWS || row >= rows - PROTECTED_ROWS
}

/// Back row for an arbitrary column count; wider boards pad Hoplites evenly.
pub fn back_row_for_cols(cols: i32) -> Vec<PieceKind> {
    let cols = cols.max(0) as usize;
    if cols == BACK_ROW_PIECES.len() {
        return BACK_ROW_PIECES.to_vec();
    }
    let extra = cols.saturating_sub(BACK_ROW_PIECES.len());
    let left_pad = extra / 2;
    let mut row = vec![PieceKind::Hoplite; left_pad];
    row.extend_from_slice(&BACK_ROW_PIECES);
    row.resize(cols, PieceKind::Hoplite);
    row.truncate(cols);
    row
}

/// Builds the opening position for a board size.
pub fn create_initial_board(size: BoardSize, rng: &mut impl Rng) -> Board {
    create_initial_board_with_report(size, rng).0
}

/// Builds the opening position and reports obstacle placement results.
pub fn create_initial_board_with_report(size: BoardSize, rng: &mut impl Rng) -> (Board, PlacementReport) {
    let mut board = place_formation(size);
    let report = place_obstacles(&mut board, BoardSizeKey::for_size(size), rng);
    debug!(
        "generated {}x{} board: {} obstacles placed, shortfall {}",
        size.rows,
        size.cols,
        report.placed(),
        report.shortfall()
    );
    (board, report)
}

/// Places both formations on an otherwise empty board.
pub fn place_formation(size: BoardSize) -> Board {
    let mut board = Board::empty(size);
    let back_row = back_row_for_cols(size.cols);
    let mut next_id = 0u32;
    let mut piece = |kind: PieceKind, color: Color| {
        next_id += 1;
        Cell::Piece(Piece::new(PieceId(next_id), kind, color))
    };

    for (col, &kind) in back_row.iter().enumerate() {
        board.set(Position::new(0, col as i32), piece(kind, Color::Black));
    }
    for col in 0..size.cols {
        board.set(Position::new(1, col), piece(PieceKind::Hoplite, Color::Black));
    }
    for col in 0..size.cols {
        board.set(Position::new(size.rows - 2, col), piece(PieceKind::Hoplite, Color::White));
    }
    for (col, &kind) in back_row.iter().enumerate() {
        board.set(Position::new(size.rows - 1, col as i32), piece(kind, Color::White));
    }
    board
}

/// Runs every placement policy in order and reports the outcome.
pub fn place_obstacles(board: &mut Board, key: BoardSizeKey, rng: &mut impl Rng) -> PlacementReport {
    let mut report = PlacementReport::default();
    for (kind, count) in obstacle_counts(key) {
        let placed = match kind {
            ObstacleKind::Cave => place_caves(board, count, rng),
            ObstacleKind::Lake => place_lake(board, count, rng),
            ObstacleKind::River | ObstacleKind::Canyon => place_linear(board, kind, count, rng),
            ObstacleKind::Tree | ObstacleKind::Rock => place_cluster(board, kind, count, rng),
            ObstacleKind::MysteryBox => place_mystery_boxes(board, count, rng),
        };
        if placed < count {
            info!("placed {}/{} {:?} obstacles", placed, count, kind);
        }
        report.entries.push(PlacementEntry { kind, requested: count, placed });
    }
    report
}

fn random_position(board: &Board, rng: &mut impl Rng) -> Position {
    Position::new(rng.gen_range(0..board.rows()), rng.gen_range(0..board.cols()))
}

fn is_free_open_cell(board: &Board, pos: Position) -> bool {
    board.is_empty_at(pos) && !is_protected_zone(pos.row, board.rows())
}

fn all_free(board: &Board, cells: &[Position]) -> bool {
    cells.iter().all(|&c| is_free_open_cell(board, c))
}

/// Caves keep away from the figure lines and from each other.
fn place_caves(board: &mut Board, count: usize, rng: &mut impl Rng) -> usize {
    let rows = board.rows();
    let min_row = CAVE_MIN_DISTANCE + 1;
    let max_row = rows - 2 - CAVE_MIN_DISTANCE;
    let mut placed: Vec<Position> = Vec::with_capacity(count);
    let budget = count * CAVE_ATTEMPTS_PER_OBSTACLE;

    for _ in 0..budget {
        if placed.len() >= count {
            break;
        }
        let pos = random_position(board, rng);
        if pos.row < min_row || pos.row > max_row {
            continue;
        }
        if !board.is_empty_at(pos) {
            continue;
        }
        if placed.iter().any(|&p| p.manhattan(pos) < CAVE_MIN_DISTANCE) {
            continue;
        }
        board.set(pos, Cell::Obstacle(ObstacleKind::Cave));
        placed.push(pos);
    }
    placed.len()
}

/// Offsets of the lake polyomino for a given cell count.
fn lake_shape(count: usize) -> &'static [(i32, i32)] {
    const SQUARE: [(i32, i32); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];
    const PLUS: [(i32, i32); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];
    match count {
        5 => &PLUS,
        _ => &SQUARE,
    }
}

/// Places a single lake polyomino; omitted if no spot is found. Counts
/// without a shape of their own get the square.
fn place_lake(board: &mut Board, count: usize, rng: &mut impl Rng) -> usize {
    if count == 0 {
        return 0;
    }
    let shape = lake_shape(count);
    let min_dr = shape.iter().map(|s| s.0).min().unwrap_or(0);
    let max_dr = shape.iter().map(|s| s.0).max().unwrap_or(0);
    let min_dc = shape.iter().map(|s| s.1).min().unwrap_or(0);
    let max_dc = shape.iter().map(|s| s.1).max().unwrap_or(0);
    let row_range = (board.rows() - 2 * PROTECTED_ROWS - (max_dr - min_dr)).max(1);
    let col_range = (board.cols() - (max_dc - min_dc)).max(1);

    for _ in 0..SHAPE_ATTEMPTS {
        let base = Position::new(
            PROTECTED_ROWS - min_dr + rng.gen_range(0..row_range),
            -min_dc + rng.gen_range(0..col_range),
        );
        let cells: Vec<Position> = shape.iter().map(|&(dr, dc)| base.offset(dr, dc)).collect();
        if !all_free(board, &cells) {
            continue;
        }
        for &c in &cells {
            board.set(c, Cell::Obstacle(ObstacleKind::Lake));
        }
        return cells.len();
    }
    0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineShape {
    Horizontal,
    Vertical,
    Gamma,
}

/// Cells of a line shape anchored at `start`.
fn line_cells(shape: LineShape, start: Position, count: usize, vertical_first: bool, dir: i32) -> Vec<Position> {
    let n = count as i32;
    match shape {
        LineShape::Horizontal => (0..n).map(|i| start.offset(0, i)).collect(),
        LineShape::Vertical => (0..n).map(|i| start.offset(i, 0)).collect(),
        LineShape::Gamma => {
            let leg1 = (n + 1) / 2;
            let leg2 = n - leg1 + 1;
            let mut cells = Vec::with_capacity(count);
            if vertical_first {
                cells.extend((0..leg1).map(|i| start.offset(i, 0)));
                let corner = start.offset(leg1 - 1, 0);
                cells.extend((1..leg2).map(|i| corner.offset(0, i * dir)));
            } else {
                cells.extend((0..leg1).map(|i| start.offset(0, i)));
                let corner = start.offset(0, leg1 - 1);
                cells.extend((1..leg2).map(|i| corner.offset(i * dir, 0)));
            }
            cells
        }
    }
}

/// Places a river or canyon as one straight or bent line.
fn place_linear(board: &mut Board, kind: ObstacleKind, count: usize, rng: &mut impl Rng) -> usize {
    if count == 0 {
        return 0;
    }
    let shape = match rng.gen_range(0..3) {
        0 => LineShape::Horizontal,
        1 => LineShape::Vertical,
        _ => LineShape::Gamma,
    };
    let open_rows = (board.rows() - 2 * PROTECTED_ROWS).max(1);

    for _ in 0..SHAPE_ATTEMPTS {
        let start = Position::new(PROTECTED_ROWS + rng.gen_range(0..open_rows), rng.gen_range(0..board.cols()));
        let vertical_first = rng.gen_bool(0.5);
        let dir = if rng.gen_bool(0.5) { 1 } else { -1 };
        let cells = line_cells(shape, start, count, vertical_first, dir);
        if !all_free(board, &cells) {
            continue;
        }
        for &c in &cells {
            board.set(c, Cell::Obstacle(kind));
        }
        return cells.len();
    }
    0
}

/// Grows a cluster: each new cell touches an earlier one when possible.
fn place_cluster(board: &mut Board, kind: ObstacleKind, count: usize, rng: &mut impl Rng) -> usize {
    let mut placed: Vec<Position> = Vec::with_capacity(count);
    let budget = count * CLUSTER_ATTEMPTS_PER_CELL;

    for _ in 0..budget {
        if placed.len() >= count {
            break;
        }
        let pos = if placed.is_empty() {
            random_position(board, rng)
        } else {
            let anchor = placed[rng.gen_range(0..placed.len())];
            let options: Vec<Position> = anchor
                .orthogonal_neighbors()
                .into_iter()
                .filter(|&p| is_free_open_cell(board, p))
                .collect();
            // A boxed-in anchor wastes the attempt; no random restart.
            if options.is_empty() {
                continue;
            }
            options[rng.gen_range(0..options.len())]
        };
        if !is_free_open_cell(board, pos) {
            continue;
        }
        board.set(pos, Cell::Obstacle(kind));
        placed.push(pos);
    }
    placed.len()
}

/// Splits mystery boxes between the left and right halves; the center
/// column belongs to neither.
fn place_mystery_boxes(board: &mut Board, count: usize, rng: &mut impl Rng) -> usize {
    let cols = board.cols();
    let center = cols / 2;
    let left_end = center - 1;
    let right_start = center + 1;
    let want_left = count / 2;
    let want_right = count / 2 + count % 2;
    let (mut left, mut right) = (0usize, 0usize);
    let budget = count * MYSTERY_BOX_ATTEMPTS_PER_BOX;

    for _ in 0..budget {
        let need_left = left < want_left;
        let need_right = right < want_right;
        if !need_left && !need_right {
            break;
        }
        let col = if need_left && (!need_right || rng.gen_bool(0.5)) {
            rng.gen_range(0..=left_end.max(0))
        } else if right_start < cols {
            rng.gen_range(right_start..cols)
        } else {
            continue;
        };
        let pos = Position::new(rng.gen_range(0..board.rows()), col);
        if !is_free_open_cell(board, pos) {
            continue;
        }
        board.set(pos, Cell::Obstacle(ObstacleKind::MysteryBox));
        if col <= left_end {
            left += 1;
        } else {
            right += 1;
        }
    }
    left + right
}
