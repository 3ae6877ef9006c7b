//! Bot-versus-bot self-play.
//!
//! Plays full games with the bot on both sides, recording every ply, the
//! evaluation after it, and the outcome. Games run in parallel on a rayon
//! pool and are written out as JSONL.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Instant;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::{BoardSizeKey, Color, PieceKind, Position};
use crate::eval::evaluate;
use crate::game::{apply_bot_move, GameState};
use crate::protocol::format_diagram;
use crate::resolve::is_monarch_captured;
use crate::search::{choose_move, Difficulty};

/// Configuration for self-play game generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    pub board_size: BoardSizeKey,
    pub white: Difficulty,
    pub black: Difficulty,
    /// Plies after which an unfinished game is scored as a draw.
    pub max_plies: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            board_size: BoardSizeKey::Small,
            white: Difficulty::Medium,
            black: Difficulty::Medium,
            max_plies: 200,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    fn difficulty(&self, side: Color) -> Difficulty {
        match side {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    MonarchCaptured,
    NoLegalMoves,
    MaxPlies,
}

/// One recorded ply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlyRecord {
    pub side: Color,
    pub from: Position,
    /// Where the piece stopped, which differs from the target after a narc.
    pub to: Position,
    pub is_attack: bool,
    pub captured: Option<PieceKind>,
    /// Static evaluation after the ply, positive for Black.
    pub eval: i32,
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub board_size: BoardSizeKey,
    pub initial_diagram: String,
    pub plies: Vec<PlyRecord>,
    pub winner: Option<Color>,
    pub end: GameEnd,
    pub final_diagram: String,
}

fn seeded(seed: u64, offset: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(offset as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays one game to completion or the ply limit.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut state = GameState::new_game(config.board_size, rng);
    let initial_diagram = format_diagram(&state.board);
    let mut plies = Vec::new();

    while !state.game_over && plies.len() < config.max_plies {
        let side = state.current_player;
        let Some(mv) = choose_move(&state.board, &state.narcs, side, config.difficulty(side), rng) else {
            break;
        };
        let next = match apply_bot_move(&state, mv) {
            Ok(next) => next,
            Err(e) => {
                warn!("game {}: bot move rejected: {}", game_id, e);
                break;
            }
        };
        let (to, captured) = next
            .last_move
            .map_or((mv.to, None), |m| (m.to, m.captured.map(|p| p.kind)));
        plies.push(PlyRecord {
            side,
            from: mv.from,
            to,
            is_attack: mv.is_attack,
            captured,
            eval: evaluate(&next.board),
        });
        state = next;
    }

    let end = match state.winner {
        Some(winner) if is_monarch_captured(&state.board, winner.opponent()) => GameEnd::MonarchCaptured,
        Some(_) => GameEnd::NoLegalMoves,
        None => GameEnd::MaxPlies,
    };
    GameRecord {
        game_id,
        board_size: config.board_size,
        initial_diagram,
        plies,
        winner: state.winner,
        end,
        final_diagram: format_diagram(&state.board),
    }
}

fn outcome(game: &GameRecord) -> String {
    match game.winner {
        Some(w) => format!("{} wins", w.name()),
        None => "draw".to_string(),
    }
}

/// Runs self-play generation and returns all game records.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games.sort_by_key(|g| g.game_id);
    games
}

/// Runs self-play generation, calling `on_game` with each completed game
/// record as soon as it finishes.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
            Ok(pool) => return run_self_play_parallel(config, &pool, on_game),
            Err(e) => warn!("falling back to sequential self-play: {}", e),
        }
    }
    run_self_play_sequential(config, on_game);
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    let mut rng = seeded(config.seed, 0);
    for i in 0..config.num_games {
        let game_start = Instant::now();
        let game = play_game(config, i, &mut rng);
        if !config.quiet {
            info!(
                "game {}/{}: {} after {} plies ({:.1}s)",
                i + 1,
                config.num_games,
                outcome(&game),
                game.plies.len(),
                game_start.elapsed().as_secs_f64()
            );
        }
        on_game(game);
    }
}

/// Plays games concurrently; completed games reach the callback through a
/// channel on the calling thread.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, pool: &rayon::ThreadPool, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|s| {
        let completed = &completed;
        s.spawn(move || {
            pool.install(|| {
                (0..config.num_games).into_par_iter().for_each_with(tx, |tx, i| {
                    let mut rng = seeded(config.seed, i);
                    let game_start = Instant::now();
                    let game = play_game(config, i, &mut rng);
                    if !config.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        info!(
                            "game {}/{}: {} after {} plies ({:.1}s)",
                            n,
                            config.num_games,
                            outcome(&game),
                            game.plies.len(),
                            game_start.elapsed().as_secs_f64()
                        );
                    }
                    let _ = tx.send(game);
                });
            });
        });

        for game in rx {
            on_game(game);
        }
    });
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let wins = |c: Color| games.iter().filter(|g| g.winner == Some(c)).count();
    let draws = games.iter().filter(|g| g.winner.is_none()).count();
    let no_moves = games.iter().filter(|g| g.end == GameEnd::NoLegalMoves).count();
    let total_plies: usize = games.iter().map(|g| g.plies.len()).sum();
    let captures: usize = games.iter().flat_map(|g| &g.plies).filter(|p| p.captured.is_some()).count();

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!("Avg plies/game: {:.1}", total_plies as f64 / total.max(1) as f64);
    eprintln!("Avg captures/game: {:.1}", captures as f64 / total.max(1) as f64);
    for color in [Color::White, Color::Black] {
        let n = wins(color);
        eprintln!("  {:>5}: {} ({:.1}%)", color.name(), n, 100.0 * n as f64 / total.max(1) as f64);
    }
    eprintln!("Draws (ply limit): {}", draws);
    eprintln!("Wins by stalemating the opponent: {}", no_moves);
}
