//! Self-play game generation CLI.
//!
//! Plays bot-versus-bot games and outputs the records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N         Number of games to play (default: 10)
//!   --size S          Board size 12x12, 12x16 or 12x20 (default: 12x12)
//!   --white D         White difficulty easy|medium|hard (default: medium)
//!   --black D         Black difficulty easy|medium|hard (default: medium)
//!   --max-plies N     Ply limit before a draw (default: 200)
//!   --threads N       Number of parallel threads (default: 4)
//!   --seed N          Random seed, 0 for entropy (default: 0)
//!   --output FILE     Output file path (default: stdout)
//!   --quiet           Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use fantasy_tactics::board::BoardSizeKey;
use fantasy_tactics::search::Difficulty;
use fantasy_tactics::selfplay::{self, SelfPlayConfig};

/// Parses the value following `flag`, exiting with usage on failure.
fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => fail(&format!("invalid {} value", flag)),
    }
}

fn named<T>(args: &[String], i: usize, flag: &str, parse: fn(&str) -> Option<T>) -> T {
    match args.get(i).and_then(|v| parse(v)) {
        Some(v) => v,
        None => fail(&format!("invalid {} value", flag)),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = value(&args, i, "--games");
            }
            "--size" => {
                i += 1;
                config.board_size = named(&args, i, "--size", BoardSizeKey::from_name);
            }
            "--white" => {
                i += 1;
                config.white = named(&args, i, "--white", Difficulty::from_name);
            }
            "--black" => {
                i += 1;
                config.black = named(&args, i, "--black", Difficulty::from_name);
            }
            "--max-plies" => {
                i += 1;
                config.max_plies = value(&args, i, "--max-plies");
            }
            "--threads" => {
                i += 1;
                config.threads = value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = value(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(value(&args, i, "--output"));
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => fail(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    if !config.quiet {
        eprintln!(
            "Self-play: {} games on {}, white {} vs black {}, max {} plies, {} threads",
            config.num_games,
            config.board_size.name(),
            config.white,
            config.black,
            config.max_plies,
            config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.1}s ({:.1} games/hour)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON) * 3600.0
        );
        selfplay::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            selfplay::write_jsonl(&games, &mut BufWriter::new(stdout.lock()))
        }
    };
    match written {
        Ok(()) => {
            if let (Some(path), false) = (&output_path, config.quiet) {
                eprintln!("Wrote {} games to {}", games.len(), path);
            }
        }
        Err(e) => fail(&format!("failed to write output: {}", e)),
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --size S         Board size 12x12, 12x16 or 12x20 (default: 12x12)");
    eprintln!("  --white D        White difficulty easy|medium|hard (default: medium)");
    eprintln!("  --black D        Black difficulty easy|medium|hard (default: medium)");
    eprintln!("  --max-plies N    Ply limit before a draw (default: 200)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
