//! Integration tests for the fantasy_tactics binary.
//!
//! Tests the full session flow by spawning the engine process, sending
//! commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_fantasy_tactics");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start fantasy_tactics");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

const NEW_GAME_STATUS: &str = "status turn white over false winner none mystery none";

/// Parses `hint r c r c [attack]` into select commands.
fn hint_to_selects(line: &str) -> (String, String) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    assert_eq!(parts[0], "hint");
    assert!(parts.len() >= 5, "no hint in '{}'", line);
    (format!("select {} {}", parts[1], parts[2]), format!("select {} {}", parts[3], parts[4]))
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["castle kingside", "", "   ", "select x y", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn newgame_reports_status() {
    let lines = run_engine(&["newgame", "quit"]);
    assert_eq!(lines, vec![NEW_GAME_STATUS.to_string()]);
}

#[test]
fn board_diagram_matches_size() {
    let lines = run_engine(&["newgame 12x20", "board", "quit"]);
    let diagram = lines[1].strip_prefix("board ").unwrap();
    let rows: Vec<&str> = diagram.split('/').collect();
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r.chars().count() == 20));
    assert_eq!(rows[0].chars().filter(|&c| c == 'm').count(), 1);
    assert_eq!(rows[11].chars().filter(|&c| c == 'M').count(), 1);
}

#[test]
fn seeded_games_repeat() {
    let commands = ["setoption name Seed value 11", "newgame", "board", "quit"];
    assert_eq!(run_engine(&commands), run_engine(&commands));
}

#[test]
fn state_is_json() {
    let lines = run_engine(&["state", "quit"]);
    let json = lines[0].strip_prefix("state ").unwrap();
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(value["current_player"], "white");
    assert_eq!(value["game_over"], false);
    assert_eq!(value["board_size"]["cols"], 12);
}

#[test]
fn selecting_enemy_piece_is_ignored() {
    let lines = run_engine(&["newgame", "select 0 0", "quit"]);
    assert_eq!(lines[1], "ignored");
    assert_eq!(lines[2], NEW_GAME_STATUS);
}

#[test]
fn undo_without_history_is_ignored() {
    let lines = run_engine(&["newgame", "undo", "quit"]);
    assert_eq!(lines[1..], ["ignored".to_string(), NEW_GAME_STATUS.to_string()]);
}

#[test]
fn hint_move_can_be_played_and_undone() {
    let setup = ["setoption name Seed value 21", "newgame"];
    let lines = run_engine(&[setup[0], setup[1], "hint", "quit"]);
    let (select_from, select_to) = hint_to_selects(&lines[1]);

    let lines = run_engine(&[setup[0], setup[1], &select_from, &select_to, "undo", "quit"]);
    // newgame, select, move, and undo each report a status line.
    assert!(lines.len() >= 4);
    let after_move = &lines[2];
    assert!(
        after_move.contains("turn black") || !after_move.ends_with("mystery none"),
        "unexpected status '{}'",
        after_move
    );
    if after_move.contains("turn black") {
        assert_eq!(lines[3..], [NEW_GAME_STATUS.to_string()]);
    }
}

#[test]
fn bot_answers_after_player_move() {
    let setup = ["setoption name Seed value 5", "setoption name Bot value on", "newgame"];
    let lines = run_engine(&[setup[0], setup[1], setup[2], "go", "hint", "quit"]);
    // The bot only plays Black.
    assert_eq!(lines[1], "bestmove none");
    let (select_from, select_to) = hint_to_selects(lines.last().unwrap());

    let lines = run_engine(&[setup[0], setup[1], setup[2], &select_from, &select_to, "go", "quit"]);
    if lines[2].contains("turn black") {
        let bestmove = &lines[3];
        assert!(bestmove.starts_with("bestmove "), "got '{}'", bestmove);
        assert_ne!(bestmove, "bestmove none");
        assert!(lines[4].starts_with("status turn white"));
    }
}

#[test]
fn mode_command_reports_status() {
    let lines = run_engine(&["newgame", "mode melee", "mode melee", "quit"]);
    assert_eq!(lines[1], NEW_GAME_STATUS);
    assert_eq!(lines[2], "ignored");
}
