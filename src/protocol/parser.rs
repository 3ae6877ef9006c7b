//! Front-end command parser.
//!
//! Parses incoming text commands into structured `Command` variants that
//! the main loop can dispatch on.

use log::warn;

use crate::board::{BoardSizeKey, PieceId, Position};
use crate::game::AttackMode;

/// A parsed front-end command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; the engine must reply `readyok`.
    IsReady,

    /// Start a new game, optionally on another board size.
    NewGame { size: Option<BoardSizeKey> },

    /// Set a session option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Click a square: select, move, attack, or swap.
    Select(Position),

    /// Freeze the piece at the square with the selected Necromancer.
    Freeze(Position),

    /// Revive a captured piece as a zombie.
    Revive(PieceId),

    Mode(AttackMode),

    /// Click a square during a mystery-box sequence.
    Mystery(Position),

    /// Pick a captured enemy piece to bring back.
    Pick(PieceId),

    Confirm,
    Cancel,
    Undo,
    Hint,

    /// Let the bot play its turn.
    Go,

    Board,
    State,
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "confirm" => Some(Command::Confirm),
        "cancel" => Some(Command::Cancel),
        "undo" => Some(Command::Undo),
        "hint" => Some(Command::Hint),
        "go" => Some(Command::Go),
        "board" => Some(Command::Board),
        "state" => Some(Command::State),

        "newgame" => parse_newgame(args),
        "setoption" => parse_setoption(args),
        "select" => parse_position(head, args).map(Command::Select),
        "freeze" => parse_position(head, args).map(Command::Freeze),
        "mystery" => parse_position(head, args).map(Command::Mystery),
        "revive" => parse_piece_id(head, args).map(Command::Revive),
        "pick" => parse_piece_id(head, args).map(Command::Pick),
        "mode" => parse_mode(args),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `newgame [12x12|12x16|12x20]`.
fn parse_newgame(args: &[&str]) -> Option<Command> {
    match args.first() {
        None => Some(Command::NewGame { size: None }),
        Some(s) => match BoardSizeKey::from_name(s) {
            Some(key) => Some(Command::NewGame { size: Some(key) }),
            None => {
                warn!("unknown board size: '{}'", s);
                None
            }
        },
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let rest = &args[1..];
    let (name_parts, value_parts) = match rest.iter().position(|&t| t == "value") {
        Some(vi) => (&rest[..vi], Some(&rest[vi + 1..])),
        None => (rest, None),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }
    let value = value_parts.filter(|v| !v.is_empty()).map(|v| v.join(" "));
    Some(Command::SetOption { name: name_parts.join(" "), value })
}

/// Parses `<row> <col>`.
fn parse_position(cmd: &str, args: &[&str]) -> Option<Position> {
    match args {
        [r, c] => match (r.parse::<i32>(), c.parse::<i32>()) {
            (Ok(row), Ok(col)) => Some(Position::new(row, col)),
            _ => {
                warn!("invalid square for {}: '{} {}'", cmd, r, c);
                None
            }
        },
        _ => {
            warn!("malformed {}: expected '{} <row> <col>'", cmd, cmd);
            None
        }
    }
}

fn parse_piece_id(cmd: &str, args: &[&str]) -> Option<PieceId> {
    match args {
        [id] => match id.parse::<u32>() {
            Ok(v) => Some(PieceId(v)),
            Err(_) => {
                warn!("invalid piece id for {}: '{}'", cmd, id);
                None
            }
        },
        _ => {
            warn!("malformed {}: expected '{} <id>'", cmd, cmd);
            None
        }
    }
}

/// Parses `mode ranged|melee`.
fn parse_mode(args: &[&str]) -> Option<Command> {
    match args.first().and_then(|s| AttackMode::from_name(s)) {
        Some(mode) => Some(Command::Mode(mode)),
        None => {
            warn!("malformed mode: expected 'mode ranged|melee'");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("undo"), Some(Command::Undo));
        assert_eq!(parse_command("  go  "), Some(Command::Go));
        assert_eq!(parse_command("confirm"), Some(Command::Confirm));
        assert_eq!(parse_command("cancel"), Some(Command::Cancel));
        assert_eq!(parse_command("board"), Some(Command::Board));
        assert_eq!(parse_command("state"), Some(Command::State));
        assert_eq!(parse_command("hint"), Some(Command::Hint));
    }

    #[test]
    fn parse_empty_and_unknown() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("castle"), None);
    }

    #[test]
    fn parse_newgame_sizes() {
        assert_eq!(parse_command("newgame"), Some(Command::NewGame { size: None }));
        assert_eq!(
            parse_command("newgame 12x16"),
            Some(Command::NewGame { size: Some(BoardSizeKey::Medium) })
        );
        assert_eq!(parse_command("newgame 9x9"), None);
    }

    #[test]
    fn parse_setoption_with_and_without_value() {
        assert_eq!(
            parse_command("setoption name Difficulty value hard"),
            Some(Command::SetOption { name: "Difficulty".to_string(), value: Some("hard".to_string()) })
        );
        assert_eq!(
            parse_command("setoption name Seed"),
            Some(Command::SetOption { name: "Seed".to_string(), value: None })
        );
        assert_eq!(parse_command("setoption Bot on"), None);
        assert_eq!(parse_command("setoption name value on"), None);
    }

    #[test]
    fn parse_square_commands() {
        assert_eq!(parse_command("select 10 3"), Some(Command::Select(Position::new(10, 3))));
        assert_eq!(parse_command("freeze 4 4"), Some(Command::Freeze(Position::new(4, 4))));
        assert_eq!(parse_command("mystery 0 11"), Some(Command::Mystery(Position::new(0, 11))));
        assert_eq!(parse_command("select 10"), None);
        assert_eq!(parse_command("select a b"), None);
    }

    #[test]
    fn parse_id_and_mode_commands() {
        assert_eq!(parse_command("revive 17"), Some(Command::Revive(PieceId(17))));
        assert_eq!(parse_command("pick 3"), Some(Command::Pick(PieceId(3))));
        assert_eq!(parse_command("pick -1"), None);
        assert_eq!(parse_command("mode melee"), Some(Command::Mode(AttackMode::Melee)));
        assert_eq!(parse_command("mode RANGED"), Some(Command::Mode(AttackMode::Ranged)));
        assert_eq!(parse_command("mode"), None);
    }
}
