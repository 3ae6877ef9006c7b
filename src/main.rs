//! Fantasy Tactics: a text front end for the rule engine and bot.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go through `log` to stderr (set `RUST_LOG` to see them).

use std::io::{self, BufRead, Write};

use log::warn;

use fantasy_tactics::engine::{Session, SessionConfig};
use fantasy_tactics::game::{Action, Commit};
use fantasy_tactics::protocol::parser::{parse_command, Command};

/// Applies a player action and reports the new status.
fn play<W: Write>(session: &mut Session, action: Action, out: &mut W) -> io::Result<()> {
    match session.dispatch(action) {
        Ok(Commit::None) => writeln!(out, "ignored")?,
        Ok(_) => {}
        Err(e) => {
            warn!("{:?}: {}", action, e);
            return Ok(());
        }
    }
    session.handle_status(out)
}

/// Runs one command; returns `false` on `quit`.
fn run<W: Write>(session: &mut Session, cmd: Command, out: &mut W) -> io::Result<bool> {
    match cmd {
        Command::IsReady => session.handle_isready(out)?,
        Command::NewGame { size } => {
            session.reset(size);
            session.handle_status(out)?;
        }
        Command::SetOption { name, value } => {
            if let Err(e) = session.set_option(&name, value.as_deref()) {
                warn!("setoption: {}", e);
            }
        }
        Command::Select(pos) => play(session, Action::SelectSquare(pos), out)?,
        Command::Freeze(pos) => play(session, Action::Freeze(pos), out)?,
        Command::Revive(id) => play(session, Action::ReviveZombie(id), out)?,
        Command::Mode(mode) => play(session, Action::SetAttackMode(mode), out)?,
        Command::Mystery(pos) => play(session, Action::MysterySelect(pos), out)?,
        Command::Pick(id) => play(session, Action::ChooseRevivePiece(id), out)?,
        Command::Confirm => play(session, Action::ConfirmObstacleSelection, out)?,
        Command::Cancel => play(session, Action::CancelMysteryBox, out)?,
        Command::Undo => {
            if !session.undo() {
                writeln!(out, "ignored")?;
            }
            session.handle_status(out)?;
        }
        Command::Hint => session.handle_hint(out)?,
        Command::Go => session.handle_go(out)?,
        Command::Board => session.handle_board(out)?,
        Command::State => session.handle_state(out)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut session = Session::new(SessionConfig::default());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match run(&mut session, cmd, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                warn!("output failed: {}", e);
                break;
            }
        }
    }
    let _ = out.flush();
}
