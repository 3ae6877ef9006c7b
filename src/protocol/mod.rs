//! Text front-end protocol.
//!
//! This module implements the command parser for the main loop, the board
//! diagram notation, and the status line written after each action.

pub mod diagram;
pub mod parser;
pub mod status;

pub use diagram::{format_diagram, parse_diagram, DiagramError};
pub use parser::{parse_command, Command};
pub use status::format_status;
