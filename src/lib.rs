//! Fantasy Tactics engine library.
//!
//! Exposes the board model, movement rules, special mechanics, move
//! application, evaluation and bot search, the game reducer and sessions,
//! and the text protocol, for use by the binaries and integration tests.

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod mechanics;
pub mod movegen;
pub mod protocol;
pub mod registry;
pub mod resolve;
pub mod search;
pub mod selfplay;
