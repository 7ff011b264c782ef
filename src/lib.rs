//! Code Clicker: an incremental clicker game about shipping code.
//!
//! The progression engine lives in [`game`] and is plain Rust over an owned
//! `GameState`. The browser shell (`main.rs`) drives it through ratzilla, and
//! the optional `server` feature exposes a small save/load HTTP API.

pub mod game;
pub mod input;
pub mod time;
pub mod widgets;

#[cfg(feature = "server")]
pub mod server;
