//! Encore CLI
//!
//! Terminal front end: catalog browsing, favorites, playlists, and an
//! interactive player driven by the playback session.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod player;

pub use commands::App;
pub use config::EncoreConfig;
pub use error::{CliError, Result};
