//! Subcommand implementations
//!
//! Every command writes its user-facing output to `out` so the same code
//! serves the terminal and the tests.

mod favorites;
mod library;
mod play;
mod playlists;

pub use play::{build_queue, prepare_queue};

use crate::cli::Command;
use crate::error::Result;
use crate::player;
use encore_core::{Catalog, Track};
use encore_playback::{MediaEngine, PlaybackSession};
use encore_storage::Preferences;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncBufRead;

/// Everything a command needs
pub struct App {
    pub catalog: Catalog,
    pub preferences: Preferences,
}

impl App {
    pub fn new(catalog: Catalog, preferences: Preferences) -> Self {
        Self {
            catalog,
            preferences,
        }
    }

    /// Run a non-interactive command
    ///
    /// `play` needs a session and input; use [`App::play`] for it.
    pub async fn execute(&self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Albums => library::albums(&self.catalog, out),
            Command::Album { id } => library::album(&self.catalog, &id, out),
            Command::Tracks => library::tracks(&self.catalog, out),
            Command::Search { query } => library::search(&self.catalog, &query, out),
            Command::Artists => library::artists(&self.catalog, out),
            Command::Discover { count } => library::discover(&self.catalog, count, out),
            Command::Favorites { action } => favorites::run(&self.preferences, action, out).await,
            Command::Playlist { action } => {
                playlists::run(&self.catalog, &self.preferences, action, out).await
            }
            Command::Play(args) => {
                // Dry run: show what would be queued
                let mut rng = StdRng::from_entropy();
                let (queue, start) =
                    prepare_queue(&self.catalog, &self.preferences, &args, &mut rng).await?;
                for (index, track) in queue.iter().enumerate() {
                    let marker = if index == start { '>' } else { ' ' };
                    writeln!(out, "{marker} {}", track_line(track))?;
                }
                Ok(())
            }
        }
    }

    /// Play `queue` from `start`, reading transport keys from `input`
    ///
    /// The session is shut down when the loop ends, whatever the outcome.
    pub async fn play<E, R>(
        &self,
        session: &PlaybackSession<E>,
        queue: Vec<Arc<Track>>,
        start: usize,
        input: R,
        out: &mut impl Write,
    ) -> Result<()>
    where
        E: MediaEngine,
        R: AsyncBufRead + Unpin,
    {
        let result = player::run(session, &self.preferences, queue, start, input, out).await;
        session.shutdown().await;
        result
    }
}

/// One-line track listing: `[id] title`
pub(crate) fn track_line(track: &Track) -> String {
    format!("[{}] {}", track.id, track.title)
}
