/// Command-line interface definition
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "encore")]
#[command(about = "Browse your music catalog, manage playlists, and play", long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ./encore.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List albums
    Albums,
    /// Show an album's tracks
    Album {
        /// Album ID
        id: String,
    },
    /// List every track (albums first, then singles)
    Tracks,
    /// Search tracks by title (case-insensitive)
    Search {
        /// Text to look for
        query: String,
    },
    /// List artists with their tracks
    Artists,
    /// Pick random singles
    Discover {
        /// How many to pick
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
    /// Manage favorite tracks
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
    /// Manage playlists
    Playlist {
        #[command(subcommand)]
        action: PlaylistCommand,
    },
    /// Play a queue interactively
    Play(PlayArgs),
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List favorite titles
    List,
    /// Add or remove a title
    Toggle {
        /// Track title
        title: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PlaylistCommand {
    /// List playlists
    List,
    /// Show a playlist's tracks
    Show {
        /// Playlist ID
        id: String,
    },
    /// Create an empty playlist
    Create {
        /// Playlist name
        name: String,
    },
    /// Rename a playlist
    Rename {
        /// Playlist ID
        id: String,
        /// New name
        name: String,
    },
    /// Append catalog tracks to a playlist
    Add {
        /// Playlist ID
        id: String,
        /// Catalog track IDs
        #[arg(required = true)]
        track_ids: Vec<String>,
    },
    /// Remove the track at a position (0-based)
    Remove {
        /// Playlist ID
        id: String,
        /// Track position
        index: usize,
    },
    /// Delete a playlist
    Delete {
        /// Playlist ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub source: QueueSource,

    /// Queue position to start at
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Shuffle the queue and start from its head
    #[arg(long, conflicts_with = "start")]
    pub shuffle: bool,
}

/// Where the play queue comes from
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct QueueSource {
    /// Play an album
    #[arg(long)]
    pub album: Option<String>,

    /// Play a playlist
    #[arg(long)]
    pub playlist: Option<String>,

    /// Play every track, starting at this one
    #[arg(long)]
    pub track: Option<String>,

    /// Play the tracks matching a search
    #[arg(long)]
    pub search: Option<String>,
}
