//! Encore Storage
//!
//! Local persistence for Encore: a flat key-value store and the
//! favorites/playlists preferences built on top of it.
//!
//! # Architecture
//!
//! - **Key-value stores**: [`SqliteStore`] (embedded migrations, WAL) and
//!   [`MemoryStore`], both implementing [`encore_core::KeyValueStore`]
//! - **Preferences**: [`Preferences`] keeps favorites and playlists as whole
//!   JSON documents under fixed keys; every mutation rewrites its document
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_storage::{Preferences, SqliteStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::open("sqlite://encore.db").await?;
//! let preferences = Preferences::new(Arc::new(store));
//!
//! let now_favorite = preferences.toggle_favorite("05 - LOLA").await?;
//! let playlist = preferences.create_playlist("Road trip").await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
pub mod preferences;
mod sqlite;

pub use error::{PreferencesError, StorageError};
pub use memory::MemoryStore;
pub use preferences::{Preferences, FAVORITES_KEY, PLAYLISTS_KEY};
pub use sqlite::SqliteStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://encore.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    debug!("SQLite pool ready");
    Ok(pool)
}
