/// Core traits for Encore
use crate::error::Result;
use async_trait::async_trait;

/// Flat, string-keyed local store
///
/// Holds the persisted preferences (favorites, playlists) as opaque strings.
/// There are no transactions: callers do a full read-modify-write per mutation.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; an absent key is `Ok(None)`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
