//! Favorite tracks, keyed by title

use super::{Preferences, Result, FAVORITES_KEY};
use tracing::debug;

impl Preferences {
    /// Favorite titles in the order they were added
    pub async fn favorites(&self) -> Result<Vec<String>> {
        self.read(FAVORITES_KEY).await
    }

    pub async fn is_favorite(&self, title: &str) -> Result<bool> {
        Ok(self.favorites().await?.iter().any(|t| t == title))
    }

    /// Add `title` to favorites, or remove it if already there
    ///
    /// Returns whether the title is a favorite afterwards.
    pub async fn toggle_favorite(&self, title: &str) -> Result<bool> {
        let mut favorites = self.favorites().await?;

        let now_favorite = match favorites.iter().position(|t| t == title) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(title.to_string());
                true
            }
        };

        self.write(FAVORITES_KEY, &favorites).await?;
        debug!(title, now_favorite, "Toggled favorite");
        Ok(now_favorite)
    }
}
