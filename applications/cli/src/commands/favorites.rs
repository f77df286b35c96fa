/// Favorites commands
use crate::cli::FavoritesCommand;
use crate::error::Result;
use encore_storage::Preferences;
use std::io::Write;

pub async fn run(
    preferences: &Preferences,
    action: FavoritesCommand,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        FavoritesCommand::List => {
            let favorites = preferences.favorites().await?;
            if favorites.is_empty() {
                writeln!(out, "No favorites yet")?;
            }
            for title in favorites {
                writeln!(out, "♥ {title}")?;
            }
        }
        FavoritesCommand::Toggle { title } => {
            if preferences.toggle_favorite(&title).await? {
                writeln!(out, "Added \"{title}\" to favorites")?;
            } else {
                writeln!(out, "Removed \"{title}\" from favorites")?;
            }
        }
    }
    Ok(())
}
