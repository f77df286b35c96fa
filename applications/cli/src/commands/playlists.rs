/// Playlist commands
use super::track_line;
use crate::cli::PlaylistCommand;
use crate::error::{CliError, Result};
use encore_core::{Catalog, PlaylistId, Track, TrackId};
use encore_storage::Preferences;
use std::io::Write;

pub async fn run(
    catalog: &Catalog,
    preferences: &Preferences,
    action: PlaylistCommand,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        PlaylistCommand::List => {
            for playlist in preferences.playlists().await? {
                writeln!(
                    out,
                    "[{}] {} ({} tracks)",
                    playlist.id,
                    playlist.name,
                    playlist.tracks.len()
                )?;
            }
        }
        PlaylistCommand::Show { id } => {
            let playlist = preferences
                .playlist(&PlaylistId::new(id.as_str()))
                .await?
                .ok_or_else(|| CliError::not_found("Playlist", id))?;

            writeln!(
                out,
                "{} (created {})",
                playlist.name,
                playlist.created_at.format("%Y-%m-%d %H:%M")
            )?;
            for (index, track) in playlist.tracks.iter().enumerate() {
                writeln!(out, "{index:>3}. {}", track_line(track))?;
            }
        }
        PlaylistCommand::Create { name } => {
            let playlist = preferences.create_playlist(&name).await?;
            writeln!(out, "Created playlist [{}] {}", playlist.id, playlist.name)?;
        }
        PlaylistCommand::Rename { id, name } => {
            preferences
                .rename_playlist(&PlaylistId::new(id.as_str()), &name)
                .await?;
            writeln!(out, "Renamed playlist {id}")?;
        }
        PlaylistCommand::Add { id, track_ids } => {
            // Resolve everything first so a typo adds nothing
            let tracks = track_ids
                .iter()
                .map(|track_id| {
                    catalog
                        .track(&TrackId::new(track_id.as_str()))
                        .map(|track| Track::clone(&track))
                        .ok_or_else(|| CliError::not_found("Track", track_id.as_str()))
                })
                .collect::<Result<Vec<_>>>()?;

            let len = preferences
                .add_tracks(&PlaylistId::new(id.as_str()), tracks)
                .await?;
            writeln!(out, "Playlist {id} now has {len} tracks")?;
        }
        PlaylistCommand::Remove { id, index } => {
            let removed = preferences
                .remove_track(&PlaylistId::new(id.as_str()), index)
                .await?;
            writeln!(out, "Removed \"{}\" from playlist {id}", removed.title)?;
        }
        PlaylistCommand::Delete { id } => {
            let removed = preferences
                .delete_playlist(&PlaylistId::new(id.as_str()))
                .await?;
            writeln!(out, "Deleted playlist \"{}\"", removed.name)?;
        }
    }
    Ok(())
}
