/// Play queue construction
use crate::cli::{PlayArgs, QueueSource};
use crate::error::{CliError, Result};
use encore_core::{AlbumId, Catalog, PlaylistId, Track, TrackId};
use encore_storage::Preferences;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// Build the queue for `play` and the index to start from
///
/// With `--shuffle` the queue is shuffled and playback starts at its head.
/// A `--track` pick stays first so it still plays immediately.
pub async fn prepare_queue<R: Rng + ?Sized>(
    catalog: &Catalog,
    preferences: &Preferences,
    args: &PlayArgs,
    rng: &mut R,
) -> Result<(Vec<Arc<Track>>, usize)> {
    let (mut queue, position) = build_queue(catalog, preferences, &args.source).await?;
    if !args.shuffle {
        return Ok((queue, position.unwrap_or(args.start)));
    }

    match position {
        Some(position) => {
            queue.swap(0, position);
            queue[1..].shuffle(rng);
        }
        None => queue.shuffle(rng),
    }
    Ok((queue, 0))
}

/// Resolve the requested source into a play queue
///
/// `--track` queues the whole catalog and returns the track's position as
/// the start index; the other sources return `None` and use `--start`.
pub async fn build_queue(
    catalog: &Catalog,
    preferences: &Preferences,
    source: &QueueSource,
) -> Result<(Vec<Arc<Track>>, Option<usize>)> {
    if let Some(id) = &source.album {
        let album = catalog
            .album(&AlbumId::new(id.as_str()))
            .ok_or_else(|| CliError::not_found("Album", id.as_str()))?;
        return Ok((album.tracks.clone(), None));
    }

    if let Some(id) = &source.playlist {
        let playlist = preferences
            .playlist(&PlaylistId::new(id.as_str()))
            .await?
            .ok_or_else(|| CliError::not_found("Playlist", id.as_str()))?;
        let tracks = playlist.tracks.into_iter().map(Arc::new).collect();
        return Ok((tracks, None));
    }

    if let Some(id) = &source.track {
        let id = TrackId::new(id.as_str());
        let tracks = catalog.all_tracks();
        let position = tracks
            .iter()
            .position(|track| track.id == id)
            .ok_or_else(|| CliError::not_found("Track", id.as_str()))?;
        return Ok((tracks, Some(position)));
    }

    let query = source.search.as_deref().unwrap_or_default();
    let tracks = catalog.search(query);
    if tracks.is_empty() {
        return Err(CliError::NoMatches(query.to_string()));
    }
    Ok((tracks, None))
}
