/// Catalog browsing commands
use super::track_line;
use crate::error::{CliError, Result};
use encore_core::{AlbumId, Catalog};
use std::io::Write;

pub fn albums(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    for album in catalog.albums() {
        writeln!(out, "[{}] {} ({} tracks)", album.id, album.title, album.len())?;
    }
    Ok(())
}

pub fn album(catalog: &Catalog, id: &str, out: &mut impl Write) -> Result<()> {
    let album = catalog
        .album(&AlbumId::new(id))
        .ok_or_else(|| CliError::not_found("Album", id))?;

    writeln!(out, "{}", album.title)?;
    for (position, track) in album.tracks.iter().enumerate() {
        writeln!(out, "{:>3}. {}", position + 1, track_line(track))?;
    }
    Ok(())
}

pub fn tracks(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    for track in catalog.all_tracks() {
        writeln!(out, "{}", track_line(&track))?;
    }
    Ok(())
}

pub fn search(catalog: &Catalog, query: &str, out: &mut impl Write) -> Result<()> {
    let matches = catalog.search(query);
    if matches.is_empty() {
        writeln!(out, "No tracks match \"{query}\"")?;
    }
    for track in matches {
        writeln!(out, "{}", track_line(&track))?;
    }
    Ok(())
}

pub fn artists(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    for (artist, tracks) in catalog.artists() {
        writeln!(out, "{artist}")?;
        for track in tracks {
            writeln!(out, "    {}", track_line(&track))?;
        }
    }
    Ok(())
}

pub fn discover(catalog: &Catalog, count: usize, out: &mut impl Write) -> Result<()> {
    let picks = catalog.random_singles(&mut rand::thread_rng(), count);
    for track in picks {
        writeln!(out, "{}", track_line(&track))?;
    }
    Ok(())
}
