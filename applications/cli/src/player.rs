//! Interactive transport loop
//!
//! Reads one key per line and drives the session; session events are
//! printed as they arrive. Ends on `q`, end of input, or Ctrl-C.

use crate::error::Result;
use encore_core::Track;
use encore_playback::{MediaEngine, PlaybackSession, SessionEvent};
use encore_storage::Preferences;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

pub const KEY_HELP: &str = "keys: n next, p previous, t/space play-pause, f favorite, q quit";

/// Transport key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Next,
    Prev,
    Toggle,
    Favorite,
    Quit,
}

/// Parse one input line; `None` for anything unrecognized
pub fn parse_key(line: &str) -> Option<Key> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.chars().all(|c| c == ' ') && !line.is_empty() {
        return Some(Key::Toggle);
    }

    match line.trim().to_ascii_lowercase().as_str() {
        "n" | "next" => Some(Key::Next),
        "p" | "prev" => Some(Key::Prev),
        "t" | "toggle" => Some(Key::Toggle),
        "f" | "fav" => Some(Key::Favorite),
        "q" | "quit" => Some(Key::Quit),
        _ => None,
    }
}

/// Start `queue` at `start` and run the transport loop until the user quits
pub async fn run<E, R>(
    session: &PlaybackSession<E>,
    preferences: &Preferences,
    queue: Vec<Arc<Track>>,
    start: usize,
    input: R,
    out: &mut impl Write,
) -> Result<()>
where
    E: MediaEngine,
    R: AsyncBufRead + Unpin,
{
    let (sender, mut events) = mpsc::unbounded_channel();
    let _subscription = session.subscribe(move |event| {
        let _ = sender.send(event.clone());
    });

    session.set_queue_and_play(queue, start).await?;
    writeln!(out, "{KEY_HELP}")?;

    let mut lines = input.lines();
    loop {
        tokio::select! {
            biased;

            Some(event) = events.recv() => report(session, &event, out)?,

            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                match parse_key(&line) {
                    Some(Key::Quit) => break,
                    Some(Key::Next) => session.play_next().await,
                    Some(Key::Prev) => session.play_prev().await,
                    Some(Key::Toggle) => session.toggle_play_pause().await,
                    Some(Key::Favorite) => toggle_current_favorite(session, preferences, out).await?,
                    None => writeln!(out, "Unknown key {:?}. {KEY_HELP}", line.trim())?,
                }
            }

            _ = tokio::signal::ctrl_c() => break,
        }
    }

    while let Ok(event) = events.try_recv() {
        report(session, &event, out)?;
    }
    Ok(())
}

async fn toggle_current_favorite<E: MediaEngine>(
    session: &PlaybackSession<E>,
    preferences: &Preferences,
    out: &mut impl Write,
) -> Result<()> {
    let Some(track) = session.current_track() else {
        writeln!(out, "Nothing is playing")?;
        return Ok(());
    };

    if preferences.toggle_favorite(&track.title).await? {
        writeln!(out, "♥ Added \"{}\" to favorites", track.title)?;
    } else {
        writeln!(out, "Removed \"{}\" from favorites", track.title)?;
    }
    Ok(())
}

fn report<E: MediaEngine>(
    session: &PlaybackSession<E>,
    event: &SessionEvent,
    out: &mut impl Write,
) -> Result<()> {
    match event {
        SessionEvent::TrackChanged {
            track_id: Some(id), ..
        } => {
            let title = session
                .queue()
                .iter()
                .find(|track| &track.id == id)
                .map(|track| track.title.clone())
                .unwrap_or_else(|| id.to_string());
            writeln!(out, "▶ Now playing: {title}")?;
        }
        SessionEvent::TrackChanged { track_id: None, .. } => writeln!(out, "Queue cleared")?,
        SessionEvent::StateChanged { is_playing: true } => writeln!(out, "Playing")?,
        SessionEvent::StateChanged { is_playing: false } => writeln!(out, "Paused")?,
        SessionEvent::QueueChanged { length } => writeln!(out, "{length} tracks in queue")?,
        SessionEvent::LoadFailed { track_id, message } => {
            writeln!(out, "Could not load {track_id}: {message}")?;
        }
        SessionEvent::EngineError { message } => writeln!(out, "Playback error: {message}")?,
    }
    Ok(())
}
