//! Playlist document parsing
//!
//! The playlist source is external: the host fetches a JSON document and
//! hands the bytes here. The document shape is
//! `{ "tracks": [ { "title", "artist", "src", "cover"?, "duration"? } ] }`.

use serde::Deserialize;

use crate::error::{AriaError, Result};
use crate::types::Track;

/// The fetched playlist document
#[derive(Debug, Deserialize)]
struct PlaylistDocument {
    #[serde(default)]
    tracks: Vec<Track>,
}

/// Parse a playlist document into the canonical track list
///
/// An empty or absent `tracks` array is an error condition the UI has to
/// surface, not a valid playlist.
pub fn parse_playlist(json: &str) -> Result<Vec<Track>> {
    let document: PlaylistDocument = serde_json::from_str(json)?;
    if document.tracks.is_empty() {
        return Err(AriaError::EmptyPlaylist);
    }
    Ok(document.tracks)
}
