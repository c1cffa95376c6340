//! Search-term construction shared by the lookup clients.

/// The free-text term sent to both lookup services: the song title, with the
/// artist appended when one is known.
#[must_use]
pub fn search_term(song: &str, artist: Option<&str>) -> String {
    match artist {
        Some(artist) => format!("{song} {artist}"),
        None => song.to_string(),
    }
}
