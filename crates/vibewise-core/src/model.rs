use serde::{Deserialize, Serialize};

/// A track returned by the nearest-neighbor query, before enrichment.
///
/// Immutable; lives for one query cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTrack {
    pub song: String,
    pub artist: String,
    pub text: String,
}

impl CandidateTrack {
    #[must_use]
    pub fn new(song: impl Into<String>, artist: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            song: song.into(),
            artist: artist.into(),
            text: text.into(),
        }
    }

    /// The artist as an optional search hint: `None` when the field is blank.
    #[must_use]
    pub fn artist_hint(&self) -> Option<&str> {
        let artist = self.artist.trim();
        (!artist.is_empty()).then_some(artist)
    }
}

/// A display-ready track: one candidate plus whatever the lookup services
/// found for it. Either asset may be absent; rendering must tolerate both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedTrack {
    pub song: String,
    pub artist: String,
    pub text: String,
    pub cover: Option<String>,
    pub link: Option<String>,
}

impl EnrichedTrack {
    /// A record with both assets absent, for rows whose lookups all failed.
    #[must_use]
    pub fn degraded(candidate: CandidateTrack) -> Self {
        Self {
            song: candidate.song,
            artist: candidate.artist,
            text: candidate.text,
            cover: None,
            link: None,
        }
    }
}
