//! Video lookup via an Invidious-compatible search API.
//!
//! The instance URL is configurable (public instances come and go). The API
//! has no limit parameter; the first video hit is taken. The watch link
//! points at YouTube proper so any player can open it.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::{LookupError, LookupResult};
use crate::query::search_term;

const VIDEO_TIMEOUT: Duration = Duration::from_secs(4);

const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
    #[serde(rename = "videoThumbnails", default)]
    video_thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// A playable video found for a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoHit {
    pub thumbnail: String,
    pub link: String,
}

/// Invidious-style video search client.
#[derive(Debug, Clone)]
pub struct VideoClient {
    http: Client,
    api_base: String,
}

impl VideoClient {
    /// Create a new video client against `api_base` (an Invidious instance).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_base: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(VIDEO_TIMEOUT)
            .user_agent("vibewise/0.1.0 (https://github.com/vibewise/vibewise)")
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.into(),
        })
    }

    /// Find a video (thumbnail + watch link) for a song.
    ///
    /// Returns `Ok(None)` when nothing matches or the first hit carries no
    /// usable thumbnail.
    pub async fn lookup_video(
        &self,
        song: &str,
        artist: Option<&str>,
    ) -> LookupResult<Option<VideoHit>> {
        let term = search_term(song, artist);
        let url = format!("{}/api/v1/search", self.api_base.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .query(&[("q", term.as_str()), ("type", "video")])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| LookupError::Http {
                service: "video search".to_string(),
                message: e.to_string(),
            })?;

        let items: Vec<SearchItem> = response.json().await.map_err(|e| LookupError::Parse {
            service: "video search".to_string(),
            message: e.to_string(),
        })?;

        Ok(self.first_hit(&items))
    }

    fn first_hit(&self, items: &[SearchItem]) -> Option<VideoHit> {
        let item = items.iter().find(|item| item.video_id.is_some())?;
        let video_id = item.video_id.as_deref()?;
        let thumbnail = item.video_thumbnails.first()?;

        Some(VideoHit {
            thumbnail: self.absolute_thumbnail(&thumbnail.url),
            link: format!("{WATCH_BASE}{video_id}"),
        })
    }

    /// Some instances return thumbnail paths relative to themselves.
    fn absolute_thumbnail(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{url}", self.api_base.trim_end_matches('/'))
        } else {
            url.to_string()
        }
    }
}
