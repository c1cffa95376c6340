//! Cover-art lookup via the iTunes Search API.
//!
//! One GET per lookup, `limit=1`, short timeout. The API returns artwork at
//! 100x100; the URL is upgraded to 600x600 by substituting the size token.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::{LookupError, LookupResult};
use crate::query::search_term;

const ITUNES_API_BASE: &str = "https://itunes.apple.com/search";

/// Cover lookups are kept on a tight leash; a slow answer is worth less
/// than a fast grid.
const COVER_TIMEOUT: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "resultCount")]
    result_count: u32,
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "artworkUrl100", default)]
    artwork_url_100: Option<String>,
}

/// iTunes Search API client.
#[derive(Debug, Clone)]
pub struct ItunesClient {
    http: Client,
}

impl ItunesClient {
    /// Create a new iTunes client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(COVER_TIMEOUT)
            .user_agent("vibewise/0.1.0 (https://github.com/vibewise/vibewise)")
            .build()?;

        Ok(Self { http })
    }

    /// Find a cover-art URL for a song.
    ///
    /// Returns `Ok(None)` when the service has no match; transport and
    /// parse failures surface as errors for the pipeline to degrade.
    pub async fn lookup_cover(
        &self,
        song: &str,
        artist: Option<&str>,
    ) -> LookupResult<Option<String>> {
        let term = search_term(song, artist);

        let response = self
            .http
            .get(ITUNES_API_BASE)
            .query(&[("term", term.as_str()), ("limit", "1")])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| LookupError::Http {
                service: "iTunes".to_string(),
                message: e.to_string(),
            })?;

        let result: SearchResponse = response.json().await.map_err(|e| LookupError::Parse {
            service: "iTunes".to_string(),
            message: e.to_string(),
        })?;

        if result.result_count == 0 {
            return Ok(None);
        }

        Ok(result
            .results
            .first()
            .and_then(|hit| hit.artwork_url_100.as_deref())
            .map(upscale_artwork))
    }
}

/// Request higher-resolution artwork by rewriting the size token.
fn upscale_artwork(url: &str) -> String {
    url.replace("100x100", "600x600")
}
