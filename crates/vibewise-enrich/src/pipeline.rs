//! Bounded fan-out enrichment.
//!
//! One task per candidate row, at most [`MAX_IN_FLIGHT`] in flight; each
//! task runs its two lookups concurrently. The batch joins before anything
//! is returned, and every input row yields exactly one output record; a
//! row whose lookups all fail (or whose task dies) degrades to a record
//! with absent assets rather than being dropped.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use vibewise_core::{CandidateTrack, EnrichedTrack};

use crate::error::LookupResult;
use crate::itunes::ItunesClient;
use crate::video::{VideoClient, VideoHit};

/// Worker-pool bound: how many row tasks may run at once.
pub const MAX_IN_FLIGHT: usize = 5;

/// A source of cover-art URLs.
#[async_trait]
pub trait CoverSource: Send + Sync {
    async fn lookup_cover(&self, song: &str, artist: Option<&str>) -> LookupResult<Option<String>>;
}

/// A source of playable videos.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn lookup_video(&self, song: &str, artist: Option<&str>)
        -> LookupResult<Option<VideoHit>>;
}

#[async_trait]
impl CoverSource for ItunesClient {
    async fn lookup_cover(&self, song: &str, artist: Option<&str>) -> LookupResult<Option<String>> {
        ItunesClient::lookup_cover(self, song, artist).await
    }
}

#[async_trait]
impl VideoSource for VideoClient {
    async fn lookup_video(
        &self,
        song: &str,
        artist: Option<&str>,
    ) -> LookupResult<Option<VideoHit>> {
        VideoClient::lookup_video(self, song, artist).await
    }
}

/// The enrichment pipeline over a pair of lookup sources.
pub struct Enricher<C, V> {
    cover: Arc<C>,
    video: Arc<V>,
    max_in_flight: usize,
}

impl<C, V> fmt::Debug for Enricher<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enricher")
            .field("max_in_flight", &self.max_in_flight)
            .finish_non_exhaustive()
    }
}

impl<C, V> Enricher<C, V>
where
    C: CoverSource + 'static,
    V: VideoSource + 'static,
{
    #[must_use]
    pub fn new(cover: C, video: V) -> Self {
        Self {
            cover: Arc::new(cover),
            video: Arc::new(video),
            max_in_flight: MAX_IN_FLIGHT,
        }
    }

    /// Override the worker-pool bound (must be at least 1).
    #[must_use]
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Enrich a batch of candidates into display-ready records.
    ///
    /// Blocks until every row task has joined. Output is in input order and
    /// has exactly one record per candidate; this method never fails.
    pub async fn enrich(&self, candidates: &[CandidateTrack]) -> Vec<EnrichedTrack> {
        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();

        for (rank, track) in candidates.iter().cloned().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let cover = Arc::clone(&self.cover);
            let video = Arc::clone(&self.video);

            tasks.spawn(async move {
                // `acquire` only fails when the semaphore is closed, which
                // we never do.
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("enrichment semaphore unexpectedly closed");
                let record = enrich_one(cover.as_ref(), video.as_ref(), &track).await;
                (rank, record)
            });
        }

        // Tasks complete in arbitrary order; slots keyed by rank make the
        // output deterministic and leave a hole for any task that died.
        let mut slots: Vec<Option<EnrichedTrack>> = vec![None; candidates.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((rank, record)) => slots[rank] = Some(record),
                Err(e) => log::error!("Enrichment task failed: {e}"),
            }
        }

        slots
            .into_iter()
            .zip(candidates)
            .map(|(slot, track)| slot.unwrap_or_else(|| EnrichedTrack::degraded(track.clone())))
            .collect()
    }
}

/// Enrich a single row: both lookups concurrently, failures degraded to
/// absent assets. The cover slot falls back to the video thumbnail.
async fn enrich_one<C, V>(cover: &C, video: &V, track: &CandidateTrack) -> EnrichedTrack
where
    C: CoverSource,
    V: VideoSource,
{
    let artist = track.artist_hint();

    let (cover_result, video_result) = tokio::join!(
        cover.lookup_cover(&track.song, artist),
        video.lookup_video(&track.song, artist),
    );

    let cover_url = match cover_result {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Cover lookup failed for \"{}\": {e}", track.song);
            None
        }
    };

    let video_hit = match video_result {
        Ok(hit) => hit,
        Err(e) => {
            log::warn!("Video lookup failed for \"{}\": {e}", track.song);
            None
        }
    };

    let (thumbnail, link) = match video_hit {
        Some(hit) => (Some(hit.thumbnail), Some(hit.link)),
        None => (None, None),
    };

    EnrichedTrack {
        song: track.song.clone(),
        artist: track.artist.clone(),
        text: track.text.clone(),
        cover: cover_url.or(thumbnail),
        link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;

    struct StaticCover(Option<String>);

    #[async_trait]
    impl CoverSource for StaticCover {
        async fn lookup_cover(
            &self,
            _song: &str,
            _artist: Option<&str>,
        ) -> LookupResult<Option<String>> {
            Ok(self.0.clone())
        }
    }

    struct StaticVideo(Option<VideoHit>);

    #[async_trait]
    impl VideoSource for StaticVideo {
        async fn lookup_video(
            &self,
            _song: &str,
            _artist: Option<&str>,
        ) -> LookupResult<Option<VideoHit>> {
            Ok(self.0.clone())
        }
    }

    struct FailingCover;

    #[async_trait]
    impl CoverSource for FailingCover {
        async fn lookup_cover(
            &self,
            _song: &str,
            _artist: Option<&str>,
        ) -> LookupResult<Option<String>> {
            Err(LookupError::Http {
                service: "iTunes".to_string(),
                message: "timed out".to_string(),
            })
        }
    }

    struct FailingVideo;

    #[async_trait]
    impl VideoSource for FailingVideo {
        async fn lookup_video(
            &self,
            _song: &str,
            _artist: Option<&str>,
        ) -> LookupResult<Option<VideoHit>> {
            Err(LookupError::Http {
                service: "video search".to_string(),
                message: "timed out".to_string(),
            })
        }
    }

    fn candidates(n: usize) -> Vec<CandidateTrack> {
        (0..n)
            .map(|i| CandidateTrack::new(format!("Song {i}"), format!("Artist {i}"), "la la la"))
            .collect()
    }

    #[tokio::test]
    async fn test_cover_preferred_over_thumbnail() {
        let enricher = Enricher::new(
            StaticCover(Some("https://covers/600x600.jpg".to_string())),
            StaticVideo(Some(VideoHit {
                thumbnail: "https://thumbs/1.jpg".to_string(),
                link: "https://watch/1".to_string(),
            })),
        );

        let records = enricher.enrich(&candidates(1)).await;
        assert_eq!(records[0].cover.as_deref(), Some("https://covers/600x600.jpg"));
        assert_eq!(records[0].link.as_deref(), Some("https://watch/1"));
    }

    #[tokio::test]
    async fn test_thumbnail_fallback_when_cover_missing() {
        let enricher = Enricher::new(
            StaticCover(None),
            StaticVideo(Some(VideoHit {
                thumbnail: "https://thumbs/1.jpg".to_string(),
                link: "https://watch/1".to_string(),
            })),
        );

        let records = enricher.enrich(&candidates(1)).await;
        assert_eq!(records[0].cover.as_deref(), Some("https://thumbs/1.jpg"));
    }

    #[tokio::test]
    async fn test_both_lookups_failing_degrade_not_drop() {
        let enricher = Enricher::new(FailingCover, FailingVideo);

        let records = enricher.enrich(&candidates(3)).await;
        assert_eq!(records.len(), 3);
        for record in &records {
            assert!(record.cover.is_none());
            assert!(record.link.is_none());
        }
    }

    #[tokio::test]
    async fn test_output_matches_input_order() {
        let enricher = Enricher::new(StaticCover(None), StaticVideo(None));

        let input = candidates(7);
        let records = enricher.enrich(&input).await;

        assert_eq!(records.len(), input.len());
        for (record, track) in records.iter().zip(&input) {
            assert_eq!(record.song, track.song);
            assert_eq!(record.artist, track.artist);
            assert_eq!(record.text, track.text);
        }
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let enricher = Enricher::new(StaticCover(None), StaticVideo(None));
        assert!(enricher.enrich(&[]).await.is_empty());
    }
}
