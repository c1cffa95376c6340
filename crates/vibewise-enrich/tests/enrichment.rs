//! Integration tests for the enrichment pipeline.
//!
//! These use instrumented fake lookup sources rather than real HTTP calls,
//! so the concurrency and failure-isolation properties can be verified
//! deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use vibewise_core::CandidateTrack;
use vibewise_enrich::{
    CoverSource, Enricher, LookupError, LookupResult, VideoHit, VideoSource, MAX_IN_FLIGHT,
};

/// Cover source that records how many row tasks are inside it at once.
struct InstrumentedCover {
    active: Arc<AtomicUsize>,
    high_water: Arc<AtomicUsize>,
}

#[async_trait]
impl CoverSource for InstrumentedCover {
    async fn lookup_cover(&self, song: &str, _artist: Option<&str>) -> LookupResult<Option<String>> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(Some(format!("https://covers/{song}.jpg")))
    }
}

struct SilentVideo;

#[async_trait]
impl VideoSource for SilentVideo {
    async fn lookup_video(
        &self,
        _song: &str,
        _artist: Option<&str>,
    ) -> LookupResult<Option<VideoHit>> {
        Ok(None)
    }
}

/// Fails lookups for one specific song, answers for everything else.
struct SelectiveVideo {
    poison: String,
}

#[async_trait]
impl VideoSource for SelectiveVideo {
    async fn lookup_video(
        &self,
        song: &str,
        _artist: Option<&str>,
    ) -> LookupResult<Option<VideoHit>> {
        if song == self.poison {
            return Err(LookupError::Http {
                service: "video search".to_string(),
                message: "boom".to_string(),
            });
        }
        Ok(Some(VideoHit {
            thumbnail: format!("https://thumbs/{song}.jpg"),
            link: format!("https://watch/{song}"),
        }))
    }
}

struct SilentCover;

#[async_trait]
impl CoverSource for SilentCover {
    async fn lookup_cover(
        &self,
        _song: &str,
        _artist: Option<&str>,
    ) -> LookupResult<Option<String>> {
        Ok(None)
    }
}

fn batch(n: usize) -> Vec<CandidateTrack> {
    (0..n)
        .map(|i| CandidateTrack::new(format!("Song {i}"), format!("Artist {i}"), format!("text {i}")))
        .collect()
}

#[tokio::test]
async fn concurrency_stays_within_worker_pool_bound() {
    let active = Arc::new(AtomicUsize::new(0));
    let high_water = Arc::new(AtomicUsize::new(0));

    let enricher = Enricher::new(
        InstrumentedCover {
            active: Arc::clone(&active),
            high_water: Arc::clone(&high_water),
        },
        SilentVideo,
    );

    let records = enricher.enrich(&batch(9)).await;

    assert_eq!(records.len(), 9);
    let peak = high_water.load(Ordering::SeqCst);
    assert!(peak <= MAX_IN_FLIGHT, "peak concurrency {peak} exceeded the pool bound");
    assert!(peak >= 2, "rows were not actually enriched concurrently");
    assert_eq!(active.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn every_row_yields_exactly_one_traceable_record() {
    let enricher = Enricher::new(SilentCover, SilentVideo);

    let input = batch(12);
    let records = enricher.enrich(&input).await;

    assert_eq!(records.len(), input.len());
    for (record, track) in records.iter().zip(&input) {
        assert_eq!(record.song, track.song);
        assert_eq!(record.artist, track.artist);
    }
}

#[tokio::test]
async fn one_rows_failure_does_not_abort_the_batch() {
    let enricher = Enricher::new(
        SilentCover,
        SelectiveVideo {
            poison: "Song 1".to_string(),
        },
    );

    let records = enricher.enrich(&batch(3)).await;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].link.as_deref(), Some("https://watch/Song 0"));
    assert!(records[1].link.is_none());
    assert!(records[1].cover.is_none());
    assert_eq!(records[2].link.as_deref(), Some("https://watch/Song 2"));
}

#[tokio::test]
async fn custom_pool_bound_is_respected() {
    let active = Arc::new(AtomicUsize::new(0));
    let high_water = Arc::new(AtomicUsize::new(0));

    let enricher = Enricher::new(
        InstrumentedCover {
            active: Arc::clone(&active),
            high_water: Arc::clone(&high_water),
        },
        SilentVideo,
    )
    .with_max_in_flight(2);

    let records = enricher.enrich(&batch(6)).await;

    assert_eq!(records.len(), 6);
    assert!(high_water.load(Ordering::SeqCst) <= 2);
}
