//! The recommendation query: free text in, candidate tracks out.

use std::sync::Arc;

use vibewise_core::{CandidateTrack, Catalog};

use crate::embedder::{l2_normalize, Embedder};
use crate::error::{SearchError, SearchResult};
use crate::index::TrackIndex;

/// Default number of candidates per query.
pub const DEFAULT_TOP_K: usize = 5;

/// Nearest-neighbor recommendation over the prebuilt index.
///
/// Holds the process-wide read-only handles: embedding model, vector index,
/// and metadata catalog.
#[derive(Debug)]
pub struct Recommender {
    embedder: Embedder,
    index: TrackIndex,
    catalog: Arc<Catalog>,
}

impl Recommender {
    #[must_use]
    pub fn new(embedder: Embedder, index: TrackIndex, catalog: Arc<Catalog>) -> Self {
        Self {
            embedder,
            index,
            catalog,
        }
    }

    /// The top-`top_k` tracks nearest to `query`, most similar first.
    ///
    /// The query is embedded and L2-normalized, so the inner-product search
    /// ranks by cosine similarity. Rows the index knows but the catalog does
    /// not are skipped with a warning; output length is at most `top_k`.
    ///
    /// # Errors
    /// Returns [`SearchError::EmptyQuery`] for blank input (callers guard
    /// before invoking; this keeps the contract for programmatic use), or an
    /// embedding/index error.
    pub fn recommend(&self, query: &str, top_k: usize) -> SearchResult<Vec<CandidateTrack>> {
        let query = validated(query)?;

        let mut vector = self.embedder.embed(query)?;
        l2_normalize(&mut vector);

        let neighbors = self.index.nearest(&vector, top_k)?;
        log::debug!("Query \"{query}\" matched {} rows", neighbors.len());

        let candidates = neighbors
            .into_iter()
            .filter_map(|neighbor| match self.catalog.get(neighbor.key) {
                Some(record) => Some(CandidateTrack::new(
                    record.song.clone(),
                    record.artist.clone(),
                    record.text.clone(),
                )),
                None => {
                    log::warn!("Index row {} missing from catalog, skipping", neighbor.key);
                    None
                }
            })
            .collect();

        Ok(candidates)
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}

/// Trim the query and reject blank input.
fn validated(query: &str) -> SearchResult<&str> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(query)
}
