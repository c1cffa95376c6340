//! Prebuilt track vector index.

use std::fmt;
use std::path::Path;

use usearch::{new_index, Index, IndexOptions, MetricKind, ScalarKind};

use crate::error::{SearchError, SearchResult};

/// One nearest-neighbor hit: the catalog row key and the index's distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub key: u64,
    pub distance: f32,
}

/// Handle to the prebuilt usearch index over the track corpus.
///
/// The index stores L2-normalized embeddings, so inner-product distance
/// ranks by cosine similarity. Loaded once from a named file and shared
/// read-only; never mutated after load.
pub struct TrackIndex {
    index: Index,
}

impl fmt::Debug for TrackIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackIndex")
            .field("size", &self.index.size())
            .field("dimensions", &self.index.dimensions())
            .finish_non_exhaustive()
    }
}

impl TrackIndex {
    /// Restore the index from a file and verify its dimensionality against
    /// the embedding model's.
    ///
    /// # Errors
    /// Returns an error if the file is missing or corrupt, or if its
    /// dimensions do not match `dimensions`; fatal at startup.
    pub fn load(path: impl AsRef<Path>, dimensions: usize) -> SearchResult<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| SearchError::Index("index path is not valid UTF-8".to_string()))?;

        let index = empty_index(dimensions)?;
        index
            .load(path_str)
            .map_err(|e| SearchError::Index(format!("failed to load {}: {e}", path.display())))?;

        if index.dimensions() != dimensions {
            return Err(SearchError::Index(format!(
                "index {} has {} dimensions, expected {}",
                path.display(),
                index.dimensions(),
                dimensions
            )));
        }

        log::info!(
            "Loaded vector index {} ({} tracks)",
            path.display(),
            index.size()
        );
        Ok(Self { index })
    }

    /// The `k` nearest rows to `vector`, most similar first. Ties fall back
    /// to the index's native order, which is opaque.
    pub fn nearest(&self, vector: &[f32], k: usize) -> SearchResult<Vec<Neighbor>> {
        let matches = self
            .index
            .search(vector, k)
            .map_err(|e| SearchError::Index(e.to_string()))?;

        Ok(matches
            .keys
            .into_iter()
            .zip(matches.distances)
            .map(|(key, distance)| Neighbor { key, distance })
            .collect())
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.index.size()
    }

    #[cfg(test)]
    fn from_index(index: Index) -> Self {
        Self { index }
    }
}

fn empty_index(dimensions: usize) -> SearchResult<Index> {
    let mut options = IndexOptions::default();
    options.dimensions = dimensions;
    options.metric = MetricKind::IP;
    options.quantization = ScalarKind::F32;

    new_index(&options).map_err(|e| SearchError::Index(e.to_string()))
}
