//! Query embedding.

use std::fmt;
use std::path::Path;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::error::{SearchError, SearchResult};

/// Output width of AllMiniLM-L6-v2, the model the track index was built with.
pub const EMBEDDING_DIM: usize = 384;

/// Sentence-embedding model handle.
///
/// Loaded once from a named cache directory and shared read-only across all
/// queries.
pub struct Embedder {
    model: TextEmbedding,
}

impl fmt::Debug for Embedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Embedder")
            .field("dimensions", &EMBEDDING_DIM)
            .finish_non_exhaustive()
    }
}

impl Embedder {
    /// Load the embedding model from `model_dir`.
    ///
    /// # Errors
    /// Returns an error if the model cannot be loaded; this is fatal at
    /// startup.
    pub fn new(model_dir: impl AsRef<Path>) -> SearchResult<Self> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2)
                .with_cache_dir(model_dir.as_ref().to_path_buf())
                .with_show_download_progress(false),
        )
        .map_err(|e| SearchError::Embed(e.to_string()))?;

        Ok(Self { model })
    }

    /// Encode one query string into a fixed-length vector.
    pub fn embed(&self, text: &str) -> SearchResult<Vec<f32>> {
        let mut embeddings = self
            .model
            .embed(vec![text], None)
            .map_err(|e| SearchError::Embed(e.to_string()))?;

        match embeddings.pop() {
            Some(vector) => Ok(vector),
            None => Err(SearchError::Embed("model returned no embedding".to_string())),
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> usize {
        EMBEDDING_DIM
    }
}

/// Scale a vector to unit length, so inner-product search ranks by cosine
/// similarity. Zero vectors are left untouched.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize_unit_length() {
        let mut vector = vec![3.0, 4.0];
        l2_normalize(&mut vector);
        assert!((vector[0] - 0.6).abs() < 1e-6);
        assert!((vector[1] - 0.8).abs() < 1e-6);

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_zero_vector_untouched() {
        let mut vector = vec![0.0, 0.0, 0.0];
        l2_normalize(&mut vector);
        assert_eq!(vector, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_l2_normalize_already_unit() {
        let mut vector = vec![1.0, 0.0];
        l2_normalize(&mut vector);
        assert_eq!(vector, vec![1.0, 0.0]);
    }
}
