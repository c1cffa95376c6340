use thiserror::Error;

/// Errors from the recommendation query path.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query was empty or whitespace-only; callers reject these before
    /// issuing a recommendation.
    #[error("query is empty")]
    EmptyQuery,

    /// The embedding model failed to load or encode.
    #[error("embedding error: {0}")]
    Embed(String),

    /// The vector index failed to load or search.
    #[error("vector index error: {0}")]
    Index(String),
}

/// Convenience alias for search results.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
