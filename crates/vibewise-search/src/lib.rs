//! Vector search for vibewise.
//!
//! Wraps the two external engines the recommendation query relies on: a
//! fastembed sentence-embedding model and a prebuilt usearch index over the
//! track corpus. Both are loaded once from named resource paths and shared
//! read-only for the life of the process.

#![deny(unsafe_code)]

pub mod embedder;
pub mod error;
pub mod index;
pub mod recommend;

pub use embedder::{l2_normalize, Embedder, EMBEDDING_DIM};
pub use error::{SearchError, SearchResult};
pub use index::{Neighbor, TrackIndex};
pub use recommend::{Recommender, DEFAULT_TOP_K};
