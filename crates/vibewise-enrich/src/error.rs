//! Lookup error types for the enrichment pipeline.

use thiserror::Error;

/// Errors that can occur during a single external lookup.
///
/// These are contained at the pipeline boundary: a failed lookup yields an
/// absent asset in the output record, never a failed batch.
#[derive(Debug, Error)]
pub enum LookupError {
    /// An HTTP request to a lookup service failed.
    #[error("HTTP error from {service}: {message}")]
    Http { service: String, message: String },

    /// A response from a lookup service could not be parsed.
    #[error("parse error from {service}: {message}")]
    Parse { service: String, message: String },

    /// An error propagated from `reqwest` (timeout, connection, ...).
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Convenience alias for lookup results.
pub type LookupResult<T> = std::result::Result<T, LookupError>;
