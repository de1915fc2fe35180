use thiserror::Error;

/// Failures surfaced by the search engine.
///
/// Deduplication is infallible and has no error type.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The pattern could not be compiled. Raised before any source is read.
    #[error("invalid search pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// The scheduler asked the search to stop at a yield point.
    #[error("search cancelled")]
    Cancelled,
}
