//! Service error taxonomy.

use thiserror::Error;

/// Errors surfaced by REST service operations.
///
/// Failures propagate to the dispatch layer instead of being swallowed in
/// the service; the dispatch layer decides whether the store keeps its
/// value (the default) or applies a fallback.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport failure or a non-2xx response other than 404.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered 404 for the addressed entity.
    #[error("not found: {0}")]
    NotFound(String),
    /// The response body did not match the expected wire schema.
    #[error("decode error: {0}")]
    Decode(String),
}
