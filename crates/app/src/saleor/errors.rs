//! Gateway errors.

use thiserror::Error;

/// Failures of a remote voucher operation itself.
///
/// Field errors reported by a mutation are part of its result and never end
/// up here.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx response or an unexpected body.
    #[error("unexpected response from API: {0}")]
    UnexpectedResponse(String),

    /// The API rejected the request with top-level GraphQL errors.
    #[error("graphql errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),
}
