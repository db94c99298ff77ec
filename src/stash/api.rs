//! Transport-level contract for the Stash GraphQL endpoint.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when executing a single GraphQL operation.
#[derive(Debug, Error)]
pub enum StashError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request timeout")]
    Timeout,
}

/// A client able to run GraphQL operations against a Stash instance.
///
/// The real implementation is [`super::GraphqlClient`]; tests substitute
/// in-memory fakes that record the operations they receive.
#[async_trait]
pub trait StashApi: Send + Sync {
    /// Execute `query` with the given `variables`.
    ///
    /// On success returns the `data` member of the GraphQL response.
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, StashError>;
}
