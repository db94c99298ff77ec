//! HTTP client for the Stash GraphQL endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::api::{StashApi, StashError};

/// Header Stash reads the API key from.
pub const API_KEY_HEADER: &str = "ApiKey";

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    /// Some servers send `"errors": null` on success.
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

impl GraphqlResponse {
    fn error_message(&self) -> Option<String> {
        let errors = self.errors.as_deref().unwrap_or_default();
        if errors.is_empty() {
            return None;
        }
        Some(
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// GraphQL client for a Stash instance.
pub struct GraphqlClient {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl GraphqlClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `url` - Full URL of the GraphQL endpoint (e.g., "http://localhost:9999/graphql")
    /// * `api_key` - Optional API key, sent in the `ApiKey` header
    /// * `timeout` - Per-request timeout
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, StashError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StashError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }
}

#[async_trait]
impl StashApi for GraphqlClient {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, StashError> {
        debug!(url = %self.url, "Sending GraphQL request");

        let mut req_builder = self.client.post(&self.url).json(&GraphqlRequest {
            query,
            variables: &variables,
        });

        if let Some(api_key) = &self.api_key {
            req_builder = req_builder.header(API_KEY_HEADER, api_key);
        }

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                StashError::Timeout
            } else {
                StashError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StashError::Connection(format!("Failed to read response body: {}", e)))?;

        let parsed = serde_json::from_str::<GraphqlResponse>(&body);

        if !status.is_success() {
            // Stash reports validation failures with a non-2xx status and a GraphQL body.
            if let Some(message) = parsed.ok().and_then(|r| r.error_message()) {
                return Err(StashError::GraphQl(message));
            }
            return Err(StashError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed = parsed.map_err(|e| {
            StashError::InvalidResponse(format!("Failed to parse GraphQL response: {}", e))
        })?;

        if let Some(message) = parsed.error_message() {
            return Err(StashError::GraphQl(message));
        }

        parsed
            .data
            .ok_or_else(|| StashError::InvalidResponse("Response has no data".to_string()))
    }
}
