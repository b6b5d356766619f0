//! Shared HTTP client for every upstream API

use crate::config::HttpConfig;
use crate::error::ServiceError;
use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, warn};

/// Thin wrapper around `reqwest::Client` that turns every call into
/// `Result<T, ServiceError>`. No retries and no timeout beyond reqwest's own.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Create a new client
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// GET `url` with `query` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ServiceError> {
        let response = self.send(url, query).await?;
        let body = response
            .bytes()
            .await
            .map_err(|source| ServiceError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| ServiceError::Malformed {
            url: url.to_string(),
            source,
        })
    }

    async fn send(&self, url: &str, query: &[(&str, &str)]) -> Result<Response, ServiceError> {
        debug!(url, ?query, "Calling upstream API");
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| ServiceError::Transport {
                url: url.to_string(),
                source,
            })?;

        let elapsed = start.elapsed();
        let status = response.status();
        debug!(
            url,
            %status,
            "Upstream responded in {:.3}s",
            elapsed.as_secs_f64()
        );

        if elapsed.as_secs() > 5 {
            warn!(url, "Slow API response detected: {:.3}s", elapsed.as_secs_f64());
        }

        if !status.is_success() {
            return Err(ServiceError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response)
    }
}

/// Append a percent-encoded path segment to a base URL
#[must_use]
pub fn with_segment(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(segment)
    )
}
