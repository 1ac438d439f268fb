//! HTTP access to the feed endpoints.
//!
//! One GET per call, never retried and never cached. A non-success status
//! becomes a network error carrying the status code; a body that is not
//! JSON becomes a format error.

use crate::{
    normalize::{normalize, Series},
    schema::FeedSchema,
};
use reqwest::Client;
use serde_json::Value;
use swma_common::{Result, SwmaError};
use swma_config::FeedsConfig;
use tracing::{debug, instrument};

/// Thin wrapper around a configured [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Builds a client with the timeout and user agent from `config`.
    pub fn new(config: &FeedsConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SwmaError::network_with_source("Failed to create HTTP client", e))?;
        Ok(Self { client })
    }

    /// Fetches `url` and parses the body as JSON.
    #[instrument(skip(self))]
    pub async fn fetch_json(&self, url: &str) -> Result<Value> {
        let body = self.get(url).await?;
        let value = serde_json::from_slice(&body)
            .map_err(|e| SwmaError::format_with_source(format!("{url} did not return JSON"), e))?;
        Ok(value)
    }

    /// Fetches `url` and returns the raw body.
    #[instrument(skip(self))]
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.get(url).await
    }

    /// Fetches `url` and normalizes it with `schema`.
    pub async fn fetch_series(&self, url: &str, schema: &FeedSchema) -> Result<Series> {
        let payload = self.fetch_json(url).await?;
        normalize(schema, &payload)
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SwmaError::http_status(url, status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Fetched feed");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swma_common::test_utils::{feed_fixtures, FixtureRoute, FixtureServer};

    fn client() -> FeedClient {
        FeedClient::new(&FeedsConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_json_array() {
        let server = FixtureServer::start(vec![FixtureRoute::json("/kp.json", feed_fixtures::KP)]).await;
        let value = client().fetch_json(&server.url("/kp.json")).await.unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_error() {
        let server = FixtureServer::start(vec![FixtureRoute::raw(
            "/down.json",
            503,
            "text/plain",
            b"maintenance".to_vec(),
        )])
        .await;

        let err = client().fetch_json(&server.url("/down.json")).await.unwrap_err();
        assert!(matches!(err, SwmaError::Network { .. }));
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_missing_path_is_404() {
        let server = FixtureServer::start(Vec::new()).await;
        let err = client().fetch_bytes(&server.url("/nothing")).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_invalid_json_is_format_error() {
        let server = FixtureServer::start(vec![FixtureRoute::raw(
            "/broken.json",
            200,
            "application/json",
            b"[{\"time_tag\":".to_vec(),
        )])
        .await;

        let err = client().fetch_json(&server.url("/broken.json")).await.unwrap_err();
        assert!(matches!(err, SwmaError::Format { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();

        let err = client()
            .fetch_json(&format!("http://{addr}/gone.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, SwmaError::Network { status: None, .. }));
    }
}
