//! HTTP client for the browsing-log collector
//!
//! Implements the one-shot delivery protocol: a single JSON POST per
//! event, and any JSON reply counts as accepted. The reply body is not
//! schema-validated and the status code is not consulted. Failures are
//! terminal for that event; the monitor never retries or queues.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::config::CollectorConfig;
use crate::error::{Error, Result};

use super::payload::BrowsingPayload;

/// Delivery boundary between the monitor and the network stack.
#[async_trait]
pub trait Deliver: Send + Sync {
    /// Deliver one payload, returning the collector's parsed JSON reply.
    async fn deliver(&self, payload: &BrowsingPayload) -> Result<serde_json::Value>;
}

/// HTTP client for the collector's browsing-log endpoint.
pub struct CollectorClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl CollectorClient {
    /// Create a new collector client from configuration
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Deliver for CollectorClient {
    async fn deliver(&self, payload: &BrowsingPayload) -> Result<serde_json::Value> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::Collector(format!("HTTP request failed: {}", e)))?;

        // The collector answers accepted and rejected events alike with a
        // JSON body; the reply is reported as-is.
        response
            .json()
            .await
            .map_err(|e| Error::Collector(format!("failed to parse response: {}", e)))
    }
}
