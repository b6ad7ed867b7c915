//! # HTTP Form API
//!
//! Talks to a remote availability API:
//!
//! - `GET {base}/locations` returns a JSON array of strings
//! - `GET {base}/names/validate?name=<name>` returns `{"valid": bool}`

use super::{LocationProvider, NameValidator};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Body of the name validation endpoint
#[derive(Debug, Deserialize)]
struct NameValidity {
    valid: bool,
}

/// Availability API client backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFormApi {
    client: Client,
    base_url: String,
}

impl HttpFormApi {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        tracing::debug!("HttpFormApi created for {} (timeout {:?})", base_url, timeout);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl LocationProvider for HttpFormApi {
    async fn get_locations(&self) -> Result<Vec<String>> {
        let url = self.endpoint("/locations");
        tracing::debug!("GET {}", url);

        let locations = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("{url} returned an error status"))?
            .json::<Vec<String>>()
            .await
            .with_context(|| format!("{url} returned malformed location list"))?;

        tracing::info!("Fetched {} locations", locations.len());
        Ok(locations)
    }
}

#[async_trait]
impl NameValidator for HttpFormApi {
    async fn is_name_valid(&self, name: &str) -> Result<bool> {
        let url = self.endpoint("/names/validate");
        tracing::debug!("GET {} name={:?}", url, name);

        let validity = self
            .client
            .get(&url)
            .query(&[("name", name)])
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("{url} returned an error status"))?
            .json::<NameValidity>()
            .await
            .with_context(|| format!("{url} returned a malformed verdict"))?;

        Ok(validity.valid)
    }
}
