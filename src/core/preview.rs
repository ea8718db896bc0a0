//! Client side of the preview endpoint.
//!
//! Previews are fetched in a single round trip for all selected paths so the remote
//! side can apply one consistent truncation policy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::CoreError;
use crate::config::AppConfig;

/// Path of the preview route, relative to the configured base URL.
pub const PREVIEW_ROUTE: &str = "/read-context-files";

/// A truncated text rendering of one selected path, as returned by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewEntry {
    #[serde(rename = "file_path")]
    pub path: String,
    pub filename: String,
    pub text_preview: String,
    pub text_length: u64,
}

/// Request body of `POST /read-context-files`.
#[derive(Debug, Serialize)]
struct PreviewRequest<'a> {
    question: &'a str,
    file_paths: &'a [String],
}

/// Retrieves previews for a batch of paths.
///
/// Implementations must not touch the network for an empty batch.
#[async_trait]
pub trait PreviewService: Send + Sync {
    async fn fetch_previews(
        &self,
        question: &str,
        paths: &[String],
    ) -> Result<Vec<PreviewEntry>, CoreError>;
}

/// The production implementation backed by `reqwest`.
pub struct HttpPreviewService {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpPreviewService {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.preview_base_url.clone(), config.preview_timeout_secs)
    }

    fn endpoint(&self) -> Result<String, CoreError> {
        let base = self.base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(CoreError::InvalidUrl(self.base_url.clone()));
        }
        Ok(format!("{}{}", base, PREVIEW_ROUTE))
    }
}

#[async_trait]
impl PreviewService for HttpPreviewService {
    async fn fetch_previews(
        &self,
        question: &str,
        paths: &[String],
    ) -> Result<Vec<PreviewEntry>, CoreError> {
        if paths.is_empty() {
            tracing::debug!("Preview requested for an empty batch, skipping request.");
            return Ok(Vec::new());
        }

        let url = self.endpoint()?;
        tracing::info!("Requesting previews for {} path(s) from {}", paths.len(), url);

        let response = self
            .client
            .post(&url)
            .json(&PreviewRequest {
                question,
                file_paths: paths,
            })
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let entries: Vec<PreviewEntry> =
            serde_json::from_str(&body).map_err(CoreError::MalformedPayload)?;
        tracing::info!("Received {} preview(s).", entries.len());
        Ok(entries)
    }
}
