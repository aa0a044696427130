//! GitHub raw-content implementation of [`ContentSource`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::ContentSource;
use crate::domain::{Branch, Slug};
use crate::error::HubError;

/// Fetches documentation files from `{base_url}/{branch}/...`.
///
/// Every call goes to the network; there is no caching or retry.
#[derive(Debug, Clone)]
pub struct GitHubRawSource {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubRawSource {
    /// Builds a source with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Internal`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, HubError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| HubError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the raw-content root this source reads from.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn manifest_url(&self, branch: &Branch) -> String {
        format!("{}/{branch}/mkdocs.yml", self.base_url)
    }

    fn document_url(&self, branch: &Branch, slug: &Slug) -> String {
        format!("{}/{branch}/docs/hub/{slug}.md", self.base_url)
    }

    async fn get_text(&self, url: &str, resource: String) -> Result<String, HubError> {
        tracing::debug!(%url, "fetching upstream");

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "upstream request failed");
            transport_error(&e)
        })?;

        match response.status() {
            status if status.is_success() => response.text().await.map_err(|e| {
                tracing::warn!(%url, error = %e, "failed to read upstream body");
                transport_error(&e)
            }),
            StatusCode::NOT_FOUND => Err(HubError::DocumentNotFound(resource)),
            status => {
                tracing::warn!(%url, %status, "upstream returned error status");
                Err(HubError::Upstream(format!("{url} returned {status}")))
            }
        }
    }
}

/// The client timeout spans the whole exchange, so it can fire while
/// waiting for headers or while reading the body.
fn transport_error(e: &reqwest::Error) -> HubError {
    if e.is_timeout() {
        HubError::UpstreamTimeout
    } else {
        HubError::Upstream(e.to_string())
    }
}

#[async_trait]
impl ContentSource for GitHubRawSource {
    async fn fetch_manifest(&self, branch: &Branch) -> Result<String, HubError> {
        self.get_text(&self.manifest_url(branch), format!("{branch}:mkdocs.yml"))
            .await
    }

    async fn fetch_document(&self, branch: &Branch, slug: &Slug) -> Result<String, HubError> {
        self.get_text(
            &self.document_url(branch, slug),
            format!("{branch}:docs/hub/{slug}.md"),
        )
        .await
    }
}
