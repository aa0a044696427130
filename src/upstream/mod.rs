//! Upstream content layer: where manifests and cookbook documents come from.
//!
//! [`ContentSource`] abstracts the remote host so the service can be driven
//! by GitHub raw content in production and by fakes in tests.

pub mod github;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Branch, Slug};
use crate::error::HubError;

pub use github::GitHubRawSource;

/// Read-only access to the documentation sources of a branch.
#[async_trait]
pub trait ContentSource: Send + Sync + std::fmt::Debug {
    /// Fetches `mkdocs.yml` for `branch`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::DocumentNotFound`] if the upstream has no such
    /// file, or an upstream error variant on transport failure.
    async fn fetch_manifest(&self, branch: &Branch) -> Result<String, HubError>;

    /// Fetches `docs/hub/{slug}.md` for `branch`.
    ///
    /// # Errors
    ///
    /// Same as [`ContentSource::fetch_manifest`].
    async fn fetch_document(&self, branch: &Branch, slug: &Slug) -> Result<String, HubError>;
}

/// Shared, type-erased content source held by the service.
pub type SharedSource = Arc<dyn ContentSource>;
