//! Persistence layer: the append-only `hub_analytics` log.
//!
//! Provides the [`AnalyticsStore`] trait for recording served requests and
//! reading per-slug usage counts. [`PostgresAnalytics`] is the production
//! backend; [`MemoryAnalytics`] keeps rows in process for local runs and
//! tests.

pub mod memory;
pub mod models;
pub mod postgres;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::AnalyticsEvent;
use crate::error::HubError;

pub use memory::MemoryAnalytics;
pub use models::StoredEvent;
pub use postgres::PostgresAnalytics;

/// Append-only store of analytics events.
#[async_trait]
pub trait AnalyticsStore: Send + Sync + std::fmt::Debug {
    /// Appends one event and returns its row ID.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Persistence`] on storage failure.
    async fn record(&self, event: &AnalyticsEvent) -> Result<i64, HubError>;

    /// Returns the number of recorded events per slug on `branch`.
    /// Events without a slug (listings) are not counted.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Persistence`] on storage failure.
    async fn usage_counts(&self, branch: &str) -> Result<HashMap<String, i64>, HubError>;

    /// Short backend name for health output and logs.
    fn backend_name(&self) -> &'static str;
}

/// Shared, type-erased analytics store held by the service.
pub type SharedAnalytics = Arc<dyn AnalyticsStore>;
