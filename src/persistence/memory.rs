//! In-process analytics store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AnalyticsStore;
use super::models::StoredEvent;
use crate::domain::AnalyticsEvent;
use crate::error::HubError;

/// Keeps analytics rows in memory. Rows are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryAnalytics {
    rows: RwLock<Vec<StoredEvent>>,
}

impl MemoryAnalytics {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every recorded row in insertion order.
    pub async fn events(&self) -> Vec<StoredEvent> {
        self.rows.read().await.clone()
    }

    /// Returns the number of recorded rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl AnalyticsStore for MemoryAnalytics {
    async fn record(&self, event: &AnalyticsEvent) -> Result<i64, HubError> {
        let mut rows = self.rows.write().await;
        let id = i64::try_from(rows.len())
            .map_err(|e| HubError::Persistence(e.to_string()))?
            .saturating_add(1);
        rows.push(StoredEvent {
            id,
            event_type: event.event_type.as_str().to_string(),
            user_agent: event.user_agent.clone(),
            request_ip: event.request_ip.clone(),
            request_time: event.request_time,
            branch: event.branch.clone(),
            slug: event.slug.clone(),
        });
        Ok(id)
    }

    async fn usage_counts(&self, branch: &str) -> Result<HashMap<String, i64>, HubError> {
        let rows = self.rows.read().await;
        let mut counts = HashMap::new();
        for row in rows.iter().filter(|r| r.branch == branch) {
            if let Some(slug) = &row.slug {
                *counts.entry(slug.clone()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Branch, EventType, RequestMeta, Slug};

    fn event(event_type: EventType, branch: &str, slug: Option<&str>) -> AnalyticsEvent {
        let Ok(branch) = Branch::parse(branch) else {
            panic!("valid branch");
        };
        let slug = slug.map(|s| {
            let Ok(slug) = Slug::parse(s) else {
                panic!("valid slug");
            };
            slug
        });
        AnalyticsEvent::new(event_type, &branch, slug.as_ref(), &RequestMeta::default())
    }

    #[tokio::test]
    async fn record_assigns_sequential_ids() {
        let store = MemoryAnalytics::new();
        assert!(store.is_empty().await);

        let first = store.record(&event(EventType::CollectionIndex, "main", None)).await;
        let second = store
            .record(&event(EventType::ContentPython, "main", Some("pandas_df")))
            .await;
        assert_eq!(first.ok(), Some(1));
        assert_eq!(second.ok(), Some(2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn usage_counts_group_by_slug_on_branch() {
        let store = MemoryAnalytics::new();
        let _ = store.record(&event(EventType::CollectionIndex, "main", None)).await;
        let _ = store
            .record(&event(EventType::ContentMarkdown, "main", Some("pandas_df")))
            .await;
        let _ = store
            .record(&event(EventType::ContentPython, "main", Some("pandas_df")))
            .await;
        let _ = store
            .record(&event(EventType::ContentPython, "dev", Some("pandas_df")))
            .await;

        let Ok(counts) = store.usage_counts("main").await else {
            panic!("counts should load");
        };
        assert_eq!(counts.get("pandas_df"), Some(&2));
        assert_eq!(counts.len(), 1);
    }

    #[tokio::test]
    async fn rows_keep_event_tag() {
        let store = MemoryAnalytics::new();
        let _ = store
            .record(&event(EventType::ContentMarkdown, "main", Some("action_items")))
            .await;
        let rows = store.events().await;
        assert_eq!(
            rows.first().map(|r| r.event_type.as_str()),
            Some("CONTENT_MARKDOWN")
        );
    }
}
