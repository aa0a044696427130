//! Hub service: fetches, parses, filters, and records analytics.

use std::collections::HashMap;

use crate::domain::{
    AnalyticsEvent, Branch, CookbookEntry, EventType, FuzzySearch, PythonExtractor, RequestMeta,
    Slug, parse_hub_entries,
};
use crate::error::HubError;
use crate::persistence::SharedAnalytics;
use crate::upstream::SharedSource;

/// Cookbook listing plus optional per-slug usage counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListing {
    /// Entries in navigation order, or best-match order when searched.
    pub entries: Vec<CookbookEntry>,
    /// Usage counts keyed by slug; `None` when analytics is disabled or
    /// the counts could not be loaded.
    pub counts: Option<HashMap<String, i64>>,
}

impl ItemListing {
    /// Returns the usage count for `slug`, `Some(0)` when analytics is on
    /// but the slug was never requested.
    #[must_use]
    pub fn count_for(&self, slug: &str) -> Option<i64> {
        self.counts
            .as_ref()
            .map(|counts| counts.get(slug).copied().unwrap_or(0))
    }
}

/// Orchestration layer for the hub endpoints.
///
/// Stateless per request: every call re-fetches from the upstream source.
/// Each successful call records exactly one analytics event (when a store
/// is configured) after the upstream fetch succeeds; recording failures
/// are logged and never fail the request.
#[derive(Debug, Clone)]
pub struct HubService {
    source: SharedSource,
    analytics: Option<SharedAnalytics>,
    extractor: PythonExtractor,
    nav_section: String,
}

impl HubService {
    /// Creates a new `HubService`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Internal`] if the code-fence pattern fails to
    /// compile.
    pub fn new(
        source: SharedSource,
        analytics: Option<SharedAnalytics>,
        nav_section: impl Into<String>,
    ) -> Result<Self, HubError> {
        Ok(Self {
            source,
            analytics,
            extractor: PythonExtractor::new()?,
            nav_section: nav_section.into(),
        })
    }

    /// Returns the configured analytics backend name, if any.
    #[must_use]
    pub fn analytics_backend(&self) -> Option<&'static str> {
        self.analytics.as_ref().map(|store| store.backend_name())
    }

    /// Lists the cookbook entries of `branch`, fuzzy-filtered by `query`
    /// when it is non-blank.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError`] if the manifest cannot be fetched or parsed.
    pub async fn list_items(
        &self,
        branch: &Branch,
        query: Option<&str>,
        meta: &RequestMeta,
    ) -> Result<ItemListing, HubError> {
        let manifest = self.source.fetch_manifest(branch).await?;
        let mut entries = parse_hub_entries(&manifest, &self.nav_section)?;

        if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
            entries = FuzzySearch::new().filter(query, entries);
        }

        let counts = self.usage_counts(branch).await;

        self.record(EventType::CollectionIndex, branch, None, meta)
            .await;

        tracing::debug!(%branch, count = entries.len(), "listed hub items");
        Ok(ItemListing { entries, counts })
    }

    /// Returns the raw markdown of one cookbook entry.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::DocumentNotFound`] if the entry does not exist
    /// upstream, or an upstream error variant on transport failure.
    pub async fn markdown(
        &self,
        branch: &Branch,
        slug: &Slug,
        meta: &RequestMeta,
    ) -> Result<String, HubError> {
        let markdown = self.source.fetch_document(branch, slug).await?;
        self.record(EventType::ContentMarkdown, branch, Some(slug), meta)
            .await;
        Ok(markdown)
    }

    /// Returns the fenced Python code of one cookbook entry, or the
    /// "no code" sentinel when it has none.
    ///
    /// # Errors
    ///
    /// Same as [`HubService::markdown`].
    pub async fn python(
        &self,
        branch: &Branch,
        slug: &Slug,
        meta: &RequestMeta,
    ) -> Result<String, HubError> {
        let markdown = self.source.fetch_document(branch, slug).await?;
        let code = self.extractor.extract_or_sentinel(&markdown);
        self.record(EventType::ContentPython, branch, Some(slug), meta)
            .await;
        Ok(code)
    }

    async fn usage_counts(&self, branch: &Branch) -> Option<HashMap<String, i64>> {
        let store = self.analytics.as_ref()?;
        match store.usage_counts(branch.as_str()).await {
            Ok(counts) => Some(counts),
            Err(e) => {
                tracing::warn!(%branch, error = %e, "failed to load usage counts");
                None
            }
        }
    }

    async fn record(
        &self,
        event_type: EventType,
        branch: &Branch,
        slug: Option<&Slug>,
        meta: &RequestMeta,
    ) {
        let Some(store) = &self.analytics else {
            return;
        };
        let event = AnalyticsEvent::new(event_type, branch, slug, meta);
        if let Err(e) = store.record(&event).await {
            tracing::warn!(%event_type, %branch, error = %e, "failed to record analytics event");
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::NO_PYTHON_CODE;
    use crate::persistence::{AnalyticsStore, MemoryAnalytics};
    use crate::upstream::ContentSource;

    const MANIFEST: &str = "nav:\n  - Hub:\n      - Intro: hub/index.md\n      - Pandas: hub/pandas_df.md\n      - Actions: hub/action_items.md\n";

    #[derive(Debug)]
    struct FakeSource;

    #[async_trait]
    impl ContentSource for FakeSource {
        async fn fetch_manifest(&self, _branch: &Branch) -> Result<String, HubError> {
            Ok(MANIFEST.to_string())
        }

        async fn fetch_document(&self, _branch: &Branch, slug: &Slug) -> Result<String, HubError> {
            match slug.as_str() {
                "pandas_df" => Ok("```python\nimport pandas\n```\n".to_string()),
                "action_items" => Ok("no code here".to_string()),
                other => Err(HubError::DocumentNotFound(other.to_string())),
            }
        }
    }

    #[derive(Debug)]
    struct BrokenStore;

    #[async_trait]
    impl AnalyticsStore for BrokenStore {
        async fn record(&self, _event: &AnalyticsEvent) -> Result<i64, HubError> {
            Err(HubError::Persistence("down".to_string()))
        }

        async fn usage_counts(&self, _branch: &str) -> Result<HashMap<String, i64>, HubError> {
            Err(HubError::Persistence("down".to_string()))
        }

        fn backend_name(&self) -> &'static str {
            "broken"
        }
    }

    fn ids(slug: &str) -> (Branch, Slug) {
        let (Ok(branch), Ok(slug)) = (Branch::parse("main"), Slug::parse(slug)) else {
            panic!("valid identifiers");
        };
        (branch, slug)
    }

    fn service(analytics: Option<SharedAnalytics>) -> HubService {
        let Ok(service) = HubService::new(Arc::new(FakeSource), analytics, "Hub") else {
            panic!("service should build");
        };
        service
    }

    #[tokio::test]
    async fn listing_without_analytics_has_no_counts() {
        let service = service(None);
        let (branch, _) = ids("x");
        let Ok(listing) = service
            .list_items(&branch, None, &RequestMeta::default())
            .await
        else {
            panic!("listing should succeed");
        };
        assert_eq!(listing.entries.len(), 2);
        assert_eq!(listing.count_for("pandas_df"), None);
        assert_eq!(service.analytics_backend(), None);
    }

    #[tokio::test]
    async fn each_call_records_one_event() {
        let store = Arc::new(MemoryAnalytics::new());
        let service = service(Some(Arc::clone(&store) as SharedAnalytics));
        let (branch, slug) = ids("pandas_df");
        let meta = RequestMeta::default();

        let _ = service.markdown(&branch, &slug, &meta).await;
        let _ = service.python(&branch, &slug, &meta).await;
        let _ = service.list_items(&branch, None, &meta).await;

        let tags: Vec<String> = store.events().await.into_iter().map(|e| e.event_type).collect();
        assert_eq!(
            tags,
            vec!["CONTENT_MARKDOWN", "CONTENT_PYTHON", "COLLECTION_INDEX"]
        );
    }

    #[tokio::test]
    async fn listing_counts_previous_requests() {
        let store = Arc::new(MemoryAnalytics::new());
        let service = service(Some(Arc::clone(&store) as SharedAnalytics));
        let (branch, slug) = ids("pandas_df");
        let meta = RequestMeta::default();

        let _ = service.python(&branch, &slug, &meta).await;
        let _ = service.python(&branch, &slug, &meta).await;

        let Ok(listing) = service.list_items(&branch, None, &meta).await else {
            panic!("listing should succeed");
        };
        assert_eq!(listing.count_for("pandas_df"), Some(2));
        assert_eq!(listing.count_for("action_items"), Some(0));
    }

    #[tokio::test]
    async fn failed_fetch_records_nothing() {
        let store = Arc::new(MemoryAnalytics::new());
        let service = service(Some(Arc::clone(&store) as SharedAnalytics));
        let (branch, slug) = ids("missing");

        let result = service
            .markdown(&branch, &slug, &RequestMeta::default())
            .await;
        assert!(matches!(result, Err(HubError::DocumentNotFound(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn python_sentinel_when_no_code() {
        let service = service(None);
        let (branch, slug) = ids("action_items");
        let code = service
            .python(&branch, &slug, &RequestMeta::default())
            .await;
        assert_eq!(code.ok().as_deref(), Some(NO_PYTHON_CODE));
    }

    #[tokio::test]
    async fn search_filters_listing() {
        let service = service(None);
        let (branch, _) = ids("x");
        let Ok(listing) = service
            .list_items(&branch, Some("pandas"), &RequestMeta::default())
            .await
        else {
            panic!("listing should succeed");
        };
        let slugs: Vec<&str> = listing.entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["pandas_df"]);
    }

    #[tokio::test]
    async fn analytics_failures_do_not_fail_requests() {
        let service = service(Some(Arc::new(BrokenStore)));
        let (branch, slug) = ids("pandas_df");
        let meta = RequestMeta::default();

        let Ok(listing) = service.list_items(&branch, None, &meta).await else {
            panic!("listing should succeed");
        };
        assert!(listing.counts.is_none());
        assert!(service.markdown(&branch, &slug, &meta).await.is_ok());
    }
}
