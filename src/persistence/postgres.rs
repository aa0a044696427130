//! PostgreSQL implementation of the analytics store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::AnalyticsStore;
use crate::config::HubConfig;
use crate::domain::AnalyticsEvent;
use crate::error::HubError;

/// PostgreSQL-backed analytics log using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresAnalytics {
    pool: PgPool,
}

impl PostgresAnalytics {
    /// Creates a new analytics store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`, running the embedded
    /// migrations when enabled.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError::Persistence`] if the database is unreachable
    /// or a migration fails.
    pub async fn connect(config: &HubConfig) -> Result<Self, HubError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        let store = Self::new(pool);
        if config.database_run_migrations {
            store.migrate().await?;
        }
        Ok(store)
    }

    /// Applies the migrations under `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError::Persistence`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), HubError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| HubError::Persistence(e.to_string()))?;
        tracing::info!("analytics migrations applied");
        Ok(())
    }
}

#[async_trait]
impl AnalyticsStore for PostgresAnalytics {
    async fn record(&self, event: &AnalyticsEvent) -> Result<i64, HubError> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO hub_analytics (event_type, user_agent, request_ip, request_time, branch, slug) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(event.event_type.as_str())
        .bind(event.user_agent.as_deref())
        .bind(event.request_ip.as_deref())
        .bind(event.request_time)
        .bind(&event.branch)
        .bind(event.slug.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(i64::from(id))
    }

    async fn usage_counts(&self, branch: &str) -> Result<HashMap<String, i64>, HubError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT slug, COUNT(*) FROM hub_analytics \
             WHERE branch = $1 AND slug IS NOT NULL GROUP BY slug",
        )
        .bind(branch)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
