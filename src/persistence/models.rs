//! Database models for analytics rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored row from the `hub_analytics` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredEvent {
    /// Auto-increment row ID.
    pub id: i64,
    /// Event type tag (e.g. `"CONTENT_PYTHON"`).
    pub event_type: String,
    /// Client user agent.
    pub user_agent: Option<String>,
    /// Client IP address.
    pub request_ip: Option<String>,
    /// When the request was served.
    pub request_time: DateTime<Utc>,
    /// Documentation branch.
    pub branch: String,
    /// Entry slug; `None` for listings.
    pub slug: Option<String>,
}
