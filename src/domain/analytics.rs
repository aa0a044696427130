//! Analytics events recorded for every served hub request.

use std::fmt;

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Branch, Slug};

/// Which asset a request was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Cookbook listing.
    CollectionIndex,
    /// Raw markdown of one entry.
    ContentMarkdown,
    /// Python code of one entry.
    ContentPython,
}

impl EventType {
    /// Returns the tag stored in the `event_type` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CollectionIndex => "COLLECTION_INDEX",
            Self::ContentMarkdown => "CONTENT_MARKDOWN",
            Self::ContentPython => "CONTENT_PYTHON",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client details captured from request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    /// `User-Agent` header, if any.
    pub user_agent: Option<String>,
    /// Client address as reported by the edge or a reverse proxy.
    pub request_ip: Option<String>,
}

impl RequestMeta {
    /// Extracts the user agent and client IP from headers.
    ///
    /// The IP is taken from `CF-Connecting-IP`, then the first hop of
    /// `X-Forwarded-For`, then `X-Real-IP`.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let request_ip = header("cf-connecting-ip")
            .or_else(|| {
                header("x-forwarded-for")
                    .and_then(|v| v.split(',').next())
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
            })
            .or_else(|| header("x-real-ip"))
            .map(str::to_string);

        Self {
            user_agent: header("user-agent").map(str::to_string),
            request_ip,
        }
    }
}

/// One append-only row of the `hub_analytics` table, before insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    /// Served asset kind.
    pub event_type: EventType,
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

impl AnalyticsEvent {
    /// Builds an event stamped with the current time.
    #[must_use]
    pub fn new(
        event_type: EventType,
        branch: &Branch,
        slug: Option<&Slug>,
        meta: &RequestMeta,
    ) -> Self {
        Self {
            event_type,
            user_agent: meta.user_agent.clone(),
            request_ip: meta.request_ip.clone(),
            request_time: Utc::now(),
            branch: branch.as_str().to_string(),
            slug: slug.map(|s| s.as_str().to_string()),
        }
    }
}
