//! Hub listing DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::CookbookEntry;

/// Query parameters for `GET /api/{branch}/items`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemsQuery {
    /// Fuzzy search term matched against entry names and slugs.
    #[serde(default)]
    pub q: Option<String>,
}

/// One cookbook entry in a listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemDto {
    /// Position within the navigation section.
    pub id: usize,
    /// Navigation label.
    pub name: String,
    /// Path relative to `docs/`.
    pub path: String,
    /// Lookup key for the content endpoints.
    pub slug: String,
    /// Number of recorded requests for this slug; omitted when analytics
    /// is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

impl ItemDto {
    /// Builds a DTO from a domain entry and its usage count.
    #[must_use]
    pub fn from_entry(entry: CookbookEntry, count: Option<i64>) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            path: entry.path,
            slug: entry.slug,
            count,
        }
    }
}
