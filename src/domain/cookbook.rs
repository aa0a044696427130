//! Cookbook entries parsed from the mkdocs navigation.
//!
//! The documentation site's `mkdocs.yml` declares its navigation as a
//! sequence of single-key mappings. The cookbook lives under one such key
//! (`Hub` by default), whose value is a sequence of `label: path` pairs:
//!
//! ```yaml
//! nav:
//!   - Introduction: index.md
//!   - Hub:
//!       - Introduction: hub/index.md
//!       - Single Classification: hub/single_classification.md
//! ```

use serde::Serialize;
use serde_yaml::Value;
use utoipa::ToSchema;

use crate::error::HubError;

/// Slug of the section landing page, which is never listed.
pub const INDEX_SLUG: &str = "index";

/// A single documentation page listed in the cookbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CookbookEntry {
    /// Position within the navigation section, counted before the index
    /// page is removed.
    pub id: usize,
    /// Navigation label.
    pub name: String,
    /// Path relative to `docs/` (e.g. `hub/single_classification.md`).
    pub path: String,
    /// File stem of `path`; lookup key for the content endpoints.
    pub slug: String,
}

/// Derives the slug from a navigation path: last segment, `.md` stripped.
#[must_use]
pub fn slug_from_path(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(".md").unwrap_or(file)
}

/// Parses `mkdocs.yml` and returns the entries of the given nav section,
/// excluding the `index` page.
///
/// The `!!python/...` tags mkdocs plugins use elsewhere in the file are
/// kept as [`Value::Tagged`] nodes and never inspected.
///
/// # Errors
///
/// Returns [`HubError::ManifestParse`] if the document is not valid YAML
/// or the section is not a sequence, and [`HubError::NavSectionMissing`]
/// if no top-level nav item has the section key.
pub fn parse_hub_entries(manifest: &str, section: &str) -> Result<Vec<CookbookEntry>, HubError> {
    let doc: Value = serde_yaml::from_str(manifest)
        .map_err(|e| HubError::ManifestParse(e.to_string()))?;

    let nav = doc
        .get("nav")
        .and_then(Value::as_sequence)
        .ok_or_else(|| HubError::ManifestParse("missing `nav` sequence".to_string()))?;

    let items = nav
        .iter()
        .find_map(|item| item.as_mapping().and_then(|m| m.get(section)))
        .ok_or_else(|| HubError::NavSectionMissing(section.to_string()))?;

    let items = items.as_sequence().ok_or_else(|| {
        HubError::ManifestParse(format!("nav section `{section}` is not a sequence"))
    })?;

    let entries = items
        .iter()
        .enumerate()
        .filter_map(|(id, item)| entry_from_nav_item(id, item))
        .filter(|entry| entry.slug != INDEX_SLUG)
        .collect();

    Ok(entries)
}

fn entry_from_nav_item(id: usize, item: &Value) -> Option<CookbookEntry> {
    let (name, path) = match item {
        Value::String(path) => (slug_from_path(path).to_string(), path.clone()),
        Value::Mapping(map) => {
            let (label, target) = map.iter().next()?;
            // Nested subsections map to sequences, not pages.
            (label.as_str()?.to_string(), target.as_str()?.to_string())
        }
        _ => return None,
    };

    let slug = slug_from_path(&path).to_string();
    Some(CookbookEntry {
        id,
        name,
        path,
        slug,
    })
}
