//! Domain layer: identifiers, manifest parsing, code extraction, search,
//! and the analytics event model.
//!
//! Nothing in here performs I/O; the upstream fetches and the analytics
//! store live in [`crate::upstream`] and [`crate::persistence`].

pub mod analytics;
pub mod cookbook;
pub mod identifier;
pub mod markdown;
pub mod search;

pub use analytics::{AnalyticsEvent, EventType, RequestMeta};
pub use cookbook::{CookbookEntry, parse_hub_entries};
pub use identifier::{Branch, Slug};
pub use markdown::{NO_PYTHON_CODE, PythonExtractor};
pub use search::FuzzySearch;
