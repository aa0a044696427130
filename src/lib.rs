//! # hub-gateway
//!
//! HTTP gateway for the instructor documentation "Hub" cookbook.
//!
//! The gateway reads the `Hub` navigation section of `mkdocs.yml` on a
//! given branch, serves each cookbook page as raw markdown or as its
//! extracted Python code, and optionally records one analytics row per
//! served request. All content is fetched from GitHub raw content on
//! every request.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── HubService (service/)
//!     ├── Manifest / Markdown / Search (domain/)
//!     │
//!     ├── ContentSource ── GitHub raw content (upstream/)
//!     └── AnalyticsStore ── PostgreSQL | memory (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod upstream;
