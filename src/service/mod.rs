//! Service layer: business logic orchestration.
//!
//! [`HubService`] fetches from the upstream source, applies the domain
//! transforms, and records analytics events.

pub mod hub_service;

pub use hub_service::{HubService, ItemListing};
