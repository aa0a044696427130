//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::HubService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Hub service for all business logic.
    pub hub_service: Arc<HubService>,
}

impl AppState {
    /// Wraps a service into shareable state.
    #[must_use]
    pub fn new(hub_service: HubService) -> Self {
        Self {
            hub_service: Arc::new(hub_service),
        }
    }
}
