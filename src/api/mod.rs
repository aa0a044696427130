//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Hub endpoints are mounted under `/api`; anything unmatched (any path or
//! method) answers `404` with the plain-text body `Not Found.`.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Body of every unmatched-route response.
pub const NOT_FOUND_BODY: &str = "Not Found.";

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
}

/// Builds the router with middleware and state applied, ready to serve.
pub fn app(state: AppState) -> Router {
    build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Fallback for unmatched routes.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}
