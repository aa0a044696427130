//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::ItemDto;
use super::handlers::{hub, system};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description, served by Swagger UI when the
/// `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "hub-gateway",
        description = "Cookbook listings, markdown, and Python snippets for the instructor Hub."
    ),
    paths(
        hub::list_items,
        hub::get_markdown,
        hub::get_python,
        system::health_handler,
    ),
    components(schemas(ItemDto, ErrorResponse, ErrorBody, system::HealthResponse)),
    tags(
        (name = "Hub", description = "Cookbook entries served from GitHub raw content"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
