//! Hub handlers: cookbook listing, raw markdown, and Python extraction.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ItemDto, ItemsQuery};
use crate::app_state::AppState;
use crate::domain::{Branch, RequestMeta, Slug};
use crate::error::{ErrorResponse, HubError};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// `GET /api/{branch}/items` — List cookbook entries.
///
/// # Errors
///
/// Returns [`HubError`] on an invalid branch or query string, upstream
/// failure, or an unparsable manifest.
#[utoipa::path(
    get,
    path = "/api/{branch}/items",
    tag = "Hub",
    summary = "List cookbook entries",
    description = "Parses the Hub section of the branch's mkdocs.yml navigation. The index page is never listed. With `q`, entries are fuzzy-matched against name and slug, best match first. When analytics is enabled each entry carries a usage `count`.",
    params(
        ("branch" = String, Path, description = "Documentation branch"),
        ItemsQuery,
    ),
    responses(
        (status = 200, description = "Cookbook entries", body = Vec<ItemDto>),
        (status = 400, description = "Invalid branch or query string", body = ErrorResponse),
        (status = 404, description = "Manifest or Hub section not found", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    Path(branch): Path<String>,
    query: Result<Query<ItemsQuery>, QueryRejection>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HubError> {
    let branch = Branch::parse(&branch)?;
    let Query(params) = query.map_err(|e| HubError::InvalidRequest(e.body_text()))?;
    let meta = RequestMeta::from_headers(&headers);

    let listing = state
        .hub_service
        .list_items(&branch, params.q.as_deref(), &meta)
        .await?;

    let data: Vec<ItemDto> = listing
        .entries
        .iter()
        .map(|entry| ItemDto::from_entry(entry.clone(), listing.count_for(&entry.slug)))
        .collect();

    Ok(Json(data))
}

/// `GET /api/{branch}/items/{slug}/md` — Raw markdown of one entry.
///
/// # Errors
///
/// Returns [`HubError`] on invalid identifiers or upstream failure.
#[utoipa::path(
    get,
    path = "/api/{branch}/items/{slug}/md",
    tag = "Hub",
    summary = "Get entry markdown",
    description = "Returns docs/hub/{slug}.md from the branch, unmodified.",
    params(
        ("branch" = String, Path, description = "Documentation branch"),
        ("slug" = String, Path, description = "Entry slug"),
    ),
    responses(
        (status = 200, description = "Raw markdown", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid branch or slug", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn get_markdown(
    State(state): State<AppState>,
    Path((branch, slug)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HubError> {
    let branch = Branch::parse(&branch)?;
    let slug = Slug::parse(&slug)?;
    let meta = RequestMeta::from_headers(&headers);

    let markdown = state.hub_service.markdown(&branch, &slug, &meta).await?;
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], markdown))
}

/// `GET /api/{branch}/items/{slug}/py` — Python code of one entry.
///
/// # Errors
///
/// Returns [`HubError`] on invalid identifiers or upstream failure. A
/// document without Python code is not an error.
#[utoipa::path(
    get,
    path = "/api/{branch}/items/{slug}/py",
    tag = "Hub",
    summary = "Get entry Python code",
    description = "Returns every ```py / ```python fenced block of the document in order, separated by a blank line. Documents without Python code return `No Python code found in this document.` with status 200.",
    params(
        ("branch" = String, Path, description = "Documentation branch"),
        ("slug" = String, Path, description = "Entry slug"),
    ),
    responses(
        (status = 200, description = "Python code or the no-code notice", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid branch or slug", body = ErrorResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn get_python(
    State(state): State<AppState>,
    Path((branch, slug)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HubError> {
    let branch = Branch::parse(&branch)?;
    let slug = Slug::parse(&slug)?;
    let meta = RequestMeta::from_headers(&headers);

    let code = state.hub_service.python(&branch, &slug, &meta).await?;
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], code))
}

/// Hub routes, mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{branch}/items", get(list_items))
        .route("/{branch}/items/{slug}/md", get(get_markdown))
        .route("/{branch}/items/{slug}/py", get(get_python))
}
