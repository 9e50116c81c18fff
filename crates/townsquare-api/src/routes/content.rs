//! Routes for the reference documents: script files and layouts.

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_TYPE, ETAG, LAST_MODIFIED};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use tracing::instrument;

use townsquare_content::application::query_handlers;
use townsquare_content::domain::library::StoredDocument;
use townsquare_core::conditional::format_http_date;
use townsquare_core::error::DomainError;

use crate::error::ApiError;
use crate::headers::read_conditions;
use crate::media;
use crate::state::AppState;

/// Query string for GET /findScript.
#[derive(Debug, Deserialize)]
pub struct FindScriptQuery {
    /// The script id to look up.
    pub q: Option<String>,
}

/// Serves a stored document verbatim, or 304 if the caller's copy is current.
fn document_response(
    document: &StoredDocument,
    media_type: &'static str,
    headers: &HeaderMap,
) -> Response {
    let last_modified = format_http_date(document.last_modified);
    if read_conditions(headers).is_not_modified(&document.hash, document.last_modified) {
        return (
            StatusCode::NOT_MODIFIED,
            [(ETAG, document.hash.clone()), (LAST_MODIFIED, last_modified)],
        )
            .into_response();
    }
    (
        [
            (CONTENT_TYPE, media_type.to_owned()),
            (ETAG, document.hash.clone()),
            (LAST_MODIFIED, last_modified),
        ],
        document.data.clone(),
    )
        .into_response()
}

/// GET /script/{id}
#[instrument(skip(state, headers))]
async fn get_script_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let document = query_handlers::get_script_file(&state.library, &id)?;
    Ok(document_response(document, media::SCRIPT_FILE, &headers))
}

/// GET /layout/{id}
#[instrument(skip(state, headers))]
async fn get_layout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let document = query_handlers::get_layout(&state.library, &id)?;
    Ok(document_response(document, media::LAYOUT, &headers))
}

/// GET /findScript?q={script_id}
#[instrument(skip(state))]
async fn find_script(
    State(state): State<AppState>,
    Query(query): Query<FindScriptQuery>,
) -> Result<Json<Option<String>>, ApiError> {
    let script_id = query
        .q
        .ok_or_else(|| DomainError::Validation("missing query parameter q".to_owned()))?;
    Ok(Json(query_handlers::find_script(&state.library, &script_id)))
}

/// Returns the router for reference documents.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/script/{id}", get(get_script_file))
        .route("/layout/{id}", get(get_layout))
        .route("/findScript", get(find_script))
}
