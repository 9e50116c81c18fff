//! Routes for the shared game documents.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_TYPE, ETAG, LAST_MODIFIED, LOCATION};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get, routing::post};
use tracing::{info, instrument};
use uuid::Uuid;

use townsquare_core::conditional::format_http_date;
use townsquare_core::error::DomainError;
use townsquare_core::repository::CommitOutcome;
use townsquare_grimoire::application::command_handlers::{self, VersionedGame};
use townsquare_grimoire::application::query_handlers;
use townsquare_grimoire::domain::commands;
use townsquare_grimoire::domain::model::Game;
use townsquare_grimoire::domain::version_tag::weak_tag;

use crate::error::ApiError;
use crate::headers::{read_conditions, write_conditions};
use crate::media::{self, ActionBody};
use crate::state::AppState;

fn parse_game_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::UnknownGame(raw.to_owned()))
}

/// The full document with its validators.
fn game_response(status: StatusCode, record: &VersionedGame) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(&record.snapshot)
        .map_err(|e| DomainError::Infrastructure(format!("game encoding failed: {e}")))?;
    Ok((
        status,
        [
            (CONTENT_TYPE, media::GAME.to_owned()),
            (ETAG, weak_tag(record.version)),
            (LAST_MODIFIED, format_http_date(record.last_modified)),
        ],
        body,
    )
        .into_response())
}

/// POST /game
#[instrument(skip(state, headers, body))]
async fn create_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    media::require(&headers, media::GAME)?;
    let game: Game = serde_json::from_slice(&body)
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    let command = commands::CreateGame {
        correlation_id: Uuid::new_v4(),
        game,
    };

    info!(correlation_id = %command.correlation_id, "handling create_game command");

    let record =
        command_handlers::handle_create_game(&command, state.clock.as_ref(), &*state.games)
            .await?;

    Ok((
        StatusCode::CREATED,
        [
            (LOCATION, format!("/game/{}", record.id)),
            (ETAG, weak_tag(record.version)),
            (LAST_MODIFIED, format_http_date(record.last_modified)),
        ],
    )
        .into_response())
}

/// GET /game/{game_id}
#[instrument(skip(state, headers))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let record = query_handlers::get_game_by_id(game_id, &*state.games).await?;

    let etag = weak_tag(record.version);
    if read_conditions(&headers).is_not_modified(&etag, record.last_modified) {
        return Ok((
            StatusCode::NOT_MODIFIED,
            [
                (ETAG, etag),
                (LAST_MODIFIED, format_http_date(record.last_modified)),
            ],
        )
            .into_response());
    }
    game_response(StatusCode::OK, &record)
}

/// PATCH /game/{game_id}
///
/// Validators are checked before the body is looked at, so a stale writer
/// gets 412 whatever it sent.
#[instrument(skip(state, headers, body))]
async fn patch_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let game_id = parse_game_id(&game_id)?;
    let conditions = write_conditions(&headers);
    command_handlers::check_write_conditions(game_id, &conditions, &*state.games).await?;

    let actions = ActionBody::from_headers(&headers)?.decode(&body)?;
    let command = commands::ApplyActions {
        correlation_id: Uuid::new_v4(),
        game_id,
        conditions,
        actions,
    };

    info!(
        correlation_id = %command.correlation_id,
        actions = command.actions.len(),
        "handling apply_actions command"
    );

    match command_handlers::handle_apply_actions(&command, state.clock.as_ref(), &*state.games)
        .await?
    {
        CommitOutcome::Committed(record) => game_response(StatusCode::OK, &record),
        CommitOutcome::Conflict(current) => game_response(StatusCode::CONFLICT, &current),
    }
}

/// Returns the router for game documents.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/game", post(create_game))
        .route("/game/{game_id}", get(get_game).patch(patch_game))
}
