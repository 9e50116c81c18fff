//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::fs;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use tempfile::TempDir;
use townsquare_content::domain::library::ReferenceLibrary;
use townsquare_core::clock::Clock;
use townsquare_core::repository::SnapshotRepository;
use townsquare_grimoire::domain::model::Game;
use townsquare_store::memory_repository::InMemorySnapshotRepository;
use townsquare_test_support::SteppingClock;
use tower::ServiceExt;

use townsquare_api::build_router;
use townsquare_api::media;
use townsquare_api::state::AppState;

/// Time of the first clock reading in every test app.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// A response reduced to what the tests look at.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers[name].to_str().unwrap()
    }
}

/// Build the full app with an empty reference library. The clock advances
/// one second per reading, starting at `start_time()`.
pub fn build_test_app() -> Router {
    build_test_app_with_library(ReferenceLibrary::default())
}

pub fn build_test_app_with_library(library: ReferenceLibrary) -> Router {
    build_test_app_with(
        Arc::new(InMemorySnapshotRepository::<Game>::new()),
        library,
    )
}

/// Build the full app over a caller-supplied game store.
pub fn build_test_app_with(
    games: Arc<dyn SnapshotRepository<Game>>,
    library: ReferenceLibrary,
) -> Router {
    let clock: Arc<dyn Clock + Send + Sync> =
        Arc::new(SteppingClock::new(start_time(), Duration::seconds(1)));
    build_router(AppState::new(clock, games, Arc::new(library)))
}

/// Writes script files and layouts into fresh directories and loads them.
/// The directories must outlive the test.
pub fn library_with(
    scripts: &[(&str, &str)],
    layouts: &[(&str, &str)],
) -> (TempDir, TempDir, ReferenceLibrary) {
    let scripts_dir = TempDir::new().expect("Failed to create temp dir");
    let layouts_dir = TempDir::new().expect("Failed to create temp dir");
    for (name, contents) in scripts {
        fs::write(scripts_dir.path().join(name), contents).unwrap();
    }
    for (name, contents) in layouts {
        fs::write(layouts_dir.path().join(name), contents).unwrap();
    }
    let library = ReferenceLibrary::load(scripts_dir.path(), layouts_dir.path()).unwrap();
    (scripts_dir, layouts_dir, library)
}

/// Send a request and collect the whole response.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Body,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(body).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
    send(app, "GET", uri, headers, Body::empty()).await
}

/// POST a game document and return its path.
pub async fn create_game(app: &Router, game: &serde_json::Value) -> String {
    let response = send(
        app,
        "POST",
        "/game",
        &[("content-type", media::GAME)],
        Body::from(serde_json::to_vec(game).unwrap()),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.header("location").to_owned()
}

/// PATCH a list of actions onto a game.
pub async fn patch_actions(
    app: &Router,
    uri: &str,
    headers: &[(&str, &str)],
    actions: &serde_json::Value,
) -> TestResponse {
    let mut all = vec![("content-type", media::ACTIONS)];
    all.extend_from_slice(headers);
    send(
        app,
        "PATCH",
        uri,
        &all,
        Body::from(serde_json::to_vec(actions).unwrap()),
    )
    .await
}
