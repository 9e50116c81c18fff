//! Shared application state.

use std::sync::Arc;

use townsquare_content::domain::library::ReferenceLibrary;
use townsquare_core::clock::Clock;
use townsquare_core::repository::SnapshotRepository;
use townsquare_grimoire::domain::model::Game;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for creation and commit timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Versioned game store.
    pub games: Arc<dyn SnapshotRepository<Game>>,
    /// Reference documents loaded at startup.
    pub library: Arc<ReferenceLibrary>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        games: Arc<dyn SnapshotRepository<Game>>,
        library: Arc<ReferenceLibrary>,
    ) -> Self {
        Self {
            clock,
            games,
            library,
        }
    }
}
