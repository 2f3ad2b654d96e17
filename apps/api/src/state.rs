use std::sync::Arc;

use crate::config::Config;
use crate::people_client::CandidateSource;
use crate::selection::SelectionStore;
use crate::views::matrix::MatrixCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Candidate API backend. Default: `PeopleClient` over HTTP.
    pub people: Arc<dyn CandidateSource>,
    /// The comparison selection; only mutated through `toggle`/`clear`.
    pub selection: SelectionStore,
    /// Last matrix batch computed for the live selection.
    pub matrix_cache: MatrixCache,
    pub config: Config,
}
