//! Axum route handlers for the dashboard views.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::scoring::criteria::{select_criteria, Criterion, CRITERIA};
use crate::selection::SelectionSnapshot;
use crate::state::AppState;
use crate::views::header::{load_header, HeaderView};
use crate::views::matrix::{
    build_matrix, refresh_matrix, total_pages, MatrixResponse, PageRequest, MAX_PAGE_SIZE,
};
use crate::views::roster::{partition, RosterView};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct MatrixQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    /// Comma-separated criterion names.
    pub criteria: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: String,
    pub selected: bool,
    #[serde(flatten)]
    pub selection: SelectionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct CriteriaResponse {
    pub criteria: Vec<Criterion>,
}

fn page_size(requested: Option<usize>, default: usize) -> Result<usize, AppError> {
    let per_page = requested.unwrap_or(default);
    if !(1..=MAX_PAGE_SIZE).contains(&per_page) {
        return Err(AppError::Validation(format!(
            "per_page must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(per_page)
}

fn check_page(page: usize, columns: usize, per_page: usize) -> Result<(), AppError> {
    let pages = total_pages(columns, per_page);
    if page >= pages {
        return Err(AppError::Validation(format!("page must be below {pages}")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/header
pub async fn handle_header(State(state): State<AppState>) -> Json<HeaderView> {
    Json(load_header(state.people.as_ref(), &state.config.job_title).await)
}

/// GET /api/v1/roster
///
/// Fails as a whole when the list cannot be fetched; no partial lists.
pub async fn handle_roster(State(state): State<AppState>) -> Result<Json<RosterView>, AppError> {
    let people = state
        .people
        .list_people()
        .await
        .map_err(|e| AppError::Upstream(format!("Error fetching list: {e}")))?;

    let selection = state.selection.snapshot().await;
    Ok(Json(partition(people, &selection)))
}

/// GET /api/v1/criteria
pub async fn handle_criteria() -> Json<CriteriaResponse> {
    Json(CriteriaResponse {
        criteria: CRITERIA.to_vec(),
    })
}

/// GET /api/v1/selection
pub async fn handle_get_selection(State(state): State<AppState>) -> Json<SelectionSnapshot> {
    Json(state.selection.snapshot().await)
}

/// POST /api/v1/selection/:id/toggle
pub async fn handle_toggle_selection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::Validation("candidate id cannot be empty".to_string()));
    }

    let (selected, selection) = state.selection.toggle(id).await;
    tracing::info!(
        "Candidate {id} {} comparison (generation {})",
        if selected { "added to" } else { "removed from" },
        selection.generation
    );

    Ok(Json(ToggleResponse {
        id: id.to_string(),
        selected,
        selection,
    }))
}

/// DELETE /api/v1/selection
pub async fn handle_clear_selection(State(state): State<AppState>) -> Json<SelectionSnapshot> {
    Json(state.selection.clear().await)
}

/// GET /api/v1/matrix
///
/// Fetches every selected candidate, then returns one page of columns.
/// The query is validated before anything is fetched.
pub async fn handle_matrix(
    State(state): State<AppState>,
    Query(query): Query<MatrixQuery>,
) -> Result<Json<MatrixResponse>, AppError> {
    let criteria = select_criteria(query.criteria.as_deref())?;
    let per_page = page_size(query.per_page, state.config.matrix_page_size)?;
    let page = query.page.unwrap_or(0);
    check_page(page, state.selection.snapshot().await.ids.len(), per_page)?;

    let outcome = refresh_matrix(
        Arc::clone(&state.people),
        &state.selection,
        &state.matrix_cache,
    )
    .await?;

    Ok(Json(build_matrix(
        &outcome.batch,
        outcome.stale,
        &criteria,
        PageRequest { page, per_page },
    )))
}

/// GET /api/v1/matrix/latest
///
/// Last published matrix, without refetching. `stale` is set when the
/// selection has changed since it was computed.
pub async fn handle_latest_matrix(
    State(state): State<AppState>,
    Query(query): Query<MatrixQuery>,
) -> Result<Json<MatrixResponse>, AppError> {
    let criteria = select_criteria(query.criteria.as_deref())?;
    let per_page = page_size(query.per_page, state.config.matrix_page_size)?;
    let page = query.page.unwrap_or(0);

    let batch = state
        .matrix_cache
        .latest()
        .await
        .ok_or_else(|| AppError::NotFound("No comparison has been loaded yet".to_string()))?;

    check_page(page, batch.columns.len(), per_page)?;

    let stale = batch.generation != state.selection.generation().await;
    Ok(Json(build_matrix(
        &batch,
        stale,
        &criteria,
        PageRequest { page, per_page },
    )))
}
