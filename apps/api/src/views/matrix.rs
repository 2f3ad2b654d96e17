//! Matrix View: fetches every selected candidate concurrently, normalizes
//! their skill trees and lays the scores out as criteria rows × candidate
//! columns.
//!
//! Pipeline:
//! 1. Snapshot the selection (ids + generation).
//! 2. Spawn one fetch task per id; join them all before touching shared state.
//! 3. Reassemble by input index; failed fetches become placeholder columns.
//! 4. Publish to `MatrixCache` only if the selection has not moved on.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::models::candidate::CandidateDetail;
use crate::people_client::CandidateSource;
use crate::scoring::criteria::{Criterion, CriterionKind};
use crate::scoring::normalizer::{normalize, ScoreMap};
use crate::scoring::tiers::ScoreTier;
use crate::selection::SelectionStore;

pub const PLACEHOLDER_NAME: &str = "Unknown candidate";
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum MatrixError {
    /// The batch as a whole could not be completed (a fetch task panicked or
    /// was cancelled). Individual request failures never end up here.
    #[error("Failed to load comparison data")]
    Join(#[from] tokio::task::JoinError),
}

// ────────────────────────────────────────────────────────────────────────────
// Batch data
// ────────────────────────────────────────────────────────────────────────────

/// One candidate column, already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixColumn {
    pub id: String,
    pub name: String,
    pub placeholder: bool,
    pub scores: ScoreMap,
}

impl MatrixColumn {
    pub fn from_detail(id: &str, detail: &CandidateDetail) -> Self {
        Self {
            id: id.to_string(),
            name: detail.name.clone().unwrap_or_else(|| id.to_string()),
            placeholder: false,
            scores: normalize(detail),
        }
    }

    /// Stand-in for a candidate whose detail request failed.
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: PLACEHOLDER_NAME.to_string(),
            placeholder: true,
            scores: ScoreMap::new(),
        }
    }

    /// Two-character badge shown above the column.
    pub fn badge(&self) -> String {
        self.id.chars().take(2).collect()
    }
}

/// The assembled result of one fetch batch.
#[derive(Debug, Clone)]
pub struct CandidateBatch {
    /// Selection generation this batch was started for.
    pub generation: u64,
    pub columns: Vec<MatrixColumn>,
    pub fetched_at: DateTime<Utc>,
}

/// Fetches all `ids` concurrently and returns columns in the order of `ids`.
///
/// No concurrency limit and no retries. One failing candidate never aborts
/// the others.
pub async fn fetch_columns(
    source: Arc<dyn CandidateSource>,
    ids: &[String],
) -> Result<Vec<MatrixColumn>, MatrixError> {
    let mut tasks = JoinSet::new();

    for (index, id) in ids.iter().enumerate() {
        let source = Arc::clone(&source);
        let id = id.clone();
        tasks.spawn(async move {
            let outcome = source.get_person(&id).await;
            (index, id, outcome)
        });
    }

    let mut slots: Vec<Option<MatrixColumn>> = (0..ids.len()).map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        let (index, id, outcome) = joined?;
        let column = match outcome {
            Ok(detail) => {
                let column = MatrixColumn::from_detail(&id, &detail);
                debug!("Candidate {id}: {} scored skills", column.scores.len());
                column
            }
            Err(e) => {
                warn!("Failed to fetch candidate {id}, using placeholder: {e}");
                MatrixColumn::placeholder(&id)
            }
        };
        slots[index] = Some(column);
    }

    // Every index was spawned exactly once and joined without error.
    Ok(slots
        .into_iter()
        .zip(ids)
        .map(|(slot, id)| slot.unwrap_or_else(|| MatrixColumn::placeholder(id)))
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Stale-result guard
// ────────────────────────────────────────────────────────────────────────────

/// Holds the most recent batch that matched the live selection.
#[derive(Debug, Clone, Default)]
pub struct MatrixCache {
    latest: Arc<RwLock<Option<CandidateBatch>>>,
}

impl MatrixCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `batch` if it was computed for `current_generation` and is not
    /// older than what is already held. Returns whether it was stored.
    pub async fn publish(&self, batch: CandidateBatch, current_generation: u64) -> bool {
        if batch.generation != current_generation {
            return false;
        }
        let mut latest = self.latest.write().await;
        if latest
            .as_ref()
            .is_some_and(|held| held.generation > batch.generation)
        {
            return false;
        }
        *latest = Some(batch);
        true
    }

    pub async fn latest(&self) -> Option<CandidateBatch> {
        self.latest.read().await.clone()
    }
}

/// A completed batch and whether the selection changed while it ran.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub batch: CandidateBatch,
    pub stale: bool,
}

/// Runs one full fetch batch for the current selection.
pub async fn refresh_matrix(
    source: Arc<dyn CandidateSource>,
    selection: &SelectionStore,
    cache: &MatrixCache,
) -> Result<BatchOutcome, MatrixError> {
    let snapshot = selection.snapshot().await;
    info!(
        "Loading comparison for {} candidates (generation {})",
        snapshot.ids.len(),
        snapshot.generation
    );

    let columns = fetch_columns(source, &snapshot.ids).await?;
    let batch = CandidateBatch {
        generation: snapshot.generation,
        columns,
        fetched_at: Utc::now(),
    };

    // Toggles wait on this guard, so the generation cannot move between the
    // check and the cache write.
    let published = {
        let live = selection.read().await;
        let published = cache.publish(batch.clone(), live.generation()).await;
        if !published {
            debug!(
                "Discarding stale comparison batch (generation {}, current {})",
                batch.generation,
                live.generation()
            );
        }
        published
    };

    Ok(BatchOutcome {
        batch,
        stale: !published,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// View model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ColumnHeader {
    pub id: String,
    pub name: String,
    pub badge: String,
    pub placeholder: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatrixCell {
    pub candidate_id: String,
    /// `None` when the candidate has no score for this criterion.
    pub score: Option<f64>,
    /// Only set for `score` criteria; `number` criteria print the raw value.
    pub tier: Option<ScoreTier>,
    pub color: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub criterion: &'static str,
    pub kind: CriterionKind,
    pub cells: Vec<MatrixCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixResponse {
    pub generation: u64,
    pub stale: bool,
    pub fetched_at: DateTime<Utc>,
    pub page: usize,
    pub per_page: usize,
    pub total_columns: usize,
    pub total_pages: usize,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

/// At least one page, even with no columns.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page).max(1)
}

pub fn build_matrix(
    batch: &CandidateBatch,
    stale: bool,
    criteria: &[Criterion],
    paging: PageRequest,
) -> MatrixResponse {
    let total_columns = batch.columns.len();
    let visible: Vec<&MatrixColumn> = batch
        .columns
        .iter()
        .skip(paging.page * paging.per_page)
        .take(paging.per_page)
        .collect();

    let columns = visible
        .iter()
        .map(|c| ColumnHeader {
            id: c.id.clone(),
            name: c.name.clone(),
            badge: c.badge(),
            placeholder: c.placeholder,
        })
        .collect();

    let rows = criteria
        .iter()
        .map(|criterion| MatrixRow {
            criterion: criterion.name,
            kind: criterion.kind,
            cells: visible
                .iter()
                .map(|column| cell_for(column, criterion))
                .collect(),
        })
        .collect();

    MatrixResponse {
        generation: batch.generation,
        stale,
        fetched_at: batch.fetched_at,
        page: paging.page,
        per_page: paging.per_page,
        total_columns,
        total_pages: total_pages(total_columns, paging.per_page),
        columns,
        rows,
    }
}

fn cell_for(column: &MatrixColumn, criterion: &Criterion) -> MatrixCell {
    let score = column.scores.get(criterion.name);
    let tier = match criterion.kind {
        CriterionKind::Score => Some(ScoreTier::for_score(score)),
        CriterionKind::Number => None,
    };
    MatrixCell {
        candidate_id: column.id.clone(),
        score,
        tier,
        color: tier.map(ScoreTier::color),
    }
}
