//! Score Normalizer: flattens a candidate's nested skill tree into a flat
//! skill-name → consensus-score lookup.
//!
//! Only the first position of each skill is consulted. A skill whose first
//! position has no score is left out of the map entirely, so callers can tell
//! "unknown" (`None`) apart from a real score of zero.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::candidate::CandidateDetail;

/// Flat mapping from skill display name to consensus score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreMap(HashMap<String, f64>);

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` means no score was found for this skill.
    pub fn get(&self, skill: &str) -> Option<f64> {
        self.0.get(skill).copied()
    }

    pub fn insert(&mut self, skill: impl Into<String>, score: f64) {
        self.0.insert(skill.into(), score);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Pure; never fails. Missing levels anywhere in the tree yield a partial or
/// empty map. When two skillsets carry the same skill name, the later one wins.
pub fn normalize(detail: &CandidateDetail) -> ScoreMap {
    let mut scores = ScoreMap::new();

    for skillset in detail.skillsets() {
        for skill in skillset.skills() {
            let Some(name) = skill.name.as_deref() else {
                continue;
            };
            // First position only; later ones are ignored even when scored.
            if let Some(score) = skill.positions().first().and_then(|p| p.consensus_score) {
                scores.insert(name, score);
            }
        }
    }

    scores
}
