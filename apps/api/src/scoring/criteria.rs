use serde::Serialize;
use thiserror::Error;

/// How a criterion's value is shown in the matrix.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    /// Coloured cell bucketed by tier.
    Score,
    /// Raw numeric value printed in the cell.
    // Every built-in criterion is a score; numeric rows are rendered but none exist yet.
    #[allow(dead_code)]
    Number,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Criterion {
    pub name: &'static str,
    pub kind: CriterionKind,
}

const fn score(name: &'static str) -> Criterion {
    Criterion {
        name,
        kind: CriterionKind::Score,
    }
}

/// Matrix rows, in display order. Static configuration; never derived from
/// fetched data.
pub const CRITERIA: [Criterion; 20] = [
    score("Creating Wireframes"),
    score("Creating Basic Prototypes"),
    score("Creation of Brands"),
    score("Applying Color Theory"),
    score("Using Figma for Design"),
    score("Application of Typography"),
    score("Creating Effective Icons"),
    score("Optimizing Touch Points"),
    score("Addressing User Pain Points"),
    score("Conducting User Research"),
    score("Applying Questioning Skills"),
    score("Conducting Heuristic Evaluation"),
    score("Gathering User Feedback"),
    score("Conducting Usability Tests"),
    score("Creating User Personas"),
    score("Conducting Market Research"),
    score("Crafting Effective Questions"),
    score("Creating Effective Surveys"),
    score("Creating Sitemaps"),
    score("Designing User Flows"),
];

#[derive(Debug, Error, PartialEq)]
#[error("Unknown criterion: {0}")]
pub struct UnknownCriterion(pub String);

/// Resolves an optional comma-separated filter into criteria rows.
///
/// Rows always come back in the fixed order regardless of the order in the
/// filter. `None` or a blank filter selects every criterion.
pub fn select_criteria(filter: Option<&str>) -> Result<Vec<Criterion>, UnknownCriterion> {
    let requested: Vec<&str> = filter
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if requested.is_empty() {
        return Ok(CRITERIA.to_vec());
    }

    if let Some(unknown) = requested
        .iter()
        .copied()
        .find(|name| !CRITERIA.iter().any(|c| c.name == *name))
    {
        return Err(UnknownCriterion(unknown.to_string()));
    }

    Ok(CRITERIA
        .iter()
        .filter(|c| requested.contains(&c.name))
        .copied()
        .collect())
}
