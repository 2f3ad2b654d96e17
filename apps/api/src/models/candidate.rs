use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// A row from `GET /people/`. Only `id` and `name` are required upstream;
/// contact fields fall back to empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateSummary {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub bio: String,
}

/// Payload of `GET /people/{id}`.
///
/// Shape: `data.data.skillset[].skills[].pos[].consensus_score`. Every level
/// is optional; a missing level simply contributes no scores. Upstream ids on
/// the inner nodes are not needed and are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data: Option<DetailEnvelope>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailEnvelope {
    #[serde(default)]
    pub data: Option<SkillTree>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillTree {
    #[serde(default)]
    pub skillset: Option<Vec<Skillset>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Skillset {
    #[serde(default)]
    pub skills: Option<Vec<Skill>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pos: Option<Vec<Position>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Position {
    /// `None` when missing, null, or not a number.
    #[serde(default, deserialize_with = "lenient_score")]
    pub consensus_score: Option<f64>,
}

impl CandidateDetail {
    /// Builds a detail from arbitrary JSON without failing.
    ///
    /// If the skill tree does not have the expected shape, the top-level
    /// `name` is kept and the tree is dropped, so the candidate shows up
    /// with no scores instead of as a fetch failure.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<CandidateDetail>(value.clone()) {
            Ok(detail) => detail,
            Err(e) => {
                warn!("Malformed skill tree, treating as no scores: {e}");
                CandidateDetail {
                    name: value
                        .get("name")
                        .and_then(|v| v.as_str())
                        .map(str::to_string),
                    data: None,
                }
            }
        }
    }

    pub fn skillsets(&self) -> &[Skillset] {
        self.data
            .as_ref()
            .and_then(|envelope| envelope.data.as_ref())
            .and_then(|tree| tree.skillset.as_deref())
            .unwrap_or(&[])
    }
}

impl Skillset {
    pub fn skills(&self) -> &[Skill] {
        self.skills.as_deref().unwrap_or(&[])
    }
}

impl Skill {
    pub fn positions(&self) -> &[Position] {
        self.pos.as_deref().unwrap_or(&[])
    }
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_tolerates_missing_contact_fields() {
        let summary: CandidateSummary =
            serde_json::from_value(json!({"id": "c1", "name": "Ada Lovelace", "phone": null}))
                .unwrap();
        assert_eq!(summary.id, "c1");
        assert_eq!(summary.email, "");
        assert_eq!(summary.phone, "");
    }

    #[test]
    fn test_detail_non_numeric_score_is_absent() {
        let detail = CandidateDetail::from_value(json!({
            "id": "c1",
            "data": {"data": {"skillset": [{"skills": [
                {"name": "Creating Sitemaps", "pos": [{"consensus_score": "high"}]}
            ]}]}}
        }));
        let skill = &detail.skillsets()[0].skills()[0];
        assert_eq!(skill.positions()[0].consensus_score, None);
    }

    #[test]
    fn test_detail_wrong_shape_keeps_name() {
        let detail = CandidateDetail::from_value(json!({
            "id": 7,
            "name": "Grace Hopper",
            "data": {"data": {"skillset": "not-a-list"}}
        }));
        assert_eq!(detail.name.as_deref(), Some("Grace Hopper"));
        assert!(detail.skillsets().is_empty());
    }

    #[test]
    fn test_detail_null_levels_are_empty() {
        let detail = CandidateDetail::from_value(json!({"id": "c1", "data": {"data": null}}));
        assert!(detail.skillsets().is_empty());
    }
}
