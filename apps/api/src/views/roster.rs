use serde::Serialize;

use crate::models::candidate::CandidateSummary;
use crate::selection::SelectionSnapshot;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub candidate: CandidateSummary,
    pub initials: String,
}

impl From<CandidateSummary> for RosterEntry {
    fn from(candidate: CandidateSummary) -> Self {
        let initials = initials(&candidate.name);
        Self {
            candidate,
            initials,
        }
    }
}

/// The sidebar: candidates split by selection membership.
#[derive(Debug, Clone, Serialize)]
pub struct RosterView {
    pub selected: Vec<RosterEntry>,
    pub available: Vec<RosterEntry>,
    /// True when the upstream list itself was empty.
    pub empty: bool,
}

/// Splits `candidates` by membership in `selection`. Fetch order is kept
/// within each half.
pub fn partition(candidates: Vec<CandidateSummary>, selection: &SelectionSnapshot) -> RosterView {
    let empty = candidates.is_empty();
    let (selected, available): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .map(RosterEntry::from)
        .partition(|entry| selection.contains(&entry.candidate.id));

    RosterView {
        selected,
        available,
        empty,
    }
}

/// "Ada" → "A", "Ada King Lovelace" → "AL".
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split(' ').collect();
    let first_char = |word: &str| word.chars().next();

    let letters: Vec<char> = match words.as_slice() {
        [] => Vec::new(),
        [only] => first_char(*only).into_iter().collect(),
        [first, .., last] => first_char(*first)
            .into_iter()
            .chain(first_char(*last))
            .collect(),
    };

    letters.into_iter().flat_map(char::to_uppercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, name: &str) -> CandidateSummary {
        CandidateSummary {
            id: id.to_string(),
            name: name.to_string(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            bio: String::new(),
        }
    }

    #[test]
    fn test_partition_preserves_order() {
        let people = vec![
            person("1", "Ada Lovelace"),
            person("2", "Grace Hopper"),
            person("3", "Alan Turing"),
            person("4", "Edsger Dijkstra"),
        ];
        let selection = SelectionSnapshot {
            ids: vec!["3".to_string(), "1".to_string()],
            generation: 2,
        };

        let view = partition(people, &selection);

        let selected: Vec<_> = view.selected.iter().map(|e| e.candidate.id.as_str()).collect();
        let available: Vec<_> = view.available.iter().map(|e| e.candidate.id.as_str()).collect();
        assert_eq!(selected, vec!["1", "3"]);
        assert_eq!(available, vec!["2", "4"]);
        assert!(!view.empty);
    }

    #[test]
    fn test_partition_ignores_unknown_selected_ids() {
        let selection = SelectionSnapshot {
            ids: vec!["ghost".to_string()],
            generation: 1,
        };
        let view = partition(vec![person("1", "Ada Lovelace")], &selection);
        assert!(view.selected.is_empty());
        assert_eq!(view.available.len(), 1);
    }

    #[test]
    fn test_empty_roster() {
        let view = partition(Vec::new(), &SelectionSnapshot::default());
        assert!(view.empty);
        assert!(view.selected.is_empty() && view.available.is_empty());
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("ada"), "A");
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("ada king lovelace"), "AL");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_entry_serializes_flat() {
        let entry = RosterEntry::from(person("1", "Grace Hopper"));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], "1");
        assert_eq!(value["initials"], "GH");
    }
}
