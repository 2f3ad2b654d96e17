use serde::Serialize;

/// Colour bucket for one matrix cell.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Tier0,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    /// No score was found. Not the same as `Tier0`.
    NoData,
}

impl ScoreTier {
    /// Buckets on `floor(score)`: `<=0`, 1, 2, 3, `>=4`. Fractions drop to the
    /// lower tier.
    pub fn for_score(score: Option<f64>) -> Self {
        let Some(score) = score else {
            return ScoreTier::NoData;
        };
        if score.is_nan() {
            return ScoreTier::NoData;
        }
        match score.floor() {
            s if s <= 0.0 => ScoreTier::Tier0,
            s if s < 2.0 => ScoreTier::Tier1,
            s if s < 3.0 => ScoreTier::Tier2,
            s if s < 4.0 => ScoreTier::Tier3,
            _ => ScoreTier::Tier4,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ScoreTier::Tier0 => "#ecfff1",
            ScoreTier::Tier1 => "#f8f7ac",
            ScoreTier::Tier2 => "#a5d773",
            ScoreTier::Tier3 => "#249349",
            ScoreTier::Tier4 => "#054118",
            ScoreTier::NoData => "#f3f4f6",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_tier_boundaries() {
        assert_eq!(ScoreTier::for_score(Some(-1.0)), ScoreTier::Tier0);
        assert_eq!(ScoreTier::for_score(Some(0.0)), ScoreTier::Tier0);
        assert_eq!(ScoreTier::for_score(Some(0.9)), ScoreTier::Tier0);
    }

    #[test]
    fn test_middle_tiers() {
        assert_eq!(ScoreTier::for_score(Some(1.0)), ScoreTier::Tier1);
        assert_eq!(ScoreTier::for_score(Some(2.0)), ScoreTier::Tier2);
        assert_eq!(ScoreTier::for_score(Some(2.7)), ScoreTier::Tier2);
        assert_eq!(ScoreTier::for_score(Some(3.0)), ScoreTier::Tier3);
    }

    #[test]
    fn test_highest_tier_boundaries() {
        assert_eq!(ScoreTier::for_score(Some(4.0)), ScoreTier::Tier4);
        assert_eq!(ScoreTier::for_score(Some(10.0)), ScoreTier::Tier4);
        assert_eq!(ScoreTier::for_score(Some(f64::INFINITY)), ScoreTier::Tier4);
    }

    #[test]
    fn test_absent_is_no_data() {
        assert_eq!(ScoreTier::for_score(None), ScoreTier::NoData);
        assert_ne!(ScoreTier::for_score(None), ScoreTier::for_score(Some(0.0)));
        assert_ne!(ScoreTier::NoData.color(), ScoreTier::Tier0.color());
    }
}
