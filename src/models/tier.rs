use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public profile badge tier. Independent of the experience level ladder;
/// computed from published content only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl BadgeTier {
    pub fn from_score(score: i64) -> Self {
        if score >= 1000 {
            BadgeTier::Platinum
        } else if score >= 500 {
            BadgeTier::Gold
        } else if score >= 100 {
            BadgeTier::Silver
        } else {
            BadgeTier::Bronze
        }
    }
}

impl std::fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeTier::Bronze => write!(f, "bronze"),
            BadgeTier::Silver => write!(f, "silver"),
            BadgeTier::Gold => write!(f, "gold"),
            BadgeTier::Platinum => write!(f, "platinum"),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TierScoreResponse {
    pub user_id: i64,
    pub post_count: i64,
    pub like_sum: i64,
    pub score: i64,
    pub tier: BadgeTier,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TierCrossing {
    pub threshold: i64,
    pub tier: BadgeTier,
    pub reached_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TierHistoryResponse {
    pub user_id: i64,
    pub crossings: Vec<TierCrossing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(BadgeTier::from_score(0), BadgeTier::Bronze);
        assert_eq!(BadgeTier::from_score(99), BadgeTier::Bronze);
        assert_eq!(BadgeTier::from_score(100), BadgeTier::Silver);
        assert_eq!(BadgeTier::from_score(499), BadgeTier::Silver);
        assert_eq!(BadgeTier::from_score(500), BadgeTier::Gold);
        assert_eq!(BadgeTier::from_score(999), BadgeTier::Gold);
        assert_eq!(BadgeTier::from_score(1000), BadgeTier::Platinum);
    }
}
