use crate::entities::post_entity as posts;
use crate::error::AppResult;
use crate::models::{BadgeTier, TierCrossing, TierHistoryResponse, TierScoreResponse};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder};

const TIER_THRESHOLDS: &[(i64, BadgeTier)] = &[
    (100, BadgeTier::Silver),
    (500, BadgeTier::Gold),
    (1000, BadgeTier::Platinum),
];

/// Per-post contribution to the badge score.
fn post_score(like_count: i64) -> i64 {
    2 + like_count
}

/// Walks posts in publication order and records the first crossing of each
/// threshold; a threshold is recorded at most once.
pub fn crossings_of(posts: &[(DateTime<Utc>, i64)]) -> Vec<TierCrossing> {
    let mut crossings = Vec::new();
    let mut acc = 0i64;

    for (created_at, like_count) in posts {
        acc += post_score(*like_count);
        for (threshold, tier) in TIER_THRESHOLDS {
            if acc >= *threshold && !crossings.iter().any(|c: &TierCrossing| c.threshold == *threshold) {
                crossings.push(TierCrossing {
                    threshold: *threshold,
                    tier: *tier,
                    reached_at: *created_at,
                });
            }
        }
    }

    crossings
}

/// Profile badge scoring. Read-only over the content tables and entirely
/// separate from the experience-level ladder.
#[derive(Clone)]
pub struct TierService {
    pool: DatabaseConnection,
}

impl TierService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn tier_score_of(&self, user_id: i64) -> AppResult<TierScoreResponse> {
        let published = self.published_posts(user_id).await?;

        let post_count = published.len() as i64;
        let like_sum: i64 = published.iter().map(|p| p.like_count).sum();
        let score = post_count * 2 + like_sum;

        Ok(TierScoreResponse {
            user_id,
            post_count,
            like_sum,
            score,
            tier: BadgeTier::from_score(score),
        })
    }

    pub async fn tier_history_of(&self, user_id: i64) -> AppResult<TierHistoryResponse> {
        let published = self.published_posts(user_id).await?;

        let timeline: Vec<(chrono::DateTime<Utc>, i64)> = published
            .iter()
            .map(|p| (p.created_at, p.like_count))
            .collect();

        Ok(TierHistoryResponse {
            user_id,
            crossings: crossings_of(&timeline),
        })
    }

    async fn published_posts(&self, user_id: i64) -> AppResult<Vec<posts::Model>> {
        let list = posts::Entity::find()
            .filter(posts::Column::UserId.eq(user_id))
            .filter(posts::Column::Published.eq(true))
            .order_by(posts::Column::CreatedAt, Order::Asc)
            .all(&self.pool)
            .await?;
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_no_posts_no_crossings() {
        assert!(crossings_of(&[]).is_empty());
    }

    #[test]
    fn test_first_crossing_recorded_once() {
        // post 1: 2 + 60 = 62; post 2: + 2 + 40 = 104 -> silver at post 2
        let posts = vec![(at(1), 60), (at(2), 40), (at(3), 400)];
        let crossings = crossings_of(&posts);

        assert_eq!(crossings.len(), 2);
        assert_eq!(crossings[0].threshold, 100);
        assert_eq!(crossings[0].tier, BadgeTier::Silver);
        assert_eq!(crossings[0].reached_at, at(2));
        // post 3 pushes 104 -> 506, across the gold line
        assert_eq!(crossings[1].threshold, 500);
        assert_eq!(crossings[1].reached_at, at(3));
    }

    #[test]
    fn test_single_post_can_cross_multiple_thresholds() {
        let posts = vec![(at(1), 1500)];
        let crossings = crossings_of(&posts);

        assert_eq!(crossings.len(), 3);
        assert!(crossings.iter().all(|c| c.reached_at == at(1)));
        assert_eq!(crossings[2].tier, BadgeTier::Platinum);
    }

    #[test]
    fn test_crossings_are_ordered_by_threshold() {
        let posts = vec![(at(1), 120), (at(2), 400), (at(3), 600)];
        let crossings = crossings_of(&posts);

        let thresholds: Vec<i64> = crossings.iter().map(|c| c.threshold).collect();
        assert_eq!(thresholds, vec![100, 500, 1000]);
        assert_eq!(crossings[0].reached_at, at(1));
        assert_eq!(crossings[1].reached_at, at(2));
        assert_eq!(crossings[2].reached_at, at(3));
    }
}
