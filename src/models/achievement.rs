use crate::entities::{RequirementType, achievement_entity as ach};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Post-award snapshot the engine evaluates requirement predicates against.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationContext {
    pub total_points: i64,
    pub current_streak: i64,
    pub total_attendance: i64,
    pub social_count: i64,
}

impl EvaluationContext {
    /// Maps a requirement type to its context field.
    pub fn value_for(&self, requirement: RequirementType) -> i64 {
        match requirement {
            RequirementType::Count => self.total_attendance,
            RequirementType::Streak => self.current_streak,
            RequirementType::Milestone => self.total_points,
            RequirementType::Social => self.social_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnlockedAchievement {
    pub achievement_id: i64,
    pub name: String,
    pub description: String,
    pub experience_reward: i64,
    pub badge_reward: Option<String>,
    pub achieved_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AchievementStatus {
    pub achievement_id: i64,
    pub name: String,
    pub description: String,
    pub requirement_type: RequirementType,
    pub requirement_value: i64,
    pub experience_reward: i64,
    pub badge_reward: Option<String>,
    pub progress: i32,
    pub achieved_at: Option<DateTime<Utc>>,
}

impl UnlockedAchievement {
    pub fn from_catalog(achievement: &ach::Model, achieved_at: DateTime<Utc>) -> Self {
        Self {
            achievement_id: achievement.id,
            name: achievement.name.clone(),
            description: achievement.description.clone(),
            experience_reward: achievement.experience_reward,
            badge_reward: achievement.badge_reward.clone(),
            achieved_at,
        }
    }
}
