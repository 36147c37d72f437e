use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    /// Total number of check-in days.
    #[sea_orm(string_value = "count")]
    Count,
    /// Current consecutive-day streak.
    #[sea_orm(string_value = "streak")]
    Streak,
    /// Lifetime point total.
    #[sea_orm(string_value = "milestone")]
    Milestone,
    /// Social interactions received (likes, follows).
    #[sea_orm(string_value = "social")]
    Social,
}

impl std::fmt::Display for RequirementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequirementType::Count => write!(f, "count"),
            RequirementType::Streak => write!(f, "streak"),
            RequirementType::Milestone => write!(f, "milestone"),
            RequirementType::Social => write!(f, "social"),
        }
    }
}

/// Admin-managed catalog; read-only at runtime.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "achievements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: String,
    pub requirement_type: RequirementType,
    pub requirement_value: i64,
    pub experience_reward: i64,
    pub badge_reward: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
