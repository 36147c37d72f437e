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
pub enum TransactionKind {
    #[sea_orm(string_value = "attendance")]
    Attendance,
    #[sea_orm(string_value = "achievement")]
    Achievement,
    #[sea_orm(string_value = "content")]
    Content,
    #[sea_orm(string_value = "social")]
    Social,
    #[sea_orm(string_value = "reward")]
    Reward,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Attendance => write!(f, "attendance"),
            TransactionKind::Achievement => write!(f, "achievement"),
            TransactionKind::Content => write!(f, "content"),
            TransactionKind::Social => write!(f, "social"),
            TransactionKind::Reward => write!(f, "reward"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attendance" => Ok(TransactionKind::Attendance),
            "achievement" => Ok(TransactionKind::Achievement),
            "content" => Ok(TransactionKind::Content),
            "social" => Ok(TransactionKind::Social),
            "reward" => Ok(TransactionKind::Reward),
            other => Err(other.to_string()),
        }
    }
}

// Append-only ledger; rows are inserted once and never touched again.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "point_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub points: i64,
    pub kind: TransactionKind,
    pub description: String,
    pub reference_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
