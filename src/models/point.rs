use crate::entities::{TransactionKind, point_transaction_entity as pt};
use crate::levels::LevelProgress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AwardRequest {
    pub points: i64,
    /// One of: attendance, achievement, content, social, reward.
    pub kind: String,
    pub description: String,
    pub reference_id: Option<i64>,
}

/// Result of a single ledger append.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AwardOutcome {
    pub total_points: i64,
    pub level: i32,
    pub leveled_up: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PointsResponse {
    pub user_id: i64,
    pub total_points: i64,
    pub progress: LevelProgress,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PointTransactionResponse {
    pub id: i64,
    pub points: i64,
    pub kind: TransactionKind,
    pub description: String,
    pub reference_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<pt::Model> for PointTransactionResponse {
    fn from(tx: pt::Model) -> Self {
        Self {
            id: tx.id,
            points: tx.points,
            kind: tx.kind,
            description: tx.description,
            reference_id: tx.reference_id,
            created_at: tx.created_at,
        }
    }
}
