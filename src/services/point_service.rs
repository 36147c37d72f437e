use crate::entities::{
    TransactionKind, point_transaction_entity as pt, user_points_entity as up,
};
use crate::error::{AppError, AppResult};
use crate::levels;
use crate::models::{
    AwardOutcome, PaginatedResponse, PaginationParams, PointTransactionResponse, PointsResponse,
};
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict, PostgresQueryBuilder, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};

#[derive(Clone)]
pub struct PointService {
    pool: DatabaseConnection,
}

impl PointService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Appends one ledger row and moves the aggregate with it, atomically.
    pub async fn award(
        &self,
        user_id: i64,
        points: i64,
        kind: TransactionKind,
        description: &str,
        reference_id: Option<i64>,
    ) -> AppResult<AwardOutcome> {
        let txn = self.pool.begin().await?;
        let outcome = self
            .award_tx(&txn, user_id, points, kind, description, reference_id)
            .await?;
        txn.commit().await?;
        Ok(outcome)
    }

    /// Same as [`award`](Self::award) but joins a caller-owned transaction,
    /// so check-in and achievement rewards commit or roll back as one unit.
    pub async fn award_tx(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        points: i64,
        kind: TransactionKind,
        description: &str,
        reference_id: Option<i64>,
    ) -> AppResult<AwardOutcome> {
        if points == 0 {
            return Err(AppError::ValidationError(
                "Points must be a non-zero amount".into(),
            ));
        }

        self.ensure_aggregate_tx(txn, user_id).await?;

        pt::ActiveModel {
            user_id: Set(user_id),
            points: Set(points),
            kind: Set(kind),
            description: Set(description.to_string()),
            reference_id: Set(reference_id),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        // Single-statement increment; never read-compute-write the total.
        let update_result = up::Entity::update_many()
            .col_expr(
                up::Column::TotalPoints,
                Expr::col(up::Column::TotalPoints).add(points),
            )
            .filter(up::Column::UserId.eq(user_id))
            .exec(txn)
            .await?;

        if update_result.rows_affected != 1 {
            return Err(AppError::StorageConflict(format!(
                "Aggregate update for user {user_id} affected {} rows",
                update_result.rows_affected
            )));
        }

        // The level comes from the post-update total read back under the
        // same transaction.
        let aggregate = up::Entity::find_by_id(user_id)
            .one(txn)
            .await?
            .ok_or_else(|| {
                AppError::StorageConflict(format!(
                    "Aggregate row for user {user_id} vanished after update"
                ))
            })?;

        let total_points = aggregate.total_points;
        let new_level = levels::level_of(total_points).level;
        let previous_level = levels::level_of(total_points - points).level;

        let mut am = aggregate.into_active_model();
        am.current_level = Set(new_level);
        am.updated_at = Set(Some(Utc::now()));
        am.update(txn).await?;

        Ok(AwardOutcome {
            total_points,
            level: new_level,
            leveled_up: new_level > previous_level,
        })
    }

    pub async fn get_points(&self, user_id: i64) -> AppResult<PointsResponse> {
        let aggregate = up::Entity::find_by_id(user_id).one(&self.pool).await?;

        // Users with no ledger yet read as zero without persisting a row
        let (total_points, updated_at) = match aggregate {
            Some(m) => (m.total_points, m.updated_at),
            None => (0, None),
        };

        Ok(PointsResponse {
            user_id,
            total_points,
            progress: levels::progress_of(total_points),
            updated_at,
        })
    }

    /// Ledger history, newest first.
    pub async fn list_transactions(
        &self,
        user_id: i64,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<PointTransactionResponse>> {
        let base_query = pt::Entity::find().filter(pt::Column::UserId.eq(user_id));

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items_models = base_query
            .order_by(pt::Column::CreatedAt, Order::Desc)
            .order_by(pt::Column::Id, Order::Desc)
            .limit(u64::from(params.get_limit()))
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let items: Vec<PointTransactionResponse> =
            items_models.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(items, params, total))
    }

    // -----------------------------
    // internal helpers
    // -----------------------------

    /// First-write-wins creation of the aggregate row (ON CONFLICT DO
    /// NOTHING), so two concurrent first awards cannot both create it.
    async fn ensure_aggregate_tx(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
    ) -> AppResult<()> {
        let insert = Query::insert()
            .into_table(up::Entity)
            .columns([
                up::Column::UserId,
                up::Column::TotalPoints,
                up::Column::CurrentLevel,
            ])
            .values_panic([user_id.into(), 0i64.into(), 1i32.into()])
            .on_conflict(
                OnConflict::column(up::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();
        let (sql, values) = insert.build(PostgresQueryBuilder);
        let stmt = sea_orm::Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            sql,
            values,
        );
        txn.execute(stmt).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::levels;

    // Mirrors how award_tx derives leveled_up from the post-update total.
    fn leveled_up(total_after: i64, delta: i64) -> bool {
        levels::level_of(total_after).level > levels::level_of(total_after - delta).level
    }

    #[test]
    fn test_first_award_stays_in_level_one() {
        assert_eq!(levels::level_of(50).level, 1);
        assert!(!leveled_up(50, 50));
    }

    #[test]
    fn test_crossing_a_tier_reports_level_up() {
        // 50 + 60 = 110 crosses the 100-point line into level 2
        assert_eq!(levels::level_of(110).level, 2);
        assert!(leveled_up(110, 60));
    }

    #[test]
    fn test_negative_award_can_drop_a_level() {
        assert!(!leveled_up(90, -30));
        assert_eq!(levels::level_of(90).level, 1);
        assert_eq!(levels::level_of(120).level, 2);
    }
}
