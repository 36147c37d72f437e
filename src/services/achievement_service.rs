use crate::entities::{
    TransactionKind, achievement_entity as ach, attendance_entity as att, post_entity as posts,
    user_achievement_entity as ua, user_points_entity as up,
};
use crate::error::AppResult;
use crate::external::UnlockNotifier;
use crate::models::{AchievementStatus, EvaluationContext, UnlockedAchievement};
use crate::services::PointService;
use chrono::Utc;
use sea_orm::sea_query::{OnConflict, PostgresQueryBuilder, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;

/// Percentage of a requirement covered by `value`, capped at 100.
pub fn progress_pct(value: i64, requirement_value: i64) -> i32 {
    if requirement_value <= 0 {
        return 100;
    }
    ((value.max(0) * 100) / requirement_value).min(100) as i32
}

#[derive(Clone)]
pub struct AchievementService {
    pool: DatabaseConnection,
    point_service: PointService,
    notifier: UnlockNotifier,
}

impl AchievementService {
    pub fn new(
        pool: DatabaseConnection,
        point_service: PointService,
        notifier: UnlockNotifier,
    ) -> Self {
        Self {
            pool,
            point_service,
            notifier,
        }
    }

    /// Evaluates the whole catalog against `ctx` and unlocks whatever is
    /// due. Returns newly unlocked achievements only; already-held ones are
    /// skipped without touching storage.
    pub async fn evaluate_tx(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        ctx: &EvaluationContext,
    ) -> AppResult<Vec<UnlockedAchievement>> {
        // Catalog order keeps evaluation deterministic across retries
        let catalog = ach::Entity::find()
            .order_by_asc(ach::Column::Id)
            .all(txn)
            .await?;

        let held: Vec<i64> = ua::Entity::find()
            .filter(ua::Column::UserId.eq(user_id))
            .all(txn)
            .await?
            .into_iter()
            .map(|m| m.achievement_id)
            .collect();

        let mut unlocked = Vec::new();

        for achievement in catalog {
            if held.contains(&achievement.id) {
                continue;
            }

            let value = ctx.value_for(achievement.requirement_type);
            let progress = progress_pct(value, achievement.requirement_value);
            if progress < 100 {
                continue;
            }

            let achieved_at = Utc::now();
            if !self.insert_unlock_tx(txn, user_id, achievement.id, achieved_at).await? {
                // Lost the insert race; someone else unlocked it first
                continue;
            }

            if achievement.experience_reward > 0 {
                // A failed reward grant must not fail the triggering action
                if let Err(e) = self
                    .point_service
                    .award_tx(
                        txn,
                        user_id,
                        achievement.experience_reward,
                        TransactionKind::Achievement,
                        &format!("Achievement unlocked: {}", achievement.name),
                        Some(achievement.id),
                    )
                    .await
                {
                    log::error!(
                        "Failed to grant reward for achievement {}: {e}",
                        achievement.id
                    );
                }
            }

            unlocked.push(UnlockedAchievement::from_catalog(&achievement, achieved_at));
        }

        Ok(unlocked)
    }

    /// Standalone evaluation entry point for the CRUD layer: assembles the
    /// current context from storage, evaluates, and pings the notifier.
    pub async fn evaluate_current(&self, user_id: i64) -> AppResult<Vec<UnlockedAchievement>> {
        let ctx = self.build_context(user_id).await?;

        let txn = self.pool.begin().await?;
        let unlocked = self.evaluate_tx(&txn, user_id, &ctx).await?;
        txn.commit().await?;

        self.notifier.notify_unlocks(user_id, &unlocked);
        Ok(unlocked)
    }

    /// Catalog joined with the user's unlock state and live progress.
    pub async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<AchievementStatus>> {
        let ctx = self.build_context(user_id).await?;

        let catalog = ach::Entity::find()
            .order_by_asc(ach::Column::Id)
            .all(&self.pool)
            .await?;

        let held: HashMap<i64, ua::Model> = ua::Entity::find()
            .filter(ua::Column::UserId.eq(user_id))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|m| (m.achievement_id, m))
            .collect();

        let statuses = catalog
            .into_iter()
            .map(|a| {
                let unlock = held.get(&a.id);
                let progress = match unlock {
                    Some(u) => u.progress,
                    None => progress_pct(
                        ctx.value_for(a.requirement_type),
                        a.requirement_value,
                    ),
                };
                AchievementStatus {
                    achievement_id: a.id,
                    name: a.name,
                    description: a.description,
                    requirement_type: a.requirement_type,
                    requirement_value: a.requirement_value,
                    experience_reward: a.experience_reward,
                    badge_reward: a.badge_reward,
                    progress,
                    achieved_at: unlock.map(|u| u.achieved_at),
                }
            })
            .collect();

        Ok(statuses)
    }

    pub fn notifier(&self) -> &UnlockNotifier {
        &self.notifier
    }

    // -----------------------------
    // internal helpers
    // -----------------------------

    async fn build_context(&self, user_id: i64) -> AppResult<EvaluationContext> {
        let aggregate = up::Entity::find_by_id(user_id).one(&self.pool).await?;
        let attendance = att::Entity::find_by_id(user_id).one(&self.pool).await?;

        let like_sum: i64 = posts::Entity::find()
            .filter(posts::Column::UserId.eq(user_id))
            .filter(posts::Column::Published.eq(true))
            .all(&self.pool)
            .await?
            .iter()
            .map(|p| p.like_count)
            .sum();

        Ok(EvaluationContext {
            total_points: aggregate.map(|a| a.total_points).unwrap_or(0),
            current_streak: attendance
                .as_ref()
                .map(|a| a.current_streak as i64)
                .unwrap_or(0),
            total_attendance: attendance
                .map(|a| a.total_attendance as i64)
                .unwrap_or(0),
            social_count: like_sum,
        })
    }

    /// ON CONFLICT DO NOTHING insert against UNIQUE(user_id, achievement_id);
    /// returns whether this call actually created the row.
    async fn insert_unlock_tx(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        achievement_id: i64,
        achieved_at: chrono::DateTime<Utc>,
    ) -> AppResult<bool> {
        let insert = Query::insert()
            .into_table(ua::Entity)
            .columns([
                ua::Column::UserId,
                ua::Column::AchievementId,
                ua::Column::AchievedAt,
                ua::Column::Progress,
            ])
            .values_panic([
                user_id.into(),
                achievement_id.into(),
                achieved_at.into(),
                100i32.into(),
            ])
            .on_conflict(
                OnConflict::columns([ua::Column::UserId, ua::Column::AchievementId])
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
        let res = txn.execute(stmt).await?;
        Ok(res.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RequirementType;

    #[test]
    fn test_progress_pct() {
        assert_eq!(progress_pct(0, 7), 0);
        assert_eq!(progress_pct(3, 7), 42);
        assert_eq!(progress_pct(7, 7), 100);
        assert_eq!(progress_pct(70, 7), 100);
        assert_eq!(progress_pct(-1, 7), 0);
    }

    #[test]
    fn test_progress_pct_degenerate_requirement() {
        assert_eq!(progress_pct(0, 0), 100);
    }

    #[test]
    fn test_context_field_mapping() {
        let ctx = EvaluationContext {
            total_points: 110,
            current_streak: 7,
            total_attendance: 30,
            social_count: 55,
        };
        assert_eq!(ctx.value_for(RequirementType::Milestone), 110);
        assert_eq!(ctx.value_for(RequirementType::Streak), 7);
        assert_eq!(ctx.value_for(RequirementType::Count), 30);
        assert_eq!(ctx.value_for(RequirementType::Social), 55);
    }
}
