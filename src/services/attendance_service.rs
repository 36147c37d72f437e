use crate::config::ProgressionConfig;
use crate::entities::{TransactionKind, attendance_entity as att, user_points_entity as up};
use crate::error::{AppError, AppResult};
use crate::levels;
use crate::models::{AttendanceStats, CheckInOutcome, EvaluationContext};
use crate::services::{AchievementService, PointService};
use crate::utils::ServiceClock;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::{Expr, OnConflict, PostgresQueryBuilder, Query};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QuerySelect, TransactionTrait,
};

/// Streak transition: +1 on a one-day gap, reset to 1 otherwise.
/// "No prior check-in" behaves like a broken streak and starts at 1.
pub fn next_streak(last: Option<NaiveDate>, today: NaiveDate, current: i32) -> i32 {
    match last {
        Some(date) if (today - date).num_days() == 1 => current + 1,
        _ => 1,
    }
}

/// Check-in reward: base plus a capped per-day streak bonus.
pub fn points_for_streak(streak: i32, config: &ProgressionConfig) -> i64 {
    let bonus_days = i64::from(streak.max(1) - 1).min(config.streak_bonus_cap);
    config.attendance_base_points + config.streak_bonus_step * bonus_days
}

#[derive(Clone)]
pub struct AttendanceService {
    pool: DatabaseConnection,
    point_service: PointService,
    achievement_service: AchievementService,
    clock: ServiceClock,
    config: ProgressionConfig,
}

impl AttendanceService {
    pub fn new(
        pool: DatabaseConnection,
        point_service: PointService,
        achievement_service: AchievementService,
        clock: ServiceClock,
        config: ProgressionConfig,
    ) -> Self {
        Self {
            pool,
            point_service,
            achievement_service,
            clock,
            config,
        }
    }

    /// Daily check-in. The record row is locked for the whole
    /// read-compute-write, so two same-day requests cannot both pass the
    /// "already checked in" test.
    pub async fn check_in(&self, user_id: i64) -> AppResult<CheckInOutcome> {
        let today = self.clock.today();

        let txn = self.pool.begin().await?;

        self.ensure_record_tx(&txn, user_id).await?;

        let record = att::Entity::find_by_id(user_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::StorageConflict(format!("Attendance row for user {user_id} missing"))
            })?;

        if record.last_check_in_date == Some(today) {
            return Err(AppError::AlreadyCheckedInToday);
        }

        let current_streak = next_streak(record.last_check_in_date, today, record.current_streak);
        let longest_streak = record.longest_streak.max(current_streak);
        let total_attendance = record.total_attendance + 1;

        // Guarded write; the date predicate re-asserts the same-day check
        // under the lock.
        let update_result = att::Entity::update_many()
            .col_expr(att::Column::CurrentStreak, Expr::value(current_streak))
            .col_expr(att::Column::LongestStreak, Expr::value(longest_streak))
            .col_expr(att::Column::TotalAttendance, Expr::value(total_attendance))
            .col_expr(att::Column::LastCheckInDate, Expr::value(today))
            .col_expr(att::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(att::Column::UserId.eq(user_id))
            .filter(
                Condition::any()
                    .add(att::Column::LastCheckInDate.is_null())
                    .add(att::Column::LastCheckInDate.ne(today)),
            )
            .exec(&txn)
            .await?;

        if update_result.rows_affected != 1 {
            return Err(AppError::StorageConflict(
                "Check-in raced with a concurrent request".into(),
            ));
        }

        let points_earned = points_for_streak(current_streak, &self.config);
        let award = self
            .point_service
            .award_tx(
                &txn,
                user_id,
                points_earned,
                TransactionKind::Attendance,
                &format!("Daily check-in (day {current_streak} of streak)"),
                None,
            )
            .await?;

        // Achievements see the post-award totals. Social progress is driven
        // by like/follow events, not check-ins, so it reads as zero here.
        let ctx = EvaluationContext {
            total_points: award.total_points,
            current_streak: current_streak as i64,
            total_attendance: total_attendance as i64,
            social_count: 0,
        };
        let new_achievements = self
            .achievement_service
            .evaluate_tx(&txn, user_id, &ctx)
            .await?;

        // Unlock rewards may have moved the aggregate again
        let (total_points, level) = if new_achievements.is_empty() {
            (award.total_points, award.level)
        } else {
            let aggregate = up::Entity::find_by_id(user_id).one(&txn).await?;
            let total = aggregate.map(|a| a.total_points).unwrap_or(award.total_points);
            (total, levels::level_of(total).level)
        };
        let previous_level = levels::level_of(award.total_points - points_earned).level;

        txn.commit().await?;

        self.achievement_service
            .notifier()
            .notify_unlocks(user_id, &new_achievements);

        Ok(CheckInOutcome {
            stats: AttendanceStats {
                current_streak,
                longest_streak,
                total_attendance,
                last_attendance_date: Some(today),
                can_check_in: false,
                is_today_checked: true,
            },
            points_earned,
            total_points,
            level,
            leveled_up: level > previous_level,
            new_achievements,
        })
    }

    /// Read-only projection; never creates or mutates the record.
    pub async fn get_stats(&self, user_id: i64) -> AppResult<AttendanceStats> {
        let today = self.clock.today();
        let record = att::Entity::find_by_id(user_id).one(&self.pool).await?;

        Ok(match record {
            Some(r) => {
                let is_today_checked = r.last_check_in_date == Some(today);
                AttendanceStats {
                    current_streak: r.current_streak,
                    longest_streak: r.longest_streak,
                    total_attendance: r.total_attendance,
                    last_attendance_date: r.last_check_in_date,
                    can_check_in: !is_today_checked,
                    is_today_checked,
                }
            }
            None => AttendanceStats {
                current_streak: 0,
                longest_streak: 0,
                total_attendance: 0,
                last_attendance_date: None,
                can_check_in: true,
                is_today_checked: false,
            },
        })
    }

    // -----------------------------
    // internal helpers
    // -----------------------------

    async fn ensure_record_tx(&self, txn: &DatabaseTransaction, user_id: i64) -> AppResult<()> {
        let insert = Query::insert()
            .into_table(att::Entity)
            .columns([
                att::Column::UserId,
                att::Column::CurrentStreak,
                att::Column::LongestStreak,
                att::Column::TotalAttendance,
            ])
            .values_panic([user_id.into(), 0i32.into(), 0i32.into(), 0i32.into()])
            .on_conflict(
                OnConflict::column(att::Column::UserId)
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
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_check_in_starts_at_one() {
        assert_eq!(next_streak(None, date(2026, 3, 1), 0), 1);
    }

    #[test]
    fn test_consecutive_day_increments() {
        assert_eq!(next_streak(Some(date(2026, 3, 1)), date(2026, 3, 2), 1), 2);
        assert_eq!(next_streak(Some(date(2026, 3, 2)), date(2026, 3, 3), 2), 3);
    }

    #[test]
    fn test_gap_resets_to_one() {
        // day 1, day 2, skip day 3, check in day 4
        let streak = next_streak(Some(date(2026, 3, 1)), date(2026, 3, 2), 1);
        assert_eq!(streak, 2);
        assert_eq!(next_streak(Some(date(2026, 3, 2)), date(2026, 3, 4), streak), 1);
    }

    #[test]
    fn test_month_boundary_counts_as_consecutive() {
        assert_eq!(next_streak(Some(date(2026, 2, 28)), date(2026, 3, 1), 4), 5);
    }

    #[test]
    fn test_points_for_streak_scales_and_caps() {
        let config = ProgressionConfig {
            utc_offset_minutes: 540,
            attendance_base_points: 10,
            streak_bonus_step: 2,
            streak_bonus_cap: 15,
        };
        assert_eq!(points_for_streak(1, &config), 10);
        assert_eq!(points_for_streak(2, &config), 12);
        assert_eq!(points_for_streak(16, &config), 40);
        // capped past 16 consecutive days
        assert_eq!(points_for_streak(30, &config), 40);
        assert_eq!(points_for_streak(0, &config), 10);
    }
}
