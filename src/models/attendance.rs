use crate::models::UnlockedAchievement;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceStats {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub total_attendance: i32,
    pub last_attendance_date: Option<NaiveDate>,
    pub can_check_in: bool,
    pub is_today_checked: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckInOutcome {
    pub stats: AttendanceStats,
    pub points_earned: i64,
    pub total_points: i64,
    pub level: i32,
    pub leveled_up: bool,
    pub new_achievements: Vec<UnlockedAchievement>,
}
