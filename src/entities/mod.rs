pub mod achievements;
pub mod attendance;
pub mod point_transactions;
pub mod posts;
pub mod user_achievements;
pub mod user_points;

pub use achievements as achievement_entity;
pub use attendance as attendance_entity;
pub use point_transactions as point_transaction_entity;
pub use posts as post_entity;
pub use user_achievements as user_achievement_entity;
pub use user_points as user_points_entity;

pub use achievements::RequirementType;
pub use point_transactions::TransactionKind;
