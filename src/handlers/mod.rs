pub mod achievements;
pub mod attendance;
pub mod badge;
pub mod points;

pub use achievements::achievements_config;
pub use attendance::attendance_config;
pub use badge::badge_config;
pub use points::points_config;
