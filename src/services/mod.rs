pub mod achievement_service;
pub mod attendance_service;
pub mod point_service;
pub mod tier_service;

pub use achievement_service::*;
pub use attendance_service::*;
pub use point_service::*;
pub use tier_service::*;
