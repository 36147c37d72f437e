pub mod achievement;
pub mod attendance;
pub mod common;
pub mod pagination;
pub mod point;
pub mod tier;

pub use achievement::*;
pub use attendance::*;
pub use common::*;
pub use pagination::*;
pub use point::*;
pub use tier::*;
