pub mod clock;
pub mod jwt;

pub use clock::*;
pub use jwt::*;
