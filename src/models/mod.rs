pub mod auth;
pub mod booking;
pub mod summary;

pub use auth::*;
pub use booking::*;
pub use summary::*;
