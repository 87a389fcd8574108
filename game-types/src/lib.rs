pub mod game;
pub mod reports;
pub mod user;
pub mod errors;

// Re-export all types
pub use game::*;
pub use reports::*;
pub use user::*;
pub use errors::*;

pub type PlayerId = i32;
pub type WordId = i32;
pub type SessionId = i32;
