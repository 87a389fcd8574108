pub use super::game_sessions::Entity as GameSessions;
pub use super::guess_words::Entity as GuessWords;
pub use super::players::Entity as Players;
