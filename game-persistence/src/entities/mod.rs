pub mod prelude;

pub mod game_sessions;
pub mod guess_words;
pub mod players;
