pub mod player_repository;
pub mod session_repository;
pub mod word_repository;

pub use player_repository::PlayerRepository;
pub use session_repository::SessionRepository;
pub use word_repository::WordRepository;
