use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum GameError {
    #[error("Daily limit of {limit} games reached. Come back tomorrow!")]
    DailyLimitExceeded { limit: u32 },
    #[error("No active game session.")]
    NoActiveRound,
    #[error("Guess must be a {expected}-letter word.")]
    InvalidGuessLength { expected: u32, actual: u32 },
    #[error("Player not found.")]
    PlayerNotFound { player_id: i32 },
    #[error("Access Denied")]
    AccessDenied,
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("Password must have at least 5 characters (alpha, numeric, and one of $, %, *, @).")]
    PasswordPolicyViolation,
    #[error("Username already exists.")]
    DuplicateUsername { username: String },
    #[error("Username must have at least 5 letters.")]
    InvalidUsername,
    #[error("Authentication required.")]
    AuthenticationRequired,
    #[error("No words available to play.")]
    EmptyVocabulary,
}

impl GameError {
    /// Stable machine-readable name, used in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::DailyLimitExceeded { .. } => "DailyLimitExceeded",
            GameError::NoActiveRound => "NoActiveRound",
            GameError::InvalidGuessLength { .. } => "InvalidGuessLength",
            GameError::PlayerNotFound { .. } => "PlayerNotFound",
            GameError::AccessDenied => "AccessDenied",
            GameError::InvalidCredentials => "InvalidCredentials",
            GameError::PasswordPolicyViolation => "PasswordPolicyViolation",
            GameError::DuplicateUsername { .. } => "DuplicateUsername",
            GameError::InvalidUsername => "InvalidUsername",
            GameError::AuthenticationRequired => "AuthenticationRequired",
            GameError::EmptyVocabulary => "EmptyVocabulary",
        }
    }
}
