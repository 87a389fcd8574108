use std::env;
use std::time::Duration;

use game_core::{MAX_GUESSES_PER_ROUND, MAX_ROUNDS_PER_DAY, RoundPolicy};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub secret_key: String,
    pub session_ttl_hours: u64,
    pub max_guesses_per_round: u32,
    pub max_rounds_per_day: u32,
    pub words_file: Option<String>,
    pub admin_username: String,
    pub admin_password: String,
    pub revocation_purge_seconds: u64,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("Invalid PORT"),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://word_guesser.db?mode=rwc".to_string()),
            secret_key: env::var("SECRET_KEY")
                .unwrap_or_else(|_| "a_strong_secret_key_for_word_guesser".to_string()),
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("Invalid SESSION_TTL_HOURS"),
            max_guesses_per_round: env::var("MAX_GUESSES_PER_ROUND")
                .unwrap_or_else(|_| MAX_GUESSES_PER_ROUND.to_string())
                .parse()
                .expect("Invalid MAX_GUESSES_PER_ROUND"),
            max_rounds_per_day: env::var("MAX_ROUNDS_PER_DAY")
                .unwrap_or_else(|_| MAX_ROUNDS_PER_DAY.to_string())
                .parse()
                .expect("Invalid MAX_ROUNDS_PER_DAY"),
            words_file: env::var("WORDS_FILE").ok().filter(|path| !path.is_empty()),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "Admin@123".to_string()),
            revocation_purge_seconds: env::var("REVOCATION_PURGE_SECONDS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("Invalid REVOCATION_PURGE_SECONDS"),
        }
    }

    pub fn round_policy(&self) -> RoundPolicy {
        RoundPolicy {
            max_guesses: self.max_guesses_per_round,
            max_rounds_per_day: self.max_rounds_per_day,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_hours * 60 * 60)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
