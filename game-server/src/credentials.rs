use std::sync::LazyLock;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use game_types::GameError;
use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 5;
pub const MIN_USERNAME_LENGTH: usize = 5;

static HAS_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z]").unwrap());
static HAS_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());
static HAS_SYMBOL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[$%*@]").unwrap());

/// Password needs 5+ characters with a letter, a digit and one of `$ % * @`.
pub fn validate_password(password: &str) -> Result<(), GameError> {
    let valid = password.chars().count() >= MIN_PASSWORD_LENGTH
        && HAS_LETTER.is_match(password)
        && HAS_DIGIT.is_match(password)
        && HAS_SYMBOL.is_match(password);

    if valid {
        Ok(())
    } else {
        Err(GameError::PasswordPolicyViolation)
    }
}

/// Usernames are letters only, at least 5 of them.
pub fn validate_username(username: &str) -> Result<(), GameError> {
    let valid = username.chars().count() >= MIN_USERNAME_LENGTH
        && username.chars().all(char::is_alphabetic);

    if valid {
        Ok(())
    } else {
        Err(GameError::InvalidUsername)
    }
}

/// Argon2id with a random salt, stored in PHC string format.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
