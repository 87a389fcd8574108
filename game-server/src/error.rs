use game_types::GameError;
use serde::Serialize;
use warp::http::StatusCode;

use crate::auth::AuthError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Game(err) => match err {
                GameError::InvalidGuessLength { .. }
                | GameError::PasswordPolicyViolation
                | GameError::InvalidUsername
                | GameError::EmptyVocabulary
                | GameError::NoActiveRound => StatusCode::BAD_REQUEST,
                GameError::AuthenticationRequired | GameError::InvalidCredentials => {
                    StatusCode::UNAUTHORIZED
                }
                GameError::AccessDenied => StatusCode::FORBIDDEN,
                GameError::PlayerNotFound { .. } => StatusCode::NOT_FOUND,
                GameError::DuplicateUsername { .. } => StatusCode::CONFLICT,
                GameError::DailyLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            },
            ApiError::Auth(AuthError::SigningFailed) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Game(err) => err.kind(),
            ApiError::Auth(AuthError::MissingToken) => "AuthenticationRequired",
            ApiError::Auth(AuthError::InvalidToken) => "InvalidToken",
            ApiError::Auth(AuthError::TokenExpired) => "TokenExpired",
            ApiError::Auth(AuthError::TokenRevoked) => "TokenRevoked",
            ApiError::Auth(AuthError::SigningFailed) | ApiError::Storage(_) => "Internal",
        }
    }

    /// Client-facing body. Internal failures are logged and never described.
    pub fn body(&self) -> ErrorBody {
        let error = match self {
            ApiError::Storage(err) => {
                tracing::error!("Storage failure: {:#}", err);
                "Internal server error".to_string()
            }
            ApiError::Auth(AuthError::SigningFailed) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        ErrorBody {
            error,
            kind: self.kind().to_string(),
        }
    }

    pub fn to_reply(&self) -> warp::reply::WithStatus<warp::reply::Json> {
        warp::reply::with_status(warp::reply::json(&self.body()), self.status())
    }
}
