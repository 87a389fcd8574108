use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use game_persistence::entities::players;
use game_types::{GameError, PlayerId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: PlayerId,    // Player id
    pub username: String, // Username at login time
    pub jti: String,      // Unique token id, used for revocation
    pub iat: u64,         // Issued at
    pub exp: u64,         // Expiry
}

pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: Duration,
    // Revoked token ids mapped to their expiry
    revoked: DashMap<String, u64>,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

impl AuthService {
    pub fn new(secret: &str, session_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl,
            revoked: DashMap::new(),
        }
    }

    pub fn issue_token(&self, player: &players::Model) -> Result<String, AuthError> {
        let iat = now_secs();
        let claims = SessionClaims {
            sub: player.id,
            username: player.username.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat,
            exp: iat + self.session_ttl.as_secs(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign session token: {:?}", e);
            AuthError::SigningFailed
        })
    }

    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => {
                        tracing::warn!("Session token validation failed: {:?}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;

        let claims = token_data.claims;
        if self.revoked.contains_key(&claims.jti) {
            tracing::debug!("Rejected revoked token {}", claims.jti);
            return Err(AuthError::TokenRevoked);
        }

        Ok(claims)
    }

    /// Reject the token from now on, until it would have expired anyway.
    pub fn revoke(&self, claims: &SessionClaims) {
        self.revoked.insert(claims.jti.clone(), claims.exp);
    }

    /// Drop revocations whose tokens have expired. Returns how many were removed.
    pub fn purge_expired_revocations(&self) -> usize {
        let now = now_secs();
        let before = self.revoked.len();
        self.revoked.retain(|_, exp| *exp >= now);
        before - self.revoked.len()
    }

    pub fn revoked_count(&self) -> usize {
        self.revoked.len()
    }

    /// Strip an optional `Bearer ` prefix from an authorization header.
    pub fn bearer_token(header: &str) -> &str {
        header.strip_prefix("Bearer ").unwrap_or(header).trim()
    }

    pub fn authenticate(&self, auth_header: Option<&str>) -> Result<SessionClaims, AuthError> {
        let header = auth_header.ok_or(AuthError::MissingToken)?;
        self.validate_token(Self::bearer_token(header))
    }
}

/// The single authorization check applied before every admin operation.
pub fn require_admin(player: &players::Model) -> Result<(), GameError> {
    if player.is_admin {
        Ok(())
    } else {
        tracing::warn!("Player {} attempted an admin operation", player.id);
        Err(GameError::AccessDenied)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token revoked")]
    TokenRevoked,
    #[error("Failed to sign token")]
    SigningFailed,
}
