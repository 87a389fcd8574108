use std::sync::Arc;

use tracing::{info, warn};

use game_core::{Clock, SystemClock};
use game_persistence::DatabaseConnection;
use game_persistence::repositories::PlayerRepository;
use game_types::{GameError, LoginResponse, Player};

use crate::auth::{AuthService, SessionClaims};
use crate::credentials::{hash_password, validate_password, validate_username, verify_password};
use crate::error::ApiError;
use crate::game_manager::roll_over_daily_play;

pub struct AccountService {
    players: PlayerRepository,
    auth: Arc<AuthService>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    pub fn new(db: DatabaseConnection, auth: Arc<AuthService>) -> Self {
        Self {
            players: PlayerRepository::new(db),
            auth,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Player, ApiError> {
        validate_username(username)?;
        validate_password(password)?;

        if self.players.find_by_username(username).await?.is_some() {
            return Err(GameError::DuplicateUsername {
                username: username.to_string(),
            }
            .into());
        }

        let password_hash = hash_password(password)?;
        let model = match self
            .players
            .create_player(username, &password_hash, false)
            .await
        {
            Ok(model) => model,
            // Lost a race with a concurrent registration of the same name
            Err(e) if PlayerRepository::is_unique_violation(&e) => {
                warn!("Concurrent registration of {} rejected", username);
                return Err(GameError::DuplicateUsername {
                    username: username.to_string(),
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };
        info!("Registered player {} ({})", model.username, model.id);

        Ok(PlayerRepository::model_to_player(&model))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let Some(model) = self.players.find_by_username(username).await? else {
            warn!("Login attempt for unknown player {}", username);
            return Err(GameError::InvalidCredentials.into());
        };

        if !verify_password(password, &model.password_hash) {
            warn!("Wrong password for player {}", model.id);
            return Err(GameError::InvalidCredentials.into());
        }

        let model = roll_over_daily_play(&self.players, model, self.clock.today()).await?;
        let token = self.auth.issue_token(&model)?;
        info!("Player {} logged in", model.id);

        Ok(LoginResponse {
            token,
            player: PlayerRepository::model_to_player(&model),
        })
    }

    pub fn logout(&self, claims: &SessionClaims) {
        self.auth.revoke(claims);
        info!("Player {} logged out", claims.sub);
    }

    /// Create the bootstrap admin account unless the username is taken.
    /// Returns true when a new account was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, ApiError> {
        if let Some(existing) = self.players.find_by_username(username).await? {
            if !existing.is_admin {
                warn!("Bootstrap admin name {} belongs to a regular player", username);
            }
            return Ok(false);
        }

        let model = self
            .players
            .create_player(username, &hash_password(password)?, true)
            .await?;
        info!("Created admin account {} ({})", model.username, model.id);
        Ok(true)
    }
}
