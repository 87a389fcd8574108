use std::sync::Arc;

use chrono::NaiveDate;

use game_core::Clock;
use game_persistence::DatabaseConnection;
use game_persistence::entities::players;
use game_persistence::repositories::{PlayerRepository, SessionRepository};
use game_types::{DailyReport, GameError, PlayerId, PlayerReport};

use crate::auth::require_admin;
use crate::error::ApiError;

/// Admin-only aggregate views over recorded sessions.
pub struct ReportService {
    players: PlayerRepository,
    sessions: SessionRepository,
    clock: Arc<dyn Clock>,
}

impl ReportService {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            players: PlayerRepository::new(db.clone()),
            sessions: SessionRepository::new(db),
            clock,
        }
    }

    async fn authorize(&self, requester: PlayerId) -> Result<players::Model, ApiError> {
        let model = self
            .players
            .find_by_id(requester)
            .await?
            .ok_or(GameError::AuthenticationRequired)?;
        require_admin(&model)?;
        Ok(model)
    }

    pub async fn daily_report(
        &self,
        requester: PlayerId,
        date: Option<NaiveDate>,
    ) -> Result<DailyReport, ApiError> {
        self.authorize(requester).await?;

        let date = date.unwrap_or_else(|| self.clock.today());
        let total_players = self.sessions.count_players_on(date).await?;
        let correct_guesses = self.sessions.count_correct_on(date).await?;

        Ok(DailyReport {
            date: date.to_string(),
            total_players,
            correct_guesses,
        })
    }

    pub async fn player_report(
        &self,
        requester: PlayerId,
        player_id: PlayerId,
    ) -> Result<PlayerReport, ApiError> {
        self.authorize(requester).await?;

        let player = self
            .players
            .find_by_id(player_id)
            .await?
            .ok_or(GameError::PlayerNotFound { player_id })?;
        let report = self.sessions.sessions_for_player(player.id).await?;

        Ok(PlayerReport {
            username: player.username,
            report,
        })
    }
}
