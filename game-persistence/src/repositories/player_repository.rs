use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, SqlErr,
};

use crate::entities::{players, prelude::*};
use game_types::{Player, PlayerId};

#[derive(Clone)]
pub struct PlayerRepository {
    db: DatabaseConnection,
}

impl PlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Public view of a stored player, without the credential hash.
    pub fn model_to_player(model: &players::Model) -> Player {
        Player {
            id: model.id,
            username: model.username.clone(),
            is_admin: model.is_admin,
            games_today: model.games_today.max(0) as u32,
            last_played_date: model.last_played_date.map(|date| date.to_string()),
        }
    }

    pub async fn find_by_id(&self, id: PlayerId) -> Result<Option<players::Model>> {
        let player = Players::find_by_id(id).one(&self.db).await?;
        Ok(player)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<players::Model>> {
        let player = Players::find()
            .filter(players::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(player)
    }

    /// True when `err` came from the unique index on usernames.
    pub fn is_unique_violation(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<DbErr>().and_then(DbErr::sql_err),
            Some(SqlErr::UniqueConstraintViolation(_))
        )
    }

    pub async fn create_player(
        &self,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<players::Model> {
        let player = players::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            is_admin: ActiveValue::Set(is_admin),
            games_today: ActiveValue::Set(0),
            last_played_date: ActiveValue::Set(None),
            ..Default::default()
        };

        let created = player.insert(&self.db).await?;
        Ok(created)
    }

    /// Overwrite the daily counter and its date.
    pub async fn update_daily_play(
        &self,
        id: PlayerId,
        games_today: u32,
        last_played_date: NaiveDate,
    ) -> Result<()> {
        let player = players::ActiveModel {
            id: ActiveValue::Unchanged(id),
            games_today: ActiveValue::Set(games_today as i32),
            last_played_date: ActiveValue::Set(Some(last_played_date)),
            ..Default::default()
        };

        Players::update(player).exec(&self.db).await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Players::find().count(&self.db).await?;
        Ok(count)
    }
}
