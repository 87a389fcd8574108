use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_players_table::Players;
use crate::m20240101_000002_create_guess_words_table::GuessWords;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameSessions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameSessions::PlayerId).integer().not_null())
                    .col(ColumnDef::new(GameSessions::WordId).integer().not_null())
                    .col(
                        ColumnDef::new(GameSessions::GuessesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameSessions::IsCorrect)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(GameSessions::SessionDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_sessions_player")
                            .from(GameSessions::Table, GameSessions::PlayerId)
                            .to(Players::Table, Players::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_sessions_word")
                            .from(GameSessions::Table, GameSessions::WordId)
                            .to(GuessWords::Table, GuessWords::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Daily report queries filter on the session date
        manager
            .create_index(
                Index::create()
                    .name("idx_game_sessions_session_date")
                    .table(GameSessions::Table)
                    .col(GameSessions::SessionDate)
                    .to_owned(),
            )
            .await?;

        // Per-player report lists a player's sessions
        manager
            .create_index(
                Index::create()
                    .name("idx_game_sessions_player_id")
                    .table(GameSessions::Table)
                    .col(GameSessions::PlayerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameSessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GameSessions {
    Table,
    Id,
    PlayerId,
    WordId,
    GuessesCount,
    IsCorrect,
    SessionDate,
}
