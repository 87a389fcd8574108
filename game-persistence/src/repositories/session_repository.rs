use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::entities::{game_sessions, players, prelude::*};
use game_types::{PlayerId, PlayerReportEntry, SessionId, WordId};

#[derive(Clone)]
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_report_entry(model: game_sessions::Model) -> PlayerReportEntry {
        PlayerReportEntry {
            date: model.session_date.to_string(),
            words_tried: model.guesses_count.max(0) as u32,
            correct_guess: model.is_correct,
        }
    }

    pub async fn create_session(
        &self,
        player_id: PlayerId,
        word_id: WordId,
        session_date: NaiveDate,
    ) -> Result<game_sessions::Model> {
        let session = game_sessions::ActiveModel {
            player_id: ActiveValue::Set(player_id),
            word_id: ActiveValue::Set(word_id),
            guesses_count: ActiveValue::Set(0),
            is_correct: ActiveValue::Set(false),
            session_date: ActiveValue::Set(session_date),
            ..Default::default()
        };

        let created = session.insert(&self.db).await?;
        Ok(created)
    }

    fn progress_model(
        id: SessionId,
        guesses_count: u32,
        is_correct: bool,
    ) -> game_sessions::ActiveModel {
        game_sessions::ActiveModel {
            id: ActiveValue::Unchanged(id),
            guesses_count: ActiveValue::Set(guesses_count as i32),
            is_correct: ActiveValue::Set(is_correct),
            ..Default::default()
        }
    }

    /// Save the guess counter and correctness flag of a session.
    pub async fn record_progress(
        &self,
        id: SessionId,
        guesses_count: u32,
        is_correct: bool,
    ) -> Result<()> {
        GameSessions::update(Self::progress_model(id, guesses_count, is_correct))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Save the final state of a session and count it against the player's
    /// daily allowance. Both writes land or neither does.
    pub async fn record_finished(
        &self,
        id: SessionId,
        player_id: PlayerId,
        guesses_count: u32,
        is_correct: bool,
    ) -> Result<()> {
        let txn = self.db.begin().await?;

        GameSessions::update(Self::progress_model(id, guesses_count, is_correct))
            .exec(&txn)
            .await?;

        let result = Players::update_many()
            .col_expr(
                players::Column::GamesToday,
                Expr::col(players::Column::GamesToday).add(1),
            )
            .filter(players::Column::Id.eq(player_id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(anyhow::anyhow!("Player {} not found", player_id));
        }

        txn.commit().await?;
        Ok(())
    }

    /// Number of distinct players with at least one session on `date`.
    pub async fn count_players_on(&self, date: NaiveDate) -> Result<u64> {
        let count = GameSessions::find()
            .select_only()
            .column(game_sessions::Column::PlayerId)
            .filter(game_sessions::Column::SessionDate.eq(date))
            .distinct()
            .count(&self.db)
            .await?;

        Ok(count)
    }

    pub async fn count_correct_on(&self, date: NaiveDate) -> Result<u64> {
        let count = GameSessions::find()
            .filter(game_sessions::Column::SessionDate.eq(date))
            .filter(game_sessions::Column::IsCorrect.eq(true))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    /// A player's sessions, newest date first.
    pub async fn sessions_for_player(&self, player_id: PlayerId) -> Result<Vec<PlayerReportEntry>> {
        let sessions = GameSessions::find()
            .filter(game_sessions::Column::PlayerId.eq(player_id))
            .order_by_desc(game_sessions::Column::SessionDate)
            .order_by_desc(game_sessions::Column::Id)
            .all(&self.db)
            .await?;

        Ok(sessions
            .into_iter()
            .map(Self::model_to_report_entry)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::memory_database_with_schema;
    use crate::repositories::{PlayerRepository, WordRepository};

    struct Fixture {
        sessions: SessionRepository,
        players: PlayerRepository,
        word_id: WordId,
    }

    async fn setup_test_db() -> Fixture {
        let db = memory_database_with_schema().await.unwrap();
        let words = WordRepository::new(db.clone());
        words.insert_if_absent("TABLE").await.unwrap();
        let word_id = words.all().await.unwrap()[0].id;

        Fixture {
            sessions: SessionRepository::new(db.clone()),
            players: PlayerRepository::new(db),
            word_id,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_record_progress() {
        let fx = setup_test_db().await;
        let player = fx.players.create_player("alice", "hash", false).await.unwrap();

        let session = fx
            .sessions
            .create_session(player.id, fx.word_id, day(1))
            .await
            .unwrap();
        assert_eq!(session.guesses_count, 0);
        assert!(!session.is_correct);

        fx.sessions.record_progress(session.id, 3, true).await.unwrap();

        let report = fx.sessions.sessions_for_player(player.id).await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].words_tried, 3);
        assert!(report[0].correct_guess);
        assert_eq!(report[0].date, "2024-04-01");

        // Progress alone never touches the daily counter
        let stored = fx.players.find_by_id(player.id).await.unwrap().unwrap();
        assert_eq!(stored.games_today, 0);
    }

    #[tokio::test]
    async fn test_record_finished_counts_round() {
        let fx = setup_test_db().await;
        let player = fx.players.create_player("alice", "hash", false).await.unwrap();

        for _ in 0..2 {
            let session = fx
                .sessions
                .create_session(player.id, fx.word_id, day(1))
                .await
                .unwrap();
            fx.sessions
                .record_finished(session.id, player.id, 5, false)
                .await
                .unwrap();
        }

        let stored = fx.players.find_by_id(player.id).await.unwrap().unwrap();
        assert_eq!(stored.games_today, 2);

        let report = fx.sessions.sessions_for_player(player.id).await.unwrap();
        assert!(report.iter().all(|entry| entry.words_tried == 5));
    }

    #[tokio::test]
    async fn test_record_finished_rolls_back_on_failure() {
        let fx = setup_test_db().await;
        let player = fx.players.create_player("alice", "hash", false).await.unwrap();
        let session = fx
            .sessions
            .create_session(player.id, fx.word_id, day(1))
            .await
            .unwrap();

        // The counter update finds no row, so the session update is undone
        let missing = player.id + 100;
        assert!(fx
            .sessions
            .record_finished(session.id, missing, 4, true)
            .await
            .is_err());

        let report = fx.sessions.sessions_for_player(player.id).await.unwrap();
        assert_eq!(report[0].words_tried, 0);
        assert!(!report[0].correct_guess);

        let stored = fx.players.find_by_id(player.id).await.unwrap().unwrap();
        assert_eq!(stored.games_today, 0);
    }

    #[tokio::test]
    async fn test_daily_aggregates() {
        let fx = setup_test_db().await;
        let alice = fx.players.create_player("alice", "hash", false).await.unwrap();
        let bobby = fx.players.create_player("bobby", "hash", false).await.unwrap();

        // Alice plays twice on day 1 (one win), Bobby once on day 1 (win) and once on day 2
        let a1 = fx.sessions.create_session(alice.id, fx.word_id, day(1)).await.unwrap();
        fx.sessions.create_session(alice.id, fx.word_id, day(1)).await.unwrap();
        let b1 = fx.sessions.create_session(bobby.id, fx.word_id, day(1)).await.unwrap();
        fx.sessions.create_session(bobby.id, fx.word_id, day(2)).await.unwrap();

        fx.sessions.record_progress(a1.id, 2, true).await.unwrap();
        fx.sessions.record_progress(b1.id, 5, true).await.unwrap();

        assert_eq!(fx.sessions.count_players_on(day(1)).await.unwrap(), 2);
        assert_eq!(fx.sessions.count_correct_on(day(1)).await.unwrap(), 2);

        assert_eq!(fx.sessions.count_players_on(day(2)).await.unwrap(), 1);
        assert_eq!(fx.sessions.count_correct_on(day(2)).await.unwrap(), 0);

        assert_eq!(fx.sessions.count_players_on(day(3)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sessions_for_player_newest_first() {
        let fx = setup_test_db().await;
        let alice = fx.players.create_player("alice", "hash", false).await.unwrap();
        let bobby = fx.players.create_player("bobby", "hash", false).await.unwrap();

        let older = fx.sessions.create_session(alice.id, fx.word_id, day(1)).await.unwrap();
        let newer = fx.sessions.create_session(alice.id, fx.word_id, day(3)).await.unwrap();
        fx.sessions.create_session(bobby.id, fx.word_id, day(2)).await.unwrap();

        fx.sessions.record_progress(older.id, 5, false).await.unwrap();
        fx.sessions.record_progress(newer.id, 1, true).await.unwrap();

        let report = fx.sessions.sessions_for_player(alice.id).await.unwrap();
        assert_eq!(report.len(), 2);

        assert_eq!(report[0].date, "2024-04-03");
        assert_eq!(report[0].words_tried, 1);
        assert!(report[0].correct_guess);

        assert_eq!(report[1].date, "2024-04-01");
        assert_eq!(report[1].words_tried, 5);
        assert!(!report[1].correct_guess);
    }
}
