use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use chrono::NaiveDate;
use game_core::{ActiveRound, Clock, DailyPlay, RoundPolicy, SystemClock, pick_uniform};
use game_persistence::DatabaseConnection;
use game_persistence::entities::{guess_words, players};
use game_persistence::repositories::{PlayerRepository, SessionRepository, WordRepository};
use game_types::{GameError, GuessResponse, PlayerId, RoundStarted};

use crate::error::ApiError;

/// Reset the daily counter on the first access of a new date.
pub(crate) async fn roll_over_daily_play(
    players: &PlayerRepository,
    mut player: players::Model,
    today: NaiveDate,
) -> Result<players::Model, ApiError> {
    let mut play = DailyPlay::new(player.games_today.max(0) as u32, player.last_played_date);
    if play.roll_over(today) {
        players
            .update_daily_play(player.id, play.games_today, today)
            .await?;
        debug!("Reset daily counter for player {} on {}", player.id, today);

        player.games_today = play.games_today as i32;
        player.last_played_date = play.last_played_date;
    }

    Ok(player)
}

/// One player's round slot. Holding the lock serializes that player's requests.
type RoundSlot = Arc<tokio::sync::Mutex<Option<ActiveRound>>>;

pub struct GameManager {
    players: PlayerRepository,
    words: WordRepository,
    sessions: SessionRepository,
    rounds: DashMap<PlayerId, RoundSlot>,
    rng: Mutex<StdRng>,
    clock: Arc<dyn Clock>,
    policy: RoundPolicy,
}

impl GameManager {
    pub fn new(db: DatabaseConnection, policy: RoundPolicy) -> Self {
        Self {
            players: PlayerRepository::new(db.clone()),
            words: WordRepository::new(db.clone()),
            sessions: SessionRepository::new(db),
            rounds: DashMap::new(),
            rng: Mutex::new(StdRng::from_os_rng()),
            clock: Arc::new(SystemClock),
            policy,
        }
    }

    /// Deterministic word selection.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn slot(&self, player_id: PlayerId) -> RoundSlot {
        self.rounds.entry(player_id).or_default().clone()
    }

    /// Load a player with the daily counter rolled over to today.
    pub async fn current_player(&self, player_id: PlayerId) -> Result<players::Model, ApiError> {
        let player = self
            .players
            .find_by_id(player_id)
            .await?
            .ok_or(GameError::PlayerNotFound { player_id })?;

        roll_over_daily_play(&self.players, player, self.clock.today()).await
    }

    pub async fn start_round(&self, player_id: PlayerId) -> Result<RoundStarted, ApiError> {
        let slot = self.slot(player_id);
        let mut active = slot.lock().await;

        let player = self.current_player(player_id).await?;
        let today = self.clock.today();

        if let Some(round) = active.as_ref() {
            if round.started_on() == today {
                debug!("Player {} resumed session {}", player_id, round.session_id());
                return Ok(round.started_view(true));
            }
            info!(
                "Discarding unfinished session {} from {} for player {}",
                round.session_id(),
                round.started_on(),
                player_id
            );
            *active = None;
        }

        DailyPlay::new(player.games_today.max(0) as u32, player.last_played_date)
            .ensure_can_start(&self.policy)?;

        let word = self.pick_word().await?;
        let session = self
            .sessions
            .create_session(player_id, word.id, today)
            .await?;

        let round = ActiveRound::new(session.id, &word.word_text, today, &self.policy);
        let view = round.started_view(false);
        *active = Some(round);

        info!(
            "Player {} started session {} ({} of {} today)",
            player_id,
            session.id,
            player.games_today + 1,
            self.policy.max_rounds_per_day
        );
        Ok(view)
    }

    pub async fn submit_guess(
        &self,
        player_id: PlayerId,
        guess: &str,
    ) -> Result<GuessResponse, ApiError> {
        let slot = self.slot(player_id);
        let mut active = slot.lock().await;

        let Some(current) = active.as_ref() else {
            return Err(GameError::NoActiveRound.into());
        };

        // A round left over from an earlier date can no longer be played
        if current.started_on() != self.clock.today() {
            info!(
                "Dropping stale session {} for player {}",
                current.session_id(),
                player_id
            );
            *active = None;
            return Err(GameError::NoActiveRound.into());
        }

        // Work on a copy so a failed write leaves the stored round untouched
        let mut round = current.clone();
        let outcome = round.submit_guess(guess)?;
        debug!(
            "Player {} guess {} in session {}: {:?}",
            player_id,
            round.guesses_made(),
            round.session_id(),
            outcome
        );

        if outcome.is_finished() {
            self.sessions
                .record_finished(
                    round.session_id(),
                    player_id,
                    round.guesses_made(),
                    outcome.is_win(),
                )
                .await?;
        } else {
            self.sessions
                .record_progress(round.session_id(), round.guesses_made(), outcome.is_win())
                .await?;
        }

        let response = round.guess_response(&outcome);

        if outcome.is_finished() {
            info!(
                "Player {} finished session {} ({})",
                player_id,
                round.session_id(),
                if outcome.is_win() { "won" } else { "lost" }
            );
            *active = None;
        } else {
            *active = Some(round);
        }

        Ok(response)
    }

    pub async fn has_active_round(&self, player_id: PlayerId) -> bool {
        let slot = self.rounds.get(&player_id).map(|entry| entry.value().clone());
        match slot {
            Some(slot) => slot.lock().await.is_some(),
            None => false,
        }
    }

    async fn pick_word(&self) -> Result<guess_words::Model, ApiError> {
        let words = self.words.all().await?;

        let picked = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            pick_uniform(&words, &mut *rng).cloned()
        };

        Ok(picked.ok_or(GameError::EmptyVocabulary)?)
    }
}
