use chrono::NaiveDate;
use game_types::{GameError, GuessRecord, GuessResponse, RoundStarted, SessionId};

use crate::evaluator::GuessEvaluator;
use crate::vocabulary::{WORD_LENGTH, normalize_word};

pub const MAX_GUESSES_PER_ROUND: u32 = 5;
pub const MAX_ROUNDS_PER_DAY: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundPolicy {
    pub max_guesses: u32,
    pub max_rounds_per_day: u32,
}

impl Default for RoundPolicy {
    fn default() -> Self {
        Self {
            max_guesses: MAX_GUESSES_PER_ROUND,
            max_rounds_per_day: MAX_ROUNDS_PER_DAY,
        }
    }
}

/// Result of applying one guess to a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    InProgress { guesses_left: u32 },
    Won { guesses_used: u32 },
    Lost { target: String },
}

impl RoundOutcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, RoundOutcome::InProgress { .. })
    }

    pub fn is_win(&self) -> bool {
        matches!(self, RoundOutcome::Won { .. })
    }

    pub fn message(&self) -> Option<String> {
        match self {
            RoundOutcome::InProgress { .. } => None,
            RoundOutcome::Won { .. } => Some("Congratulations, you won!".to_string()),
            RoundOutcome::Lost { target } => {
                Some(format!("Better luck next time! The word was {}.", target))
            }
        }
    }
}

/// A single attempt at one target word. Lives only while the round is in
/// progress; the owner drops it once an outcome is finished.
#[derive(Debug, Clone)]
pub struct ActiveRound {
    session_id: SessionId,
    target: String, // Hidden from clients until the round is lost
    history: Vec<GuessRecord>,
    guesses_made: u32,
    max_guesses: u32,
    started_on: NaiveDate,
}

impl ActiveRound {
    pub fn new(
        session_id: SessionId,
        target: &str,
        started_on: NaiveDate,
        policy: &RoundPolicy,
    ) -> Self {
        Self {
            session_id,
            target: normalize_word(target),
            history: Vec::new(),
            guesses_made: 0,
            max_guesses: policy.max_guesses,
            started_on,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    pub fn guesses_made(&self) -> u32 {
        self.guesses_made
    }

    pub fn guesses_left(&self) -> u32 {
        self.max_guesses.saturating_sub(self.guesses_made)
    }

    pub fn started_on(&self) -> NaiveDate {
        self.started_on
    }

    /// Evaluate and record a guess. A rejected guess leaves the round untouched.
    pub fn submit_guess(&mut self, guess_text: &str) -> Result<RoundOutcome, GameError> {
        let guess = normalize_word(guess_text);
        let length = guess.chars().count();
        if length != WORD_LENGTH {
            return Err(GameError::InvalidGuessLength {
                expected: WORD_LENGTH as u32,
                actual: length as u32,
            });
        }

        let result = GuessEvaluator::evaluate(&guess, &self.target)?;
        let won = GuessEvaluator::is_exact_match(&guess, &self.target);

        self.history.push(GuessRecord { guess, result });
        self.guesses_made += 1;

        let outcome = if won {
            RoundOutcome::Won {
                guesses_used: self.guesses_made,
            }
        } else if self.guesses_made >= self.max_guesses {
            RoundOutcome::Lost {
                target: self.target.clone(),
            }
        } else {
            RoundOutcome::InProgress {
                guesses_left: self.guesses_left(),
            }
        };

        Ok(outcome)
    }

    pub fn started_view(&self, resumed: bool) -> RoundStarted {
        RoundStarted {
            guess_history: self.history.clone(),
            guesses_left: self.guesses_left(),
            word_length: self.target.chars().count() as u32,
            resumed,
        }
    }

    pub fn guess_response(&self, outcome: &RoundOutcome) -> GuessResponse {
        let game_over = outcome.is_finished().then_some(true);
        GuessResponse {
            guess_history: self.history.clone(),
            guesses_left: self.guesses_left(),
            game_over,
            message: outcome.message(),
        }
    }
}
