use chrono::NaiveDate;
use game_types::GameError;

use crate::round::RoundPolicy;

/// How many rounds a player has finished on their last played date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyPlay {
    pub games_today: u32,
    pub last_played_date: Option<NaiveDate>,
}

impl DailyPlay {
    pub fn new(games_today: u32, last_played_date: Option<NaiveDate>) -> Self {
        Self {
            games_today,
            last_played_date,
        }
    }

    /// Reset the counter when `today` is a different date from the last
    /// recorded one. Returns true if anything changed and needs saving.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.last_played_date == Some(today) {
            return false;
        }

        self.last_played_date = Some(today);
        self.games_today = 0;
        true
    }

    pub fn ensure_can_start(&self, policy: &RoundPolicy) -> Result<(), GameError> {
        if self.games_today >= policy.max_rounds_per_day {
            return Err(GameError::DailyLimitExceeded {
                limit: policy.max_rounds_per_day,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_roll_over_on_new_day() {
        let mut play = DailyPlay::new(3, Some(date(1)));

        assert!(play.roll_over(date(2)));
        assert_eq!(play.games_today, 0);
        assert_eq!(play.last_played_date, Some(date(2)));
    }

    #[test]
    fn test_no_roll_over_on_same_day() {
        let mut play = DailyPlay::new(2, Some(date(1)));

        assert!(!play.roll_over(date(1)));
        assert_eq!(play.games_today, 2);
    }

    #[test]
    fn test_first_ever_access_sets_date() {
        let mut play = DailyPlay::new(0, None);

        assert!(play.roll_over(date(3)));
        assert_eq!(play.last_played_date, Some(date(3)));
    }

    #[test]
    fn test_limit_enforced() {
        let policy = RoundPolicy::default();

        for games_today in 0..3 {
            let play = DailyPlay::new(games_today, Some(date(1)));
            assert!(play.ensure_can_start(&policy).is_ok());
        }

        let mut play = DailyPlay::new(3, Some(date(1)));
        assert_eq!(
            play.ensure_can_start(&policy),
            Err(GameError::DailyLimitExceeded { limit: 3 })
        );

        play.roll_over(date(2));
        assert!(play.ensure_can_start(&policy).is_ok());
    }
}
