#![allow(dead_code)]

use chrono::NaiveDate;
use game_core::{ActiveRound, RoundOutcome, RoundPolicy, Vocabulary};
use game_types::LetterColor;

/// Creates a vocabulary with a known set of words
pub fn create_test_vocabulary() -> Vocabulary {
    let word_list = "apple\ntable\nocean\nlemon\nalloy\nllama\nnoone\nplant\nriver\nsnake";
    Vocabulary::from_word_list(word_list)
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Creates a round with a specific target word and default policy
pub fn create_round_with_word(word: &str) -> ActiveRound {
    ActiveRound::new(1, word, test_date(), &RoundPolicy::default())
}

/// Submits every guess in order and returns the last outcome
pub fn play_guesses(round: &mut ActiveRound, guesses: &[&str]) -> RoundOutcome {
    let mut last = None;
    for guess in guesses {
        last = Some(round.submit_guess(guess).expect("guess should be accepted"));
    }
    last.expect("at least one guess")
}

/// Shorthand for a row of colors, e.g. "GO-XX" style strings: G green, O orange, X grey
pub fn colors_from(pattern: &str) -> Vec<LetterColor> {
    pattern
        .chars()
        .map(|c| match c {
            'G' => LetterColor::Green,
            'O' => LetterColor::Orange,
            _ => LetterColor::Grey,
        })
        .collect()
}

pub fn colors_of(round: &ActiveRound, index: usize) -> Vec<LetterColor> {
    round.history()[index]
        .result
        .iter()
        .map(|l| l.color)
        .collect()
}
