mod common;

use common::*;
use game_core::{DailyPlay, GuessEvaluator, RoundOutcome, RoundPolicy, pick_uniform};
use game_types::GameError;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_round_creation() {
    let round = create_round_with_word("table");
    assert_eq!(round.target(), "TABLE");
    assert_eq!(round.guesses_left(), 5);
    assert_eq!(round.started_on(), test_date());
}

#[test]
fn test_vocabulary() {
    let vocabulary = create_test_vocabulary();
    let words = vocabulary.words();
    assert!(words.iter().any(|w| w == "TABLE"));
    assert!(words.iter().any(|w| w == "OCEAN"));
    assert!(!words.iter().any(|w| w == "INVALID"));
}

#[test]
fn test_full_winning_round() {
    let mut round = create_round_with_word("TABLE");
    let outcome = play_guesses(&mut round, &["OCEAN", "BLEAT", "TABLE"]);

    assert_eq!(outcome, RoundOutcome::Won { guesses_used: 3 });
    assert_eq!(colors_of(&round, 1), colors_from("OOOOO"));
    assert_eq!(colors_of(&round, 2), colors_from("GGGGG"));
}

#[test]
fn test_full_losing_round_reveals_word() {
    let mut round = create_round_with_word("OCEAN");
    let outcome = play_guesses(&mut round, &["APPLE", "TABLE", "LEMON", "PLANT", "RIVER"]);

    match &outcome {
        RoundOutcome::Lost { target } => assert_eq!(target, "OCEAN"),
        other => panic!("Expected a loss, got {:?}", other),
    }
    assert!(outcome.message().unwrap().ends_with("The word was OCEAN."));
}

#[test]
fn test_duplicate_letter_rows_in_a_round() {
    let mut round = create_round_with_word("ALLOY");
    play_guesses(&mut round, &["LLAMA"]);
    assert_eq!(colors_of(&round, 0), colors_from("OGOXX"));

    let mut round = create_round_with_word("LEMON");
    play_guesses(&mut round, &["NOONE"]);
    assert_eq!(colors_of(&round, 0), colors_from("OOXXO"));
}

#[test]
fn test_evaluator_matches_round_history() {
    let mut round = create_round_with_word("LEMON");
    play_guesses(&mut round, &["melon"]);

    let direct = GuessEvaluator::evaluate("MELON", "LEMON").unwrap();
    assert_eq!(round.history()[0].result, direct);
}

#[test]
fn test_daily_allowance_across_rounds() {
    let policy = RoundPolicy::default();
    let mut play = DailyPlay::new(0, None);
    play.roll_over(test_date());

    for _ in 0..policy.max_rounds_per_day {
        play.ensure_can_start(&policy).unwrap();
        let mut round = create_round_with_word("TABLE");
        let outcome = play_guesses(&mut round, &["TABLE"]);
        assert!(outcome.is_finished());
        play.games_today += 1;
    }

    assert!(matches!(
        play.ensure_can_start(&policy),
        Err(GameError::DailyLimitExceeded { limit: 3 })
    ));
}

#[test]
fn test_seeded_word_pick_is_reproducible() {
    let vocabulary = create_test_vocabulary();

    let mut first = StdRng::seed_from_u64(99);
    let mut second = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        assert_eq!(
            pick_uniform(vocabulary.words(), &mut first),
            pick_uniform(vocabulary.words(), &mut second)
        );
    }
}
