
use std::time::Duration;

use game_server::auth::{AuthError, AuthService};
use game_server::error::ApiError;
use game_types::GameError;
use test_helpers::{PASSWORD, TestGameServerSetup, game_error, test_date};

#[tokio::test]
async fn test_login_token_identifies_player() {
    let setup = TestGameServerSetup::with_words(&["TABLE"]).await;
    let alice = setup.register("alice").await;

    let login = setup.accounts.login("alice", PASSWORD).await.unwrap();
    assert_eq!(login.player.id, alice);
    assert_eq!(login.player.games_today, 0);
    assert_eq!(
        login.player.last_played_date,
        Some(test_date().to_string())
    );

    // Tokens from another secret are useless here
    let other = AuthService::new("other-secret", Duration::from_secs(600));
    assert!(matches!(
        other.validate_token(&login.token),
        Err(AuthError::InvalidToken)
    ));
}

#[tokio::test]
async fn test_login_resets_counter_on_new_day() {
    let setup = TestGameServerSetup::with_words(&["TABLE"]).await;
    let alice = setup.register("alice").await;

    for _ in 0..3 {
        setup.win_round(alice, "TABLE").await;
    }
    let login = setup.accounts.login("alice", PASSWORD).await.unwrap();
    assert_eq!(login.player.games_today, 3);

    setup.clock.advance_days(1);

    let login = setup.accounts.login("alice", PASSWORD).await.unwrap();
    assert_eq!(login.player.games_today, 0);
    assert_eq!(
        login.player.last_played_date,
        test_date().succ_opt().map(|date| date.to_string())
    );

    // The reset is stored, not only reported
    assert_eq!(setup.games_today(alice).await, 0);
}

#[tokio::test]
async fn test_password_policy_on_register() {
    let setup = TestGameServerSetup::with_words(&["TABLE"]).await;

    for weak in ["a1$", "abcdef$", "123456$", "abc123", "abc123!"] {
        let err = setup.accounts.register("alice", weak).await.unwrap_err();
        assert_eq!(
            game_error(err),
            GameError::PasswordPolicyViolation,
            "accepted weak password {}",
            weak
        );
    }

    assert_eq!(setup.players.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_stored_password_is_hashed() {
    let setup = TestGameServerSetup::with_words(&["TABLE"]).await;
    setup.register("alice").await;

    let stored = setup
        .players
        .find_by_username("alice")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, PASSWORD);
    assert!(stored.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_daily_report_requires_admin() {
    let setup = TestGameServerSetup::with_words(&["TABLE"]).await;
    let alice = setup.register("alice").await;

    let err = setup.reports.daily_report(alice, None).await.unwrap_err();
    assert_eq!(game_error(err), GameError::AccessDenied);

    let err = setup.reports.player_report(alice, alice).await.unwrap_err();
    assert_eq!(game_error(err), GameError::AccessDenied);
}

#[tokio::test]
async fn test_unknown_requester_rejected() {
    let setup = TestGameServerSetup::with_words(&["TABLE"]).await;

    let err = setup.reports.daily_report(77, None).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Game(GameError::AuthenticationRequired)
    ));
}

#[tokio::test]
async fn test_daily_report_counts() {
    let setup = TestGameServerSetup::with_words(&["TABLE"]).await;
    let admin = setup.register_admin().await;
    let alice = setup.register("alice").await;
    let bobby = setup.register("bobby").await;

    // Alice wins twice, Bobby abandons a round
    setup.win_round(alice, "TABLE").await;
    setup.win_round(alice, "TABLE").await;
    setup.game_manager.start_round(bobby).await.unwrap();

    let report = setup.reports.daily_report(admin, None).await.unwrap();
    assert_eq!(report.date, test_date().to_string());
    assert_eq!(report.total_players, 2);
    assert_eq!(report.correct_guesses, 2);

    let yesterday = test_date().pred_opt();
    let empty = setup.reports.daily_report(admin, yesterday).await.unwrap();
    assert_eq!(empty.total_players, 0);
    assert_eq!(empty.correct_guesses, 0);
}

#[tokio::test]
async fn test_player_report_newest_first() {
    let setup = TestGameServerSetup::with_words(&["TABLE"]).await;
    let admin = setup.register_admin().await;
    let alice = setup.register("alice").await;

    setup.win_round(alice, "TABLE").await;
    setup.clock.advance_days(1);
    setup.game_manager.start_round(alice).await.unwrap();
    setup
        .game_manager
        .submit_guess(alice, "PLANT")
        .await
        .unwrap();

    let report = setup.reports.player_report(admin, alice).await.unwrap();
    assert_eq!(report.username, "alice");
    assert_eq!(report.report.len(), 2);

    assert_eq!(report.report[0].date, "2024-06-02");
    assert_eq!(report.report[0].words_tried, 1);
    assert!(!report.report[0].correct_guess);

    assert_eq!(report.report[1].date, "2024-06-01");
    assert!(report.report[1].correct_guess);

    let err = setup.reports.player_report(admin, 999).await.unwrap_err();
    assert_eq!(game_error(err), GameError::PlayerNotFound { player_id: 999 });
}
