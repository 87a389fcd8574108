use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use game_core::{Clock, SystemClock, Vocabulary};
use game_persistence::{connection::connect_and_migrate, repositories::WordRepository};
use game_server::{
    accounts::AccountService, auth::AuthService, config::Config, create_routes,
    game_manager::GameManager, reports::ReportService,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Word Guesser server...");

    let config = Config::new();

    // Initialize database connection and run migrations
    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    // Seed the vocabulary on first start
    let vocabulary = match &config.words_file {
        Some(path) => {
            info!("Loading words from file: {}", path);
            match Vocabulary::from_file(path) {
                Ok(vocabulary) => vocabulary,
                Err(e) => {
                    tracing::error!("Failed to load words from '{}': {:#}", path, e);
                    std::process::exit(1);
                }
            }
        }
        None => Vocabulary::default_words(),
    };
    if let Err(e) = WordRepository::new(db.clone())
        .seed_if_empty(vocabulary.words())
        .await
    {
        tracing::error!("Failed to seed words: {:#}", e);
        std::process::exit(1);
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let auth_service = Arc::new(AuthService::new(&config.secret_key, config.session_ttl()));
    let accounts = Arc::new(
        AccountService::new(db.clone(), auth_service.clone()).with_clock(clock.clone()),
    );

    if let Err(e) = accounts
        .ensure_admin(&config.admin_username, &config.admin_password)
        .await
    {
        tracing::error!("Failed to create admin account: {}", e);
        std::process::exit(1);
    }

    let game_manager =
        Arc::new(GameManager::new(db.clone(), config.round_policy()).with_clock(clock.clone()));
    let reports = Arc::new(ReportService::new(db, clock));

    let routes = create_routes(game_manager, accounts, reports, auth_service.clone());

    // Start revocation cleanup task
    let purge_interval = Duration::from_secs(config.revocation_purge_seconds.max(1));
    let cleanup_auth_service = auth_service.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(purge_interval);
        loop {
            interval.tick().await;
            let purged = cleanup_auth_service.purge_expired_revocations();
            if purged > 0 {
                info!("Purged {} expired token revocations", purged);
            }
        }
    });

    info!("Server starting on {}:{}", config.host, config.port);

    let ip = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("Invalid HOST '{}': {}", config.host, e);
            std::process::exit(1);
        }
    };

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown((ip, config.port), async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
