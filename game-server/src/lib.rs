use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;

use crate::accounts::AccountService;
use crate::auth::{AuthService, SessionClaims};
use crate::error::{ApiError, ErrorBody};
use crate::game_manager::GameManager;
use crate::reports::ReportService;
use game_types::{Credentials, GuessRequest, LogoutResponse, RegisterResponse};

pub mod accounts;
pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod game_manager;
pub mod reports;

const MAX_BODY_BYTES: u64 = 16 * 1024;

#[derive(Deserialize)]
struct DailyReportQuery {
    date: Option<NaiveDate>,
}

pub fn create_routes(
    game_manager: Arc<GameManager>,
    accounts: Arc<AccountService>,
    reports: Arc<ReportService>,
    auth_service: Arc<AuthService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // Clone for filters
    let game_manager_filter = warp::any().map({
        let game_manager = game_manager.clone();
        move || game_manager.clone()
    });

    let accounts_filter = warp::any().map({
        let accounts = accounts.clone();
        move || accounts.clone()
    });

    let reports_filter = warp::any().map({
        let reports = reports.clone();
        move || reports.clone()
    });

    let auth_filter = warp::any().map({
        let auth_service = auth_service.clone();
        move || auth_service.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let register = warp::path("register")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(accounts_filter.clone())
        .and_then(handle_register);

    let login = warp::path("login")
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body())
        .and(accounts_filter.clone())
        .and_then(handle_login);

    let logout = warp::path("logout")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter.clone())
        .and(accounts_filter.clone())
        .and_then(handle_logout);

    // Start or resume today's round
    let play = warp::path("play")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter.clone())
        .and(game_manager_filter.clone())
        .and_then(handle_play);

    let submit_guess = warp::path("submit_guess")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(json_body())
        .and(auth_filter.clone())
        .and(game_manager_filter.clone())
        .and_then(handle_submit_guess);

    // Admin reports
    let daily_report = warp::path!("api" / "daily_report")
        .and(warp::get())
        .and(warp::query::<DailyReportQuery>())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter.clone())
        .and(reports_filter.clone())
        .and_then(handle_daily_report);

    let user_report = warp::path!("api" / "user_report" / i32)
        .and(warp::get())
        .and(warp::header::optional::<String>("authorization"))
        .and(auth_filter.clone())
        .and(reports_filter.clone())
        .and_then(handle_user_report);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", "authorization"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(register)
        .or(login)
        .or(logout)
        .or(play)
        .or(submit_guess)
        .or(daily_report)
        .or(user_report)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log("word_guesser"))
}

fn json_body<T: DeserializeOwned + Send>()
-> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

fn json_reply<T: Serialize>(
    result: Result<T, ApiError>,
    status: StatusCode,
) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(body) => warp::reply::with_status(warp::reply::json(&body), status),
        Err(err) => err.to_reply(),
    }
}

fn authenticate(
    auth_service: &AuthService,
    auth_header: Option<String>,
) -> Result<SessionClaims, ApiError> {
    Ok(auth_service.authenticate(auth_header.as_deref())?)
}

async fn handle_register(
    credentials: Credentials,
    accounts: Arc<AccountService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = accounts
        .register(&credentials.username, &credentials.password)
        .await
        .map(|player| RegisterResponse { player });

    Ok(json_reply(result, StatusCode::CREATED))
}

async fn handle_login(
    credentials: Credentials,
    accounts: Arc<AccountService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = accounts
        .login(&credentials.username, &credentials.password)
        .await;

    Ok(json_reply(result, StatusCode::OK))
}

async fn handle_logout(
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
    accounts: Arc<AccountService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = authenticate(&auth_service, auth_header).map(|claims| {
        accounts.logout(&claims);
        LogoutResponse {
            message: "Logged out.".to_string(),
        }
    });

    Ok(json_reply(result, StatusCode::OK))
}

async fn handle_play(
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
    game_manager: Arc<GameManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = match authenticate(&auth_service, auth_header) {
        Ok(claims) => game_manager.start_round(claims.sub).await,
        Err(e) => Err(e),
    };

    Ok(json_reply(result, StatusCode::OK))
}

async fn handle_submit_guess(
    auth_header: Option<String>,
    request: GuessRequest,
    auth_service: Arc<AuthService>,
    game_manager: Arc<GameManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = match authenticate(&auth_service, auth_header) {
        Ok(claims) => game_manager.submit_guess(claims.sub, &request.guess).await,
        Err(e) => Err(e),
    };

    Ok(json_reply(result, StatusCode::OK))
}

async fn handle_daily_report(
    query: DailyReportQuery,
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
    reports: Arc<ReportService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = match authenticate(&auth_service, auth_header) {
        Ok(claims) => reports.daily_report(claims.sub, query.date).await,
        Err(e) => Err(e),
    };

    Ok(json_reply(result, StatusCode::OK))
}

async fn handle_user_report(
    player_id: i32,
    auth_header: Option<String>,
    auth_service: Arc<AuthService>,
    reports: Arc<ReportService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = match authenticate(&auth_service, auth_header) {
        Ok(claims) => reports.player_report(claims.sub, player_id).await,
        Err(e) => Err(e),
    };

    Ok(json_reply(result, StatusCode::OK))
}

/// Render warp's own rejections in the same JSON shape as domain errors.
async fn handle_rejection(
    err: warp::Rejection,
) -> Result<warp::reply::WithStatus<warp::reply::Json>, Infallible> {
    let (status, kind, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "NotFound", "Not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, "MalformedRequest", e.to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, "MalformedRequest", e.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "PayloadTooLarge",
            "Request body too large".to_string(),
        )
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "UnsupportedMediaType",
            "Expected a JSON body".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "MethodNotAllowed",
            "Method not allowed".to_string(),
        )
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal",
            "Internal server error".to_string(),
        )
    };

    let body = ErrorBody {
        error: message,
        kind: kind.to_string(),
    };
    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}
