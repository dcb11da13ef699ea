use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::services::users;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

fn message(text: &str) -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: text.to_string(),
    })
}

/// Public summary of the current round; no token required.
async fn summary(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.engine.summary()))
}

async fn join(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.engine.join(&user.username)?;
    Ok(message("You've joined the round"))
}

#[derive(Debug, Deserialize)]
struct PickRequest {
    pick: i64,
}

async fn pick(
    user: CurrentUser,
    req: web::Json<PickRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.engine.submit_pick(&user.username, req.pick)?;
    Ok(message("Pick recorded"))
}

async fn leave(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.engine.leave(&user.username)?;
    Ok(message("You've left the round"))
}

async fn status(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.engine.status_for(&user.username)))
}

/// Results of the round currently open; the winning number is null
/// until the round closes.
async fn results(
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let results = app_state.engine.current_results()?;
    Ok(HttpResponse::Ok().json(results))
}

/// Results of the most recently resolved round, available across the
/// cooldown window.
async fn completed_results(
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let results = app_state.engine.completed_results()?;
    Ok(HttpResponse::Ok().json(results))
}

#[derive(Debug, Serialize)]
struct LeaderboardEntry {
    username: String,
    wins: i64,
}

#[derive(Debug, Serialize)]
struct LeaderboardResponse {
    leaderboard: Vec<LeaderboardEntry>,
}

async fn leaderboard(
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let entries = users::leaderboard(db, 10)
        .await?
        .into_iter()
        .map(|u| LeaderboardEntry {
            username: u.username,
            wins: u.wins,
        })
        .collect();
    Ok(HttpResponse::Ok().json(LeaderboardResponse {
        leaderboard: entries,
    }))
}

pub fn configure_scope(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(summary)))
        .service(web::resource("/join").route(web::post().to(join)))
        .service(web::resource("/pick").route(web::post().to(pick)))
        .service(web::resource("/leave").route(web::post().to(leave)))
        .service(web::resource("/status").route(web::get().to(status)))
        .service(web::resource("/results").route(web::get().to(results)))
        .service(web::resource("/completed-results").route(web::get().to(completed_results)))
        .service(web::resource("/leaderboard").route(web::get().to(leaderboard)));
}
