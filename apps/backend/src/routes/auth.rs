use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::services::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialRequest {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct CredentialResponse {
    pub token: String,
    pub username: String,
    pub message: String,
}

fn validated_username(req: &CredentialRequest) -> Result<&str, AppError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::invalid(
            "MISSING_USERNAME",
            "Username is required".to_string(),
        ));
    }
    Ok(username)
}

/// Create a user and hand back a bearer token for it.
async fn register(
    req: web::Json<CredentialRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let username = validated_username(&req)?;
    let db = app_state.require_db()?;

    let user = users::register_user(db, username).await?;
    let token = mint_access_token(&user.username, SystemTime::now(), &app_state.security)?;

    Ok(HttpResponse::Ok().json(CredentialResponse {
        token,
        username: user.username,
        message: "Registration successful!".to_string(),
    }))
}

/// Re-issue a bearer token for an existing user.
async fn login(
    req: web::Json<CredentialRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let username = validated_username(&req)?;
    let db = app_state.require_db()?;

    let user = users::find_user(db, username)
        .await?
        .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", "User not found".to_string()))?;
    let token = mint_access_token(&user.username, SystemTime::now(), &app_state.security)?;

    Ok(HttpResponse::Ok().json(CredentialResponse {
        token,
        username: user.username,
        message: "Login successful!".to_string(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/login").route(web::post().to(login)));
}
