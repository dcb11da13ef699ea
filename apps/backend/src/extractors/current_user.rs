//! Bearer-token extractor for authenticated routes.
//!
//! Verification is purely cryptographic (no store lookup), so the
//! extractor is synchronous: parse the `Authorization` header, verify
//! the JWT against the configured secret, and expose the player
//! identity from the `sub` claim.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// The authenticated player, as asserted by the bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available".to_string()))?;

    let token = bearer_token(req)?;
    let claims = verify_access_token(token, &app_state.security)?;
    Ok(CurrentUser {
        username: claims.sub,
    })
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::unauthorized_missing_bearer)?;
    let raw = header_value
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;
    raw.strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::unauthorized_missing_bearer)
}
