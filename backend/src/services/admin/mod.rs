//! # Admin Service Module
//!
//! Routes under `/api/admin`:
//!
//! *   **`POST /login`** (`login::process`): checks the JSON `password`
//!     against the configured secret and returns a bearer token.
//! *   **`POST /logout`** (`logout::process`): revokes the bearer token.
//!
//! `require_admin` is the guard used by handlers that need a logged-in
//! administrator.

mod login;
mod logout;

use crate::error::BackendError;
use crate::state::AppState;
use actix_web::http::header;
use actix_web::web::{post, scope};
use actix_web::{HttpRequest, Scope};

const API_PATH: &str = "/api/admin";
const LOGIN_REQUIRED: &str = "Admin login required.";
const SESSION_EXPIRED: &str = "Admin session expired. Please log in again.";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/login", post().to(login::process))
        .route("/logout", post().to(logout::process))
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Fails with `Unauthorized` unless the request carries a live admin token.
pub(crate) async fn require_admin(req: &HttpRequest, state: &AppState) -> Result<(), BackendError> {
    let token =
        bearer_token(req).ok_or_else(|| BackendError::Unauthorized(LOGIN_REQUIRED.to_string()))?;
    if state.sessions.is_valid(token).await {
        Ok(())
    } else {
        Err(BackendError::Unauthorized(SESSION_EXPIRED.to_string()))
    }
}
