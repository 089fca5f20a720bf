use crate::error::BackendError;
use crate::session_controller::state::password_matches;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::error::INCORRECT_PASSWORD;
use common::requests::{LoginRequest, LoginResponse};
use log::{info, warn};

/// Handler for `POST /api/admin/login`.
pub async fn process(
    payload: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, BackendError> {
    if !password_matches(&payload.password, &state.config.admin_password) {
        warn!("Rejected admin login attempt");
        return Err(BackendError::Unauthorized(INCORRECT_PASSWORD.to_string()));
    }

    let token = state.sessions.issue().await;
    info!("Admin logged in");
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}
