use crate::error::BackendError;
use crate::state::AppState;
use actix_web::{web, HttpResponse};

const NOTHING_PUBLISHED: &str = "No timetable has been published yet.";

/// Handler for `GET /api/timetable`.
pub async fn process(state: web::Data<AppState>) -> Result<HttpResponse, BackendError> {
    let metadata = state
        .store
        .current()?
        .ok_or_else(|| BackendError::NotFound(NOTHING_PUBLISHED.to_string()))?;
    Ok(HttpResponse::Ok().json(metadata))
}
