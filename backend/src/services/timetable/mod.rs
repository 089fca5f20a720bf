//! # Timetable Service Module
//!
//! Routes under `/api/timetable`:
//!
//! *   **`GET /`** (`get::process`): returns the current `TimetableMetadata`
//!     as JSON, or `404` when nothing has been published yet.
//!
//! *   **`POST /upload`** (`upload::process`): requires an admin bearer token
//!     and a multipart `file` part declared as `application/pdf`. The file is
//!     checked for the PDF signature, stored under its MD5 digest, and the
//!     new metadata is returned.

mod get;
mod upload;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/timetable";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::process))
        .route("/upload", post().to(upload::process))
}
