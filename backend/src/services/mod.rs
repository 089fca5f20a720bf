//! HTTP surface of the backend.
//!
//! - `timetable`: metadata retrieval and PDF upload under `/api/timetable`.
//! - `admin`: login/logout under `/api/admin`.
//!
//! Stored PDFs are served as static files under `/files`.

pub mod admin;
pub mod timetable;

use crate::state::AppState;
use crate::storage::FILES_ROUTE;
use actix_web::web;

/// Registers shared state and every API route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.clone()))
        .service(timetable::configure_routes())
        .service(admin::configure_routes())
        .service(actix_files::Files::new(
            FILES_ROUTE,
            state.store.files_dir().to_path_buf(),
        ));
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::BackendConfig;
    use crate::state::AppState;
    use crate::storage::TimetableStore;
    use tempfile::TempDir;

    pub const TEST_PASSWORD: &str = "correct horse";
    pub const BOUNDARY: &str = "timetable-test-boundary";

    /// App state over a fresh temporary data directory. Keep the `TempDir`
    /// alive for the duration of the test.
    pub fn state() -> (AppState, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = BackendConfig {
            data_dir: dir.path().to_path_buf(),
            admin_password: TEST_PASSWORD.to_string(),
            max_upload_bytes: 1024,
            open_browser: false,
            ..BackendConfig::default()
        };
        let store = TimetableStore::open(&config.data_dir).unwrap();
        (AppState::new(config, store), dir)
    }

    /// A single-part `multipart/form-data` body carrying a `file` field.
    pub fn multipart_file(file_name: &str, content_type: &str, bytes: &[u8]) -> (String, Vec<u8>) {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={BOUNDARY}"), body)
    }
}
