mod config;
mod error;
mod services;
mod session_controller;
mod state;
mod storage;

use crate::config::BackendConfig;
use crate::state::AppState;
use crate::storage::TimetableStore;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

fn to_io_error(e: error::BackendError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = BackendConfig::load().map_err(|e| {
        error!("Could not load configuration: {}", e);
        to_io_error(e)
    })?;
    let store = TimetableStore::open(&config.data_dir).map_err(to_io_error)?;
    match store.current() {
        Ok(Some(metadata)) => info!(
            "Serving timetable {} (updated {})",
            metadata.file_location, metadata.last_updated
        ),
        Ok(None) => info!("No timetable published yet"),
        Err(e) => error!("Could not read timetable metadata: {}", e),
    }

    let url = config.url();
    if config.open_browser {
        let _url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&_url_clone);
        });
    }

    let bind = (config.host.clone(), config.port);
    let app_state = AppState::new(config, store);

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(64 * 1024))
            .configure(|cfg| services::configure(cfg, &app_state))
            .default_service(web::route().to(serve_embedded))
    })
        .bind(bind)?
        .run()
        .await
}
