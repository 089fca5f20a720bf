use crate::error::BackendError;
use crate::services::admin::require_admin;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use common::error::INVALID_FILE_TYPE;
use common::model::upload::PDF_MEDIA_TYPE;
use futures_util::StreamExt;
use log::warn;

/// Every PDF document starts with this signature.
const PDF_MAGIC: &[u8] = b"%PDF-";
const MISSING_FILE: &str = "Please select a PDF file to upload.";
const DEFAULT_FILE_NAME: &str = "timetable.pdf";

struct ReceivedFile {
    file_name: String,
    bytes: Vec<u8>,
}

/// Handler for `POST /api/timetable/upload`.
///
/// - `401` without a live admin token.
/// - `422` when the `file` part is missing, not declared as PDF, lacks the
///   PDF signature, or exceeds `max_upload_bytes`. Nothing is stored then.
/// - `200` with the new `TimetableMetadata` otherwise.
pub async fn process(
    req: HttpRequest,
    payload: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, BackendError> {
    require_admin(&req, &state).await?;

    let file = match receive_pdf(payload, state.config.max_upload_bytes).await {
        Ok(file) => file,
        Err(e) => {
            warn!("Rejected timetable upload: {}", e);
            return Err(e);
        }
    };
    let metadata = state.store.publish(&file.file_name, &file.bytes).await?;
    Ok(HttpResponse::Ok().json(metadata))
}

/// Reads the `file` part of the form, skipping any other field.
async fn receive_pdf(mut payload: Multipart, max_bytes: usize) -> Result<ReceivedFile, BackendError> {
    while let Some(item) = payload.next().await {
        let mut field = item?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if field_name.as_deref() != Some("file") {
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        let declared_pdf = field
            .content_type()
            .map(|mime| mime.essence_str() == PDF_MEDIA_TYPE)
            .unwrap_or(false);
        if !declared_pdf {
            return Err(BackendError::Validation(INVALID_FILE_TYPE.to_string()));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(BackendError::Validation(format!(
                    "The file is too large (limit {} KiB).",
                    max_bytes / 1024
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        if !bytes.starts_with(PDF_MAGIC) {
            return Err(BackendError::Validation(INVALID_FILE_TYPE.to_string()));
        }
        return Ok(ReceivedFile { file_name, bytes });
    }

    Err(BackendError::Validation(MISSING_FILE.to_string()))
}
