//! HTTP implementation of the timetable collaborator, talking to the backend
//! on the same origin.
//!
//! Status codes map onto the shared error taxonomy: `401` is an auth failure,
//! `400`/`413`/`422` are validation failures, and everything else (including
//! a request that never got an answer) is transient.

use async_trait::async_trait;
use gloo_file::Blob;
use gloo_net::http::{Request, RequestBuilder, Response};
use web_sys::{AbortSignal, FormData};

use common::error::TimetableError;
use common::model::timetable::TimetableMetadata;
use common::model::upload::{AdminToken, PdfUpload};
use common::requests::{LoginRequest, LoginResponse};
use common::service::TimetableService;

const METADATA_URL: &str = "/api/timetable";
const UPLOAD_URL: &str = "/api/timetable/upload";
const LOGIN_URL: &str = "/api/admin/login";
const LOGOUT_URL: &str = "/api/admin/logout";

const CONNECTION_FAILED: &str = "Failed to connect to the server. Please try again.";

/// Cheap to clone. Requests made through a clone created with
/// [`with_abort_signal`](Self::with_abort_signal) are cancelled when the
/// signal's controller aborts.
#[derive(Clone, Default)]
pub struct HttpTimetableService {
    abort_signal: Option<AbortSignal>,
}

impl HttpTimetableService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_abort_signal(&self, signal: AbortSignal) -> Self {
        Self {
            abort_signal: Some(signal),
        }
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.abort_signal(self.abort_signal.as_ref())
    }
}

fn bearer(token: &AdminToken) -> String {
    format!("Bearer {}", token.as_str())
}

fn connection_error(err: gloo_net::Error) -> TimetableError {
    gloo_console::error!(format!("Request failed: {}", err));
    TimetableError::transient(CONNECTION_FAILED)
}

/// Turns a non-2xx response into the matching `TimetableError`, using the
/// plain-text body as the message when there is one.
async fn error_from(response: Response) -> TimetableError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        format!("Request failed with status {}.", status)
    } else {
        body
    };

    match status {
        401 => TimetableError::Auth(message),
        400 | 413 | 422 => TimetableError::Validation(message),
        _ => TimetableError::Transient(message),
    }
}

#[async_trait(?Send)]
impl TimetableService for HttpTimetableService {
    async fn fetch_current_metadata(&self) -> Result<TimetableMetadata, TimetableError> {
        let response = self
            .prepare(Request::get(METADATA_URL))
            .send()
            .await
            .map_err(connection_error)?;
        if !response.ok() {
            return Err(error_from(response).await);
        }
        response
            .json::<TimetableMetadata>()
            .await
            .map_err(|e| TimetableError::transient(format!("Unexpected server response: {}", e)))
    }

    async fn authenticate(&self, password: &str) -> Result<AdminToken, TimetableError> {
        let request = self
            .prepare(Request::post(LOGIN_URL))
            .json(&LoginRequest {
                password: password.to_string(),
            })
            .map_err(connection_error)?;
        let response = request.send().await.map_err(connection_error)?;
        if !response.ok() {
            return Err(error_from(response).await);
        }
        let login = response
            .json::<LoginResponse>()
            .await
            .map_err(|e| TimetableError::transient(format!("Unexpected server response: {}", e)))?;
        Ok(AdminToken(login.token))
    }

    async fn upload_file(
        &self,
        token: &AdminToken,
        upload: &PdfUpload,
    ) -> Result<TimetableMetadata, TimetableError> {
        let blob = Blob::new_with_options(upload.bytes.as_slice(), Some(upload.media_type.as_str()));
        let form = FormData::new()
            .map_err(|_| TimetableError::transient("Could not prepare the upload."))?;
        form.append_with_blob_and_filename("file", &blob.into(), &upload.file_name)
            .map_err(|_| TimetableError::transient("Could not prepare the upload."))?;

        let request = self
            .prepare(Request::post(UPLOAD_URL))
            .header("Authorization", &bearer(token))
            .body(form)
            .map_err(connection_error)?;
        let response = request.send().await.map_err(connection_error)?;
        if !response.ok() {
            return Err(error_from(response).await);
        }
        response
            .json::<TimetableMetadata>()
            .await
            .map_err(|e| TimetableError::transient(format!("Unexpected server response: {}", e)))
    }

    async fn logout(&self, token: &AdminToken) -> Result<(), TimetableError> {
        let response = Request::post(LOGOUT_URL)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(connection_error)?;
        if !response.ok() {
            return Err(error_from(response).await);
        }
        Ok(())
    }
}
