//! The collaborator contract: the only boundary between the client flows and
//! whatever actually stores the timetable and checks the admin password.
//!
//! The browser build talks to the backend over HTTP; tests use
//! [`memory::InMemoryTimetableService`]. Both are injected where the flows
//! need them, nothing reaches for global state.

pub mod memory;

use async_trait::async_trait;

use crate::error::{TimetableError, INVALID_FILE_TYPE};
use crate::model::timetable::TimetableMetadata;
use crate::model::upload::{AdminToken, PdfUpload};

/// Storage and authentication backend for the published timetable.
///
/// Futures are not required to be `Send`: the production implementation runs
/// on the browser's single-threaded event loop.
#[async_trait(?Send)]
pub trait TimetableService {
    /// Latest published metadata. Fails with [`TimetableError::Transient`]
    /// when the backend cannot be reached or has nothing to offer yet.
    async fn fetch_current_metadata(&self) -> Result<TimetableMetadata, TimetableError>;

    /// Exchanges the admin password for a bearer token.
    async fn authenticate(&self, password: &str) -> Result<AdminToken, TimetableError>;

    /// Stores `upload` as the new timetable and returns the metadata that now
    /// describes it. Callers should go through [`upload_file`] so the media
    /// type is checked first.
    async fn upload_file(
        &self,
        token: &AdminToken,
        upload: &PdfUpload,
    ) -> Result<TimetableMetadata, TimetableError>;

    /// Invalidates `token`.
    async fn logout(&self, token: &AdminToken) -> Result<(), TimetableError>;
}

/// Rejects anything whose declared media type is not PDF.
pub fn validate_upload(upload: &PdfUpload) -> Result<(), TimetableError> {
    if upload.is_declared_pdf() {
        Ok(())
    } else {
        Err(TimetableError::validation(INVALID_FILE_TYPE))
    }
}

/// Validates `upload` and, only if it is acceptable, hands it to `service`.
pub async fn upload_file<S>(
    service: &S,
    token: &AdminToken,
    upload: &PdfUpload,
) -> Result<TimetableMetadata, TimetableError>
where
    S: TimetableService + ?Sized,
{
    validate_upload(upload)?;
    service.upload_file(token, upload).await
}
