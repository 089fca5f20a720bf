//! Admin modal state: password gate, file selection and upload.
//!
//! Every async step is split in two. `begin_*` validates and flips the
//! session into its waiting state, handing back an attempt that carries the
//! session epoch; `finish_*` applies the collaborator's answer. Closing the
//! modal bumps the epoch, so answers to attempts started before the close are
//! discarded instead of resurrecting a reset session.

use crate::error::{TimetableError, INCORRECT_PASSWORD};
use crate::model::timetable::TimetableMetadata;
use crate::model::upload::{AdminToken, PdfUpload};
use crate::service::validate_upload;

/// Inline error when the upload button is pressed with no file selected.
pub const MISSING_FILE_MESSAGE: &str = "Please select a PDF file to upload.";

const NOT_AUTHENTICATED: &str = "Please log in before uploading.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdminPhase {
    #[default]
    PasswordEntry,
    Authenticated(AdminToken),
}

/// Identifies the open/close cycle an attempt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEpoch(u64);

#[derive(Debug, Clone)]
pub struct LoginAttempt {
    pub epoch: SessionEpoch,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct UploadAttempt {
    pub epoch: SessionEpoch,
    pub token: AdminToken,
    pub upload: PdfUpload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    /// Wrong password; the inline error is set.
    Rejected,
    /// Collaborator trouble; the inline error is set.
    Failed(TimetableError),
    /// The modal was closed while the request was pending. Carries the token
    /// the server issued anyway, which the caller must revoke.
    Discarded(Option<AdminToken>),
}

#[derive(Debug, Clone)]
pub enum UploadStart {
    Started(UploadAttempt),
    /// Refused before reaching the collaborator; the inline error is set.
    Rejected(TimetableError),
    /// No file has been picked. Only the inline error is set.
    MissingFile,
    /// An operation is already pending or the modal is closed.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The session has been reset and the modal closed.
    Published(TimetableMetadata),
    /// The session stays open with the inline error set.
    Failed(TimetableError),
    Discarded,
}

#[derive(Debug, Default)]
pub struct AdminSession {
    open: bool,
    password_input: String,
    phase: AdminPhase,
    selected_file: Option<PdfUpload>,
    busy: bool,
    last_error: Option<String>,
    epoch: u64,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Resets every field and closes the modal, whatever the current state.
    ///
    /// Returns the token of an authenticated session so the caller can
    /// revoke it.
    pub fn close(&mut self) -> Option<AdminToken> {
        let token = match std::mem::take(&mut self.phase) {
            AdminPhase::Authenticated(token) => Some(token),
            AdminPhase::PasswordEntry => None,
        };
        let epoch = self.epoch.wrapping_add(1);
        *self = Self {
            epoch,
            ..Self::default()
        };
        token
    }

    pub fn set_password_input(&mut self, value: impl Into<String>) {
        self.password_input = value.into();
    }

    pub fn begin_login(&mut self) -> Option<LoginAttempt> {
        if !self.open || self.busy || self.is_authenticated() {
            return None;
        }
        self.busy = true;
        self.last_error = None;
        Some(LoginAttempt {
            epoch: self.current_epoch(),
            password: self.password_input.clone(),
        })
    }

    pub fn finish_login(
        &mut self,
        epoch: SessionEpoch,
        result: Result<AdminToken, TimetableError>,
    ) -> LoginOutcome {
        if epoch != self.current_epoch() {
            return LoginOutcome::Discarded(result.ok());
        }
        self.busy = false;
        match result {
            Ok(token) => {
                self.phase = AdminPhase::Authenticated(token);
                self.password_input.clear();
                self.last_error = None;
                LoginOutcome::Authenticated
            }
            Err(TimetableError::Auth(_)) => {
                self.last_error = Some(INCORRECT_PASSWORD.to_string());
                LoginOutcome::Rejected
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                LoginOutcome::Failed(err)
            }
        }
    }

    /// Starts picking a file. Reading the file is asynchronous, so the
    /// returned epoch must be handed back to [`select_file`](Self::select_file).
    pub fn begin_file_selection(&self) -> Option<SessionEpoch> {
        (self.open && !self.busy).then(|| self.current_epoch())
    }

    /// Remembers the picked file. Its type is only checked at upload time.
    ///
    /// Returns `false`, changing nothing, when the modal was closed since
    /// `epoch` was issued or an operation is pending.
    pub fn select_file(&mut self, epoch: SessionEpoch, file: PdfUpload) -> bool {
        if epoch != self.current_epoch() || !self.open || self.busy {
            return false;
        }
        self.selected_file = Some(file);
        self.last_error = None;
        true
    }

    pub fn begin_upload(&mut self) -> UploadStart {
        if !self.open || self.busy {
            return UploadStart::Ignored;
        }
        let token = match &self.phase {
            AdminPhase::Authenticated(token) => token.clone(),
            AdminPhase::PasswordEntry => {
                return self.reject(TimetableError::auth(NOT_AUTHENTICATED));
            }
        };
        let Some(upload) = self.selected_file.clone() else {
            self.last_error = Some(MISSING_FILE_MESSAGE.to_string());
            return UploadStart::MissingFile;
        };
        if let Err(err) = validate_upload(&upload) {
            return self.reject(err);
        }

        self.busy = true;
        self.last_error = None;
        UploadStart::Started(UploadAttempt {
            epoch: self.current_epoch(),
            token,
            upload,
        })
    }

    pub fn finish_upload(
        &mut self,
        epoch: SessionEpoch,
        result: Result<TimetableMetadata, TimetableError>,
    ) -> UploadOutcome {
        if epoch != self.current_epoch() {
            return UploadOutcome::Discarded;
        }
        self.busy = false;
        match result {
            Ok(metadata) => {
                self.close();
                UploadOutcome::Published(metadata)
            }
            Err(err) => {
                if let TimetableError::Auth(_) = err {
                    // The token is no good any more; ask for the password again.
                    self.phase = AdminPhase::PasswordEntry;
                }
                self.last_error = Some(err.to_string());
                UploadOutcome::Failed(err)
            }
        }
    }

    fn reject(&mut self, err: TimetableError) -> UploadStart {
        self.last_error = Some(err.to_string());
        UploadStart::Rejected(err)
    }

    fn current_epoch(&self) -> SessionEpoch {
        SessionEpoch(self.epoch)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase, AdminPhase::Authenticated(_))
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn phase(&self) -> &AdminPhase {
        &self.phase
    }

    pub fn password_input(&self) -> &str {
        &self.password_input
    }

    pub fn selected_file(&self) -> Option<&PdfUpload> {
        self.selected_file.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::memory::InMemoryTimetableService;
    use crate::service::{upload_file, TimetableService};
    use chrono::Utc;

    const SECRET: &str = "timetable-admin";

    fn pdf() -> PdfUpload {
        PdfUpload::new("week.pdf", "application/pdf", b"%PDF-1.4".to_vec())
    }

    fn select(session: &mut AdminSession, file: PdfUpload) {
        let epoch = session.begin_file_selection().expect("selection should start");
        assert!(session.select_file(epoch, file));
    }

    async fn login(
        session: &mut AdminSession,
        service: &InMemoryTimetableService,
        password: &str,
    ) -> LoginOutcome {
        session.set_password_input(password);
        let attempt = session.begin_login().expect("login should start");
        let result = service.authenticate(&attempt.password).await;
        session.finish_login(attempt.epoch, result)
    }

    async fn upload(
        session: &mut AdminSession,
        service: &InMemoryTimetableService,
    ) -> UploadOutcome {
        match session.begin_upload() {
            UploadStart::Started(attempt) => {
                let result = upload_file(service, &attempt.token, &attempt.upload).await;
                session.finish_upload(attempt.epoch, result)
            }
            other => panic!("upload did not start: {other:?}"),
        }
    }

    #[tokio::test]
    async fn correct_password_authenticates() {
        let service = InMemoryTimetableService::new(SECRET);
        let mut session = AdminSession::new();
        session.open();

        assert_eq!(login(&mut session, &service, SECRET).await, LoginOutcome::Authenticated);
        assert!(session.is_authenticated());
        assert!(session.last_error().is_none());
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn wrong_password_keeps_password_entry() {
        let service = InMemoryTimetableService::new(SECRET);
        let mut session = AdminSession::new();
        session.open();

        assert_eq!(login(&mut session, &service, "letmein").await, LoginOutcome::Rejected);
        assert_eq!(session.phase(), &AdminPhase::PasswordEntry);
        assert_eq!(session.last_error(), Some("Incorrect password."));
        assert_eq!(session.password_input(), "letmein");
    }

    #[tokio::test]
    async fn unreachable_login_reports_a_transient_failure() {
        let service = InMemoryTimetableService::new(SECRET);
        service.fail_next_logins(1);
        let mut session = AdminSession::new();
        session.open();

        let outcome = login(&mut session, &service, SECRET).await;
        assert!(matches!(outcome, LoginOutcome::Failed(TimetableError::Transient(_))));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn upload_without_file_has_no_side_effect() {
        let service = InMemoryTimetableService::new(SECRET);
        let mut session = AdminSession::new();
        session.open();
        login(&mut session, &service, SECRET).await;

        assert!(matches!(session.begin_upload(), UploadStart::MissingFile));
        assert_eq!(session.last_error(), Some(MISSING_FILE_MESSAGE));
        assert!(!session.is_busy());
        assert_eq!(service.upload_calls(), 0);
    }

    #[tokio::test]
    async fn png_upload_fails_validation_before_busy() {
        let service = InMemoryTimetableService::new(SECRET);
        let mut session = AdminSession::new();
        session.open();
        login(&mut session, &service, SECRET).await;
        select(&mut session, PdfUpload::new("week.png", "image/png", vec![1, 2, 3]));

        match session.begin_upload() {
            UploadStart::Rejected(TimetableError::Validation(_)) => {}
            other => panic!("expected validation rejection, got {other:?}"),
        }
        assert!(!session.is_busy());
        assert!(session.is_authenticated());
        assert_eq!(service.upload_calls(), 0);
    }

    #[tokio::test]
    async fn successful_upload_resets_and_closes() {
        let previous = TimetableMetadata::new("/files/old.pdf", Utc::now());
        let service = InMemoryTimetableService::with_metadata(SECRET, previous.clone());
        let mut session = AdminSession::new();
        session.open();
        login(&mut session, &service, SECRET).await;
        select(&mut session, pdf());

        let metadata = match upload(&mut session, &service).await {
            UploadOutcome::Published(metadata) => metadata,
            other => panic!("expected publish, got {other:?}"),
        };
        assert!(metadata.last_updated > previous.last_updated);
        assert!(!session.is_open());
        assert!(!session.is_authenticated());
        assert!(session.selected_file().is_none());
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn failed_upload_keeps_file_and_authentication() {
        let service = InMemoryTimetableService::new(SECRET);
        service.fail_next_uploads(1);
        let mut session = AdminSession::new();
        session.open();
        login(&mut session, &service, SECRET).await;
        select(&mut session, pdf());

        let outcome = upload(&mut session, &service).await;
        assert!(matches!(outcome, UploadOutcome::Failed(TimetableError::Transient(_))));
        assert!(!session.is_busy());
        assert!(session.is_authenticated());
        assert_eq!(session.selected_file(), Some(&pdf()));
        assert!(session.last_error().is_some());

        // Retrying the same file works once the fault is spent.
        assert!(matches!(upload(&mut session, &service).await, UploadOutcome::Published(_)));
    }

    #[tokio::test]
    async fn close_resets_every_field() {
        let service = InMemoryTimetableService::new(SECRET);
        let mut session = AdminSession::new();
        session.open();
        login(&mut session, &service, "wrong").await;
        login(&mut session, &service, SECRET).await;
        select(&mut session, PdfUpload::new("x.txt", "text/plain", vec![]));
        session.begin_upload();

        let token = session.close();
        assert!(token.is_some());

        session.open();
        assert_eq!(session.phase(), &AdminPhase::PasswordEntry);
        assert_eq!(session.password_input(), "");
        assert!(session.selected_file().is_none());
        assert!(session.last_error().is_none());
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn results_arriving_after_close_are_discarded() {
        let service = InMemoryTimetableService::new(SECRET);
        let mut session = AdminSession::new();
        session.open();
        login(&mut session, &service, SECRET).await;
        select(&mut session, pdf());

        let UploadStart::Started(attempt) = session.begin_upload() else {
            panic!("upload should start");
        };
        session.close();
        session.open();

        let result = upload_file(&service, &attempt.token, &attempt.upload).await;
        assert_eq!(session.finish_upload(attempt.epoch, result), UploadOutcome::Discarded);
        assert_eq!(session.phase(), &AdminPhase::PasswordEntry);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn login_answered_after_close_hands_back_the_token() {
        let service = InMemoryTimetableService::new(SECRET);
        let mut session = AdminSession::new();
        session.open();
        session.set_password_input(SECRET);
        let attempt = session.begin_login().expect("login should start");
        assert!(session.close().is_none());

        let result = service.authenticate(&attempt.password).await;
        let LoginOutcome::Discarded(Some(token)) = session.finish_login(attempt.epoch, result)
        else {
            panic!("late login should be discarded with its token");
        };
        assert!(!session.is_authenticated());
        assert_eq!(service.active_tokens(), 1);

        service.logout(&token).await.unwrap();
        assert_eq!(service.active_tokens(), 0);
    }

    #[tokio::test]
    async fn rejected_login_after_close_has_no_token() {
        let service = InMemoryTimetableService::new(SECRET);
        let mut session = AdminSession::new();
        session.open();
        session.set_password_input("wrong");
        let attempt = session.begin_login().expect("login should start");
        session.close();

        let result = service.authenticate(&attempt.password).await;
        assert_eq!(
            session.finish_login(attempt.epoch, result),
            LoginOutcome::Discarded(None)
        );
        assert!(session.last_error().is_none());
    }

    #[test]
    fn file_read_finishing_after_close_is_dropped() {
        let mut session = AdminSession::new();
        session.open();
        let epoch = session.begin_file_selection().expect("selection should start");
        session.close();

        assert!(!session.select_file(epoch, PdfUpload::new("stale.pdf", "application/pdf", vec![])));
        session.open();
        assert!(session.selected_file().is_none());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn file_selection_needs_an_open_modal() {
        let mut session = AdminSession::new();
        assert!(session.begin_file_selection().is_none());
        session.open();
        let first = session.begin_file_selection().expect("selection should start");
        session.close();
        assert!(session.begin_file_selection().is_none());

        session.open();
        assert_ne!(session.begin_file_selection(), Some(first));
    }

    #[tokio::test]
    async fn revoked_token_sends_upload_back_to_password_entry() {
        let service = InMemoryTimetableService::new(SECRET);
        let mut session = AdminSession::new();
        session.open();
        login(&mut session, &service, SECRET).await;
        select(&mut session, pdf());
        let AdminPhase::Authenticated(token) = session.phase().clone() else {
            panic!("login should authenticate");
        };
        service.logout(&token).await.unwrap();

        let outcome = upload(&mut session, &service).await;
        assert!(matches!(outcome, UploadOutcome::Failed(TimetableError::Auth(_))));
        assert_eq!(session.phase(), &AdminPhase::PasswordEntry);
        assert_eq!(session.selected_file(), Some(&pdf()));
        assert!(session.last_error().is_some());
        assert!(!session.is_busy());
        assert!(session.is_open());
    }

    #[test]
    fn login_is_refused_while_closed_or_busy() {
        let mut session = AdminSession::new();
        assert!(session.begin_login().is_none());

        session.open();
        assert!(session.begin_login().is_some());
        assert!(session.begin_login().is_none());
    }
}
