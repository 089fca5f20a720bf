//! In-memory collaborator with explicit fault injection.
//!
//! Mirrors the backend's observable behaviour closely enough to drive the
//! client state machines in tests: it checks the admin password, issues and
//! revokes tokens, rejects non-PDF uploads and keeps a single current
//! metadata value. Failures never happen at random; a test arms them with
//! the `fail_next_*` methods.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;

use super::{validate_upload, TimetableService};
use crate::error::{TimetableError, INCORRECT_PASSWORD};
use crate::model::timetable::{next_publish_time, TimetableMetadata};
use crate::model::upload::{AdminToken, PdfUpload};

const FETCH_FAILURE: &str = "Failed to connect to the server. Please try again.";
const UPLOAD_FAILURE: &str = "Upload failed. Please check your connection and try again.";
const LOGIN_FAILURE: &str = "Could not reach the server to verify the password.";
const NOTHING_PUBLISHED: &str = "No timetable has been published yet.";
const INVALID_TOKEN: &str = "Admin session expired. Please log in again.";

#[derive(Default)]
struct FaultPlan {
    fetches: usize,
    uploads: usize,
    logins: usize,
}

pub struct InMemoryTimetableService {
    admin_password: String,
    current: RefCell<Option<TimetableMetadata>>,
    files: RefCell<Vec<PdfUpload>>,
    tokens: RefCell<HashSet<String>>,
    faults: RefCell<FaultPlan>,
    fetch_calls: Cell<usize>,
    upload_calls: Cell<usize>,
    login_calls: Cell<usize>,
}

impl InMemoryTimetableService {
    pub fn new(admin_password: impl Into<String>) -> Self {
        Self {
            admin_password: admin_password.into(),
            current: RefCell::new(None),
            files: RefCell::new(Vec::new()),
            tokens: RefCell::new(HashSet::new()),
            faults: RefCell::new(FaultPlan::default()),
            fetch_calls: Cell::new(0),
            upload_calls: Cell::new(0),
            login_calls: Cell::new(0),
        }
    }

    /// Starts with `metadata` already published.
    pub fn with_metadata(admin_password: impl Into<String>, metadata: TimetableMetadata) -> Self {
        let service = Self::new(admin_password);
        *service.current.borrow_mut() = Some(metadata);
        service
    }

    /// The next `count` fetches fail with a transient error.
    pub fn fail_next_fetches(&self, count: usize) {
        self.faults.borrow_mut().fetches = count;
    }

    /// The next `count` accepted uploads fail with a transient error.
    pub fn fail_next_uploads(&self, count: usize) {
        self.faults.borrow_mut().uploads = count;
    }

    /// The next `count` logins fail with a transient error, whatever the
    /// password.
    pub fn fail_next_logins(&self, count: usize) {
        self.faults.borrow_mut().logins = count;
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.get()
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.get()
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.get()
    }

    pub fn current(&self) -> Option<TimetableMetadata> {
        self.current.borrow().clone()
    }

    pub fn active_tokens(&self) -> usize {
        self.tokens.borrow().len()
    }

    /// Bytes of the most recently stored file, if any.
    pub fn latest_file(&self) -> Option<PdfUpload> {
        self.files.borrow().last().cloned()
    }

    fn take_fault(&self, pick: impl FnOnce(&mut FaultPlan) -> &mut usize) -> bool {
        let mut faults = self.faults.borrow_mut();
        let remaining = pick(&mut faults);
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }
}

#[async_trait(?Send)]
impl TimetableService for InMemoryTimetableService {
    async fn fetch_current_metadata(&self) -> Result<TimetableMetadata, TimetableError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        if self.take_fault(|f| &mut f.fetches) {
            return Err(TimetableError::transient(FETCH_FAILURE));
        }
        self.current
            .borrow()
            .clone()
            .ok_or_else(|| TimetableError::transient(NOTHING_PUBLISHED))
    }

    async fn authenticate(&self, password: &str) -> Result<AdminToken, TimetableError> {
        self.login_calls.set(self.login_calls.get() + 1);
        if self.take_fault(|f| &mut f.logins) {
            return Err(TimetableError::transient(LOGIN_FAILURE));
        }
        if password != self.admin_password {
            return Err(TimetableError::auth(INCORRECT_PASSWORD));
        }
        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.borrow_mut().insert(token.clone());
        Ok(AdminToken(token))
    }

    async fn upload_file(
        &self,
        token: &AdminToken,
        upload: &PdfUpload,
    ) -> Result<TimetableMetadata, TimetableError> {
        self.upload_calls.set(self.upload_calls.get() + 1);
        if !self.tokens.borrow().contains(token.as_str()) {
            return Err(TimetableError::auth(INVALID_TOKEN));
        }
        validate_upload(upload)?;
        if self.take_fault(|f| &mut f.uploads) {
            return Err(TimetableError::transient(UPLOAD_FAILURE));
        }

        let mut files = self.files.borrow_mut();
        files.push(upload.clone());
        let location = format!("memory://{}/{}", files.len(), upload.file_name);

        let mut current = self.current.borrow_mut();
        let metadata = TimetableMetadata::new(
            location,
            next_publish_time(current.as_ref(), Utc::now()),
        );
        *current = Some(metadata.clone());
        Ok(metadata)
    }

    async fn logout(&self, token: &AdminToken) -> Result<(), TimetableError> {
        self.tokens.borrow_mut().remove(token.as_str());
        Ok(())
    }
}
