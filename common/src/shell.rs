//! State behind the main timetable card: the current metadata snapshot, the
//! fetch guard, and the toast queue that every flow reports into.

use crate::error::TimetableError;
use crate::model::notification::{NotificationId, NotificationKind};
use crate::model::timetable::TimetableMetadata;
use crate::notifications::NotificationQueue;

/// Toast text shown after a successful upload.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Timetable updated successfully!";

/// What the card should currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState<'a> {
    /// Nothing has been loaded yet and a fetch is pending (or about to be).
    Loading,
    /// Every fetch so far failed; carries the last failure text.
    ErrorNoData(&'a str),
    /// Metadata is available. Wins over errors from later refreshes.
    Content(&'a TimetableMetadata),
}

#[derive(Debug, Default)]
pub struct ViewShell {
    metadata: Option<TimetableMetadata>,
    last_error: Option<String>,
    fetch_in_flight: bool,
    notifications: NotificationQueue,
}

impl ViewShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a fetch as started. Returns `false`, and changes nothing, when
    /// one is already in flight.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetch_in_flight {
            return false;
        }
        self.fetch_in_flight = true;
        self.last_error = None;
        true
    }

    /// Applies the outcome of the fetch started by [`begin_fetch`](Self::begin_fetch).
    ///
    /// On failure the previously held metadata stays in place and an error
    /// toast is queued; its id is returned so the caller can schedule expiry.
    pub fn finish_fetch(
        &mut self,
        result: Result<TimetableMetadata, TimetableError>,
    ) -> Option<NotificationId> {
        self.fetch_in_flight = false;
        match result {
            Ok(metadata) => {
                self.metadata = Some(metadata);
                None
            }
            Err(err) => {
                let text = err.to_string();
                self.last_error = Some(text.clone());
                Some(self.notifications.push(text, NotificationKind::Error))
            }
        }
    }

    /// Installs metadata produced by a successful upload. No refetch.
    pub fn apply_upload(&mut self, metadata: TimetableMetadata) -> NotificationId {
        self.metadata = Some(metadata);
        self.last_error = None;
        self.notifications
            .push(UPLOAD_SUCCESS_MESSAGE, NotificationKind::Success)
    }

    /// Queues an error toast for a failure reported by another flow. Auth
    /// failures are not queued.
    pub fn report_error(&mut self, err: &TimetableError) -> Option<NotificationId> {
        if !err.is_notifiable() {
            return None;
        }
        Some(
            self.notifications
                .push(err.to_string(), NotificationKind::Error),
        )
    }

    pub fn render_state(&self) -> RenderState<'_> {
        match (&self.metadata, &self.last_error) {
            (Some(metadata), _) => RenderState::Content(metadata),
            (None, Some(err)) if !self.fetch_in_flight => RenderState::ErrorNoData(err),
            _ => RenderState::Loading,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch_in_flight
    }

    pub fn metadata(&self) -> Option<&TimetableMetadata> {
        self.metadata.as_ref()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }
}
