//! Component state for the timetable page.
//!
//! The page logic itself lives in `common`: `ViewShell` decides what the card
//! shows and owns the toast queue, `AdminSession` runs the upload modal. This
//! struct adds what only the browser has: timer handles, the abort controller
//! of the pending admin request, the collaborator client and DOM refs.

use gloo_timers::callback::Timeout;
use web_sys::AbortController;
use yew::prelude::*;

use common::notifications::ExpiryTimers;
use common::session::AdminSession;
use common::shell::ViewShell;

use crate::services::http::HttpTimetableService;

pub struct TimetableComponent {
    pub shell: ViewShell,
    pub admin: AdminSession,

    /// One pending auto-dismiss timer per visible toast. Dropping a handle
    /// cancels its timer.
    pub toast_timers: ExpiryTimers<Timeout>,

    /// Controller for the in-flight login or upload request, aborted when the
    /// modal closes.
    pub admin_abort: Option<AbortController>,

    pub service: HttpTimetableService,

    /// Hidden `<input type="file">` behind the upload drop zone.
    pub file_input_ref: NodeRef,

    /// Guard so the initial fetch runs once.
    pub loaded: bool,
}

impl TimetableComponent {
    pub fn new() -> Self {
        Self {
            shell: ViewShell::new(),
            admin: AdminSession::new(),
            toast_timers: ExpiryTimers::new(),
            admin_abort: None,
            service: HttpTimetableService::new(),
            file_input_ref: NodeRef::default(),
            loaded: false,
        }
    }

    /// Aborts the pending admin request, if any.
    pub fn abort_admin_request(&mut self) {
        if let Some(controller) = self.admin_abort.take() {
            controller.abort();
        }
    }

    /// Client whose requests can be cancelled through `admin_abort`.
    pub fn abortable_service(&mut self) -> HttpTimetableService {
        self.abort_admin_request();
        match AbortController::new() {
            Ok(controller) => {
                let service = self.service.with_abort_signal(controller.signal());
                self.admin_abort = Some(controller);
                service
            }
            Err(_) => self.service.clone(),
        }
    }
}
