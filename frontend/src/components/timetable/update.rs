//! Update function for the timetable page.
//!
//! Elm-style: receives the component state, the `Context` and a `Msg`,
//! mutates the state and returns whether the view should re-render. Every
//! collaborator call runs in `spawn_local` and reports back with a message.

use gloo_console::{error, log};
use gloo_file::futures::read_as_bytes;
use gloo_timers::callback::Timeout;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::notification::NotificationId;
use common::model::upload::{AdminToken, PdfUpload};
use common::notifications::NOTIFICATION_LIFETIME;
use common::service::{upload_file, TimetableService};
use common::session::{LoginOutcome, UploadOutcome, UploadStart};

use super::messages::Msg;
use super::state::TimetableComponent;

pub fn update(component: &mut TimetableComponent, ctx: &Context<TimetableComponent>, msg: Msg) -> bool {
    match msg {
        Msg::Refresh => {
            if !component.shell.begin_fetch() {
                return false;
            }
            let service = component.service.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = service.fetch_current_metadata().await;
                link.send_message(Msg::FetchFinished(result));
            });
            true
        }
        Msg::FetchFinished(result) => {
            match &result {
                Ok(metadata) => log!(format!("Loaded timetable {}", metadata.file_location)),
                Err(err) => error!(format!("Timetable fetch failed: {}", err)),
            }
            let toast = component.shell.finish_fetch(result);
            schedule_expiry(component, ctx, toast);
            true
        }
        Msg::DismissToast(id) => {
            component.toast_timers.cancel(id);
            component.shell.notifications_mut().dismiss(id).is_some()
        }
        Msg::ToastExpired(id) => {
            component.toast_timers.fired(id);
            component.shell.notifications_mut().expire(id).is_some()
        }
        Msg::OpenAdmin => {
            component.admin.open();
            true
        }
        Msg::CloseAdmin => {
            component.abort_admin_request();
            if let Some(token) = component.admin.close() {
                revoke(component, token);
            }
            true
        }
        Msg::PasswordInput(value) => {
            component.admin.set_password_input(value);
            true
        }
        Msg::SubmitPassword => {
            let Some(attempt) = component.admin.begin_login() else {
                return false;
            };
            let service = component.abortable_service();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = service.authenticate(&attempt.password).await;
                link.send_message(Msg::LoginFinished(attempt.epoch, result));
            });
            true
        }
        Msg::LoginFinished(epoch, result) => {
            match component.admin.finish_login(epoch, result) {
                LoginOutcome::Discarded(token) => {
                    if let Some(token) = token {
                        revoke(component, token);
                    }
                    return false;
                }
                LoginOutcome::Authenticated | LoginOutcome::Rejected => {}
                LoginOutcome::Failed(err) => {
                    let toast = component.shell.report_error(&err);
                    schedule_expiry(component, ctx, toast);
                }
            }
            component.admin_abort = None;
            true
        }
        Msg::OpenFilePicker => {
            if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FileChosen(file) => {
            let Some(epoch) = component.admin.begin_file_selection() else {
                return false;
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                let file = gloo_file::File::from(file);
                match read_as_bytes(&file).await {
                    Ok(bytes) => link.send_message(Msg::FileRead(
                        epoch,
                        PdfUpload::new(file.name(), file.raw_mime_type(), bytes),
                    )),
                    Err(err) => link.send_message(Msg::FileReadFailed(err.to_string())),
                }
            });
            false
        }
        Msg::FileRead(epoch, upload) => component.admin.select_file(epoch, upload),
        Msg::FileReadFailed(reason) => {
            error!(format!("Could not read the selected file: {}", reason));
            let err = common::error::TimetableError::transient("Could not read the selected file.");
            let toast = component.shell.report_error(&err);
            schedule_expiry(component, ctx, toast);
            true
        }
        Msg::Upload => match component.admin.begin_upload() {
            UploadStart::Started(attempt) => {
                let service = component.abortable_service();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = upload_file(&service, &attempt.token, &attempt.upload).await;
                    link.send_message(Msg::UploadFinished {
                        epoch: attempt.epoch,
                        token: attempt.token,
                        result,
                    });
                });
                true
            }
            UploadStart::Rejected(err) => {
                let toast = component.shell.report_error(&err);
                schedule_expiry(component, ctx, toast);
                true
            }
            UploadStart::MissingFile => true,
            UploadStart::Ignored => false,
        },
        Msg::UploadFinished { epoch, token, result } => {
            match component.admin.finish_upload(epoch, result) {
                UploadOutcome::Discarded => return false,
                UploadOutcome::Published(metadata) => {
                    log!(format!("Published timetable {}", metadata.file_location));
                    let toast = component.shell.apply_upload(metadata);
                    schedule_expiry(component, ctx, Some(toast));
                    revoke(component, token);
                }
                UploadOutcome::Failed(err) => {
                    error!(format!("Timetable upload failed: {}", err));
                    let toast = component.shell.report_error(&err);
                    schedule_expiry(component, ctx, toast);
                }
            }
            component.admin_abort = None;
            true
        }
    }
}

/// Starts the auto-dismiss timer of a freshly queued toast.
fn schedule_expiry(
    component: &mut TimetableComponent,
    ctx: &Context<TimetableComponent>,
    toast: Option<NotificationId>,
) {
    let Some(id) = toast else {
        return;
    };
    let link = ctx.link().clone();
    let timeout = Timeout::new(NOTIFICATION_LIFETIME.as_millis() as u32, move || {
        link.send_message(Msg::ToastExpired(id));
    });
    component.toast_timers.schedule(id, timeout);
}

/// Best-effort logout; failures are only logged.
fn revoke(component: &TimetableComponent, token: AdminToken) {
    let service = component.service.clone();
    spawn_local(async move {
        if let Err(err) = service.logout(&token).await {
            error!(format!("Logout failed: {}", err));
        }
    });
}
