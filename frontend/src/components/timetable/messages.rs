use common::error::TimetableError;
use common::model::notification::NotificationId;
use common::model::timetable::TimetableMetadata;
use common::model::upload::{AdminToken, PdfUpload};
use common::session::SessionEpoch;

pub enum Msg {
    Refresh,
    FetchFinished(Result<TimetableMetadata, TimetableError>),
    DismissToast(NotificationId),
    ToastExpired(NotificationId),
    OpenAdmin,
    CloseAdmin,
    PasswordInput(String),
    SubmitPassword,
    LoginFinished(SessionEpoch, Result<AdminToken, TimetableError>),
    OpenFilePicker,
    FileChosen(web_sys::File),
    FileRead(SessionEpoch, PdfUpload),
    FileReadFailed(String),
    Upload,
    UploadFinished {
        epoch: SessionEpoch,
        token: AdminToken,
        result: Result<TimetableMetadata, TimetableError>,
    },
}
