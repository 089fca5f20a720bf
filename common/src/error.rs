//! Error taxonomy shared by the collaborator contract and the client flows.

use thiserror::Error;

/// Message shown when the administrator password is rejected.
pub const INCORRECT_PASSWORD: &str = "Incorrect password.";

/// Message shown when an upload is not a PDF document.
pub const INVALID_FILE_TYPE: &str = "Invalid file type. Please upload a PDF.";

/// Failure modes of the timetable collaborator.
///
/// None of them is fatal: every variant leaves the interface usable and the
/// user can retry with a fresh action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    /// Connectivity or storage hiccup. Retrying the same input may succeed.
    #[error("{0}")]
    Transient(String),

    /// The input itself was rejected (e.g. wrong file type).
    #[error("{0}")]
    Validation(String),

    /// Password mismatch or an expired/unknown admin token.
    #[error("{0}")]
    Auth(String),
}

impl TimetableError {
    pub fn transient(msg: impl Into<String>) -> Self {
        TimetableError::Transient(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        TimetableError::Validation(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        TimetableError::Auth(msg.into())
    }

    /// True when repeating the same request unchanged might succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, TimetableError::Transient(_))
    }

    /// Auth failures stay inside the admin modal and never reach the
    /// notification queue.
    pub fn is_notifiable(&self) -> bool {
        !matches!(self, TimetableError::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_errors_are_retriable() {
        assert!(TimetableError::transient("offline").is_retriable());
        assert!(!TimetableError::validation(INVALID_FILE_TYPE).is_retriable());
        assert!(!TimetableError::auth(INCORRECT_PASSWORD).is_retriable());
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = TimetableError::auth(INCORRECT_PASSWORD);
        assert_eq!(err.to_string(), "Incorrect password.");
        assert!(!err.is_notifiable());
    }
}
