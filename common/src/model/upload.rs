use serde::{Deserialize, Serialize};

/// Media type accepted for timetable uploads.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A file picked by the administrator, as the client flows see it.
///
/// `media_type` is whatever the browser declared for the file; it is checked
/// before anything is sent to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfUpload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Compares the declared media type, ignoring case and any parameters
    /// such as `; charset=...`.
    pub fn is_declared_pdf(&self) -> bool {
        self.media_type
            .split(';')
            .next()
            .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_MEDIA_TYPE))
            .unwrap_or(false)
    }
}

/// Opaque bearer token issued by the collaborator after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminToken(pub String);

impl AdminToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_pdf_ignores_case_and_parameters() {
        assert!(PdfUpload::new("a.pdf", "application/pdf", vec![]).is_declared_pdf());
        assert!(PdfUpload::new("a.pdf", "Application/PDF; x=y", vec![]).is_declared_pdf());
        assert!(!PdfUpload::new("a.png", "image/png", vec![]).is_declared_pdf());
        assert!(!PdfUpload::new("a", "", vec![]).is_declared_pdf());
    }
}
