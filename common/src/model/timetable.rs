use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Describes the currently published timetable document.
///
/// This is a value object: the backend produces a fresh snapshot on every
/// successful upload, and the frontend replaces its copy wholesale whenever a
/// fetch or upload succeeds. Nothing ever edits a field of an existing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableMetadata {
    /// Where the PDF can be downloaded from, e.g. `/files/<md5>.pdf`.
    pub file_location: String,
    /// When this document was published.
    pub last_updated: DateTime<Utc>,
}

impl TimetableMetadata {
    pub fn new(file_location: impl Into<String>, last_updated: DateTime<Utc>) -> Self {
        Self {
            file_location: file_location.into(),
            last_updated,
        }
    }
}

/// Picks the publish time for a new upload: the current time, nudged forward
/// by one millisecond if the clock has not moved past the previous value.
pub fn next_publish_time(
    previous: Option<&TimetableMetadata>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    match previous {
        Some(prev) if now <= prev.last_updated => {
            prev.last_updated + chrono::Duration::milliseconds(1)
        }
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn publish_time_is_strictly_after_previous() {
        let prev = TimetableMetadata::new(
            "/files/a.pdf",
            Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap(),
        );
        let skewed_now = Utc.with_ymd_and_hms(2029, 12, 31, 0, 0, 0).unwrap();

        let next = next_publish_time(Some(&prev), skewed_now);
        assert!(next > prev.last_updated);

        let later = Utc.with_ymd_and_hms(2030, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(next_publish_time(Some(&prev), later), later);
        assert_eq!(next_publish_time(None, skewed_now), skewed_now);
    }
}
