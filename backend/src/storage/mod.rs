//! Disk-backed store for the published timetable.
//!
//! The PDF itself is written to `<data_dir>/files/<md5>.pdf`; the single
//! current metadata row lives in `<data_dir>/timetable.sqlite`. Uploads are
//! serialized by `write_lock` so the file write and the row update of two
//! concurrent uploads never interleave.

use crate::error::BackendError;
use chrono::{DateTime, Utc};
use common::model::timetable::{next_publish_time, TimetableMetadata};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// URL prefix under which stored files are served.
pub const FILES_ROUTE: &str = "/files";

const DB_FILE: &str = "timetable.sqlite";

pub struct TimetableStore {
    db_path: PathBuf,
    files_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl TimetableStore {
    /// Creates the data directory layout and schema if missing.
    pub fn open(data_dir: &Path) -> Result<Self, BackendError> {
        let files_dir = data_dir.join("files");
        fs::create_dir_all(&files_dir)?;
        let db_path = data_dir.join(DB_FILE);

        let conn = Connection::open(&db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS timetable (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                stored_name TEXT NOT NULL,
                original_name TEXT NOT NULL,
                last_updated TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            db_path,
            files_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    /// The currently published metadata, or `None` before the first upload.
    pub fn current(&self) -> Result<Option<TimetableMetadata>, BackendError> {
        let conn = Connection::open(&self.db_path)?;
        let row: Option<(String, String)> = conn
            .query_row(
                "SELECT stored_name, last_updated FROM timetable WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        row.map(|(stored_name, last_updated)| {
            let last_updated = DateTime::parse_from_rfc3339(&last_updated)
                .map_err(|e| {
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("corrupt timestamp: {}", e),
                    )
                })?
                .with_timezone(&Utc);
            Ok(TimetableMetadata::new(file_location(&stored_name), last_updated))
        })
        .transpose()
    }

    /// Stores `bytes` and makes them the current timetable.
    pub async fn publish(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<TimetableMetadata, BackendError> {
        let _guard = self.write_lock.lock().await;

        let previous = self.current()?;
        let last_updated = next_publish_time(previous.as_ref(), Utc::now());

        let stored_name = format!("{:x}.pdf", md5::compute(bytes));
        fs::write(self.files_dir.join(&stored_name), bytes)?;

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT OR REPLACE INTO timetable (id, stored_name, original_name, last_updated)
             VALUES (1, ?1, ?2, ?3)",
            params![stored_name, original_name, last_updated.to_rfc3339()],
        )?;

        info!(
            "Published '{}' as {} ({} bytes)",
            original_name,
            stored_name,
            bytes.len()
        );
        Ok(TimetableMetadata::new(file_location(&stored_name), last_updated))
    }
}

fn file_location(stored_name: &str) -> String {
    format!("{}/{}", FILES_ROUTE, stored_name)
}
