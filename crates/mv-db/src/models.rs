//! Rust structs mapping to database tables.

use bytes::Bytes;
use mv_core::{MediaId, MediaRecord, StorageKind, StorageLocation};
use rusqlite::types::Type;
use std::path::PathBuf;
use uuid::Uuid;

/// Parse a UUID-based ID from a text column.
fn parse_id<T: From<Uuid>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    let uuid = Uuid::parse_str(&s)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))?;
    Ok(T::from(uuid))
}

fn parse_storage(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<StorageKind> {
    let s: String = row.get(idx)?;
    s.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into())
    })
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Media {
    pub id: MediaId,
    pub mime_type: Option<String>,
    pub original_name: Option<String>,
    pub storage: StorageKind,
    pub filename: Option<String>,
    pub data: Option<Vec<u8>>,
    pub created_at: String,
}

impl Media {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            mime_type: row.get(1)?,
            original_name: row.get(2)?,
            storage: parse_storage(row, 3)?,
            filename: row.get(4)?,
            data: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    /// Convert the row into the snapshot handed to the streamer.
    ///
    /// A filesystem row with a file name wins; otherwise any inline bytes
    /// are used. A row with neither has no location.
    pub fn into_record(self) -> MediaRecord {
        let location = match (self.storage, self.filename, self.data) {
            (StorageKind::Filesystem, Some(name), _) if !name.is_empty() => {
                Some(StorageLocation::Filesystem(PathBuf::from(name)))
            }
            (_, _, Some(data)) => Some(StorageLocation::Inline(Bytes::from(data))),
            _ => None,
        };

        MediaRecord {
            id: self.id,
            content_type: self.mime_type,
            location,
        }
    }
}
