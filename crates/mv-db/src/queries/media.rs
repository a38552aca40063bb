//! Media record operations.

use chrono::Utc;
use mv_core::{Error, MediaId, Result, StorageKind};
use rusqlite::Connection;

use crate::models::Media;

const COLS: &str = "id, mime_type, original_name, storage, filename, data, created_at";

/// Insert a media record backed by a file under the media directory.
pub fn create_filesystem_media(
    conn: &Connection,
    mime_type: Option<&str>,
    original_name: Option<&str>,
    filename: &str,
) -> Result<Media> {
    insert(
        conn,
        mime_type,
        original_name,
        StorageKind::Filesystem,
        Some(filename),
        None,
    )
}

/// Insert a legacy media record that carries its bytes inline.
pub fn create_inline_media(
    conn: &Connection,
    mime_type: Option<&str>,
    original_name: Option<&str>,
    data: &[u8],
) -> Result<Media> {
    insert(
        conn,
        mime_type,
        original_name,
        StorageKind::Inline,
        None,
        Some(data),
    )
}

fn insert(
    conn: &Connection,
    mime_type: Option<&str>,
    original_name: Option<&str>,
    storage: StorageKind,
    filename: Option<&str>,
    data: Option<&[u8]>,
) -> Result<Media> {
    let id = MediaId::new();
    let created_at = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO media (id, mime_type, original_name, storage, filename, data, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            id.to_string(),
            mime_type,
            original_name,
            storage.to_string(),
            filename,
            data,
            created_at,
        ],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(Media {
        id,
        mime_type: mime_type.map(String::from),
        original_name: original_name.map(String::from),
        storage,
        filename: filename.map(String::from),
        data: data.map(<[u8]>::to_vec),
        created_at,
    })
}

/// Get a media record by ID.
pub fn get_media(conn: &Connection, id: MediaId) -> Result<Option<Media>> {
    let q = format!("SELECT {COLS} FROM media WHERE id = ?1");
    let result = conn.query_row(&q, [id.to_string()], Media::from_row);
    match result {
        Ok(m) => Ok(Some(m)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Point a record at a file under the media directory and drop its inline
/// bytes.
///
/// This is the record-rewrite half of an inline-to-filesystem migration; the
/// caller has already written the bytes to `filename`. Returns `false` when
/// no record has the given ID.
pub fn relocate_to_filesystem(conn: &Connection, id: MediaId, filename: &str) -> Result<bool> {
    let changed = conn
        .execute(
            "UPDATE media SET storage = 'filesystem', filename = ?1, data = NULL WHERE id = ?2",
            rusqlite::params![filename, id.to_string()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(changed > 0)
}
