//! Metadata lookup.
//!
//! The streamer only needs a [`MediaRecord`] snapshot per request;
//! [`MetadataResolver`] is the seam that supplies it.

use async_trait::async_trait;
use mv_core::{Error, MediaId, MediaRecord, Result};
use mv_db::models::Media;
use mv_db::pool::{get_conn, DbPool};
use mv_db::queries::media;

/// Looks up media records by identifier.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Return the record for `id`, or `None` when no such media exists.
    async fn resolve(&self, id: MediaId) -> Result<Option<MediaRecord>>;
}

/// Resolver backed by the SQLite `media` table.
#[derive(Clone)]
pub struct SqliteResolver {
    db: DbPool,
}

impl SqliteResolver {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MetadataResolver for SqliteResolver {
    async fn resolve(&self, id: MediaId) -> Result<Option<MediaRecord>> {
        let db = self.db.clone();

        // rusqlite is blocking; keep it off the async workers.
        tokio::task::spawn_blocking(move || -> Result<Option<MediaRecord>> {
            let conn = get_conn(&db)?;
            Ok(media::get_media(&conn, id)?.map(Media::into_record))
        })
        .await
        .map_err(|e| Error::Internal(format!("spawn_blocking join error: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mv_core::StorageKind;
    use mv_db::pool::init_memory_pool;

    #[tokio::test]
    async fn resolves_inline_record() {
        let db = init_memory_pool().unwrap();
        let created = {
            let conn = get_conn(&db).unwrap();
            media::create_inline_media(&conn, Some("video/mp4"), None, b"0123456789").unwrap()
        };

        let resolver = SqliteResolver::new(db);
        let record = resolver.resolve(created.id).await.unwrap().unwrap();
        assert_eq!(record.id, created.id);
        assert_eq!(record.content_type(), "video/mp4");
        assert_eq!(record.storage_kind(), Some(StorageKind::Inline));
    }

    #[tokio::test]
    async fn resolves_filesystem_record() {
        let db = init_memory_pool().unwrap();
        let created = {
            let conn = get_conn(&db).unwrap();
            media::create_filesystem_media(&conn, Some("image/png"), Some("p.png"), "p.png").unwrap()
        };

        let record = SqliteResolver::new(db).resolve(created.id).await.unwrap().unwrap();
        assert_eq!(record.storage_kind(), Some(StorageKind::Filesystem));
    }

    #[tokio::test]
    async fn unknown_id_resolves_to_none() {
        let resolver = SqliteResolver::new(init_memory_pool().unwrap());
        assert!(resolver.resolve(MediaId::new()).await.unwrap().is_none());
    }
}
