//! Application context shared by all request handlers (via Axum state).

use std::sync::Arc;

use mv_core::config::Config;
use mv_db::pool::DbPool;

use crate::resolver::{MetadataResolver, SqliteResolver};
use crate::streaming::MediaStreamer;

/// Request-independent state. Cheap to clone; everything lives behind `Arc`
/// and nothing in it is mutated after start-up.
#[derive(Clone)]
pub struct AppContext {
    /// Metadata lookup, queried once per request.
    pub resolver: Arc<dyn MetadataResolver>,
    /// Range-aware streamer configured with the media directory.
    pub streamer: Arc<MediaStreamer>,
}

impl AppContext {
    /// Build a context that resolves metadata from the given database.
    pub fn new(config: &Config, db: DbPool) -> Self {
        Self::with_resolver(config, Arc::new(SqliteResolver::new(db)))
    }

    /// Build a context around any resolver implementation.
    pub fn with_resolver(config: &Config, resolver: Arc<dyn MetadataResolver>) -> Self {
        Self {
            resolver,
            streamer: Arc::new(MediaStreamer::new(&config.storage)),
        }
    }
}
