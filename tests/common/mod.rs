//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which owns an in-memory metadata DB and a
//! temporary media directory. [`TestHarness::with_server`] starts the full
//! router on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use mv_core::config::Config;
use mv_core::MediaId;
use mv_db::pool::{get_conn, init_memory_pool, DbPool, PooledConnection};
use mv_db::queries::media;
use mv_server::context::AppContext;
use mv_server::router::build_router;

/// Test harness wrapping a metadata DB and a media directory.
pub struct TestHarness {
    pub db: DbPool,
    pub config: Config,
    media_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        let media_dir = tempfile::tempdir().expect("failed to create media dir");
        let mut config = Config::default();
        config.storage.media_dir = media_dir.path().to_path_buf();
        config.storage.read_chunk_size = 256;

        let db = init_memory_pool().expect("failed to create in-memory pool");

        Self {
            db,
            config,
            media_dir,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = build_router(AppContext::new(&harness.config, harness.db.clone()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    pub fn conn(&self) -> PooledConnection {
        get_conn(&self.db).expect("failed to get connection")
    }

    pub fn write_file(&self, name: &str, data: &[u8]) {
        std::fs::write(self.media_dir.path().join(name), data).expect("failed to write media");
    }

    /// Register a filesystem-backed record and write its bytes.
    pub fn insert_file_media(&self, mime_type: &str, data: &[u8]) -> MediaId {
        let filename = format!("{}.bin", MediaId::new());
        self.write_file(&filename, data);
        media::create_filesystem_media(&self.conn(), Some(mime_type), None, &filename)
            .expect("failed to insert media")
            .id
    }

    /// Register a legacy record carrying its bytes inline.
    pub fn insert_inline_media(&self, mime_type: &str, data: &[u8]) -> MediaId {
        media::create_inline_media(&self.conn(), Some(mime_type), None, data)
            .expect("failed to insert media")
            .id
    }
}

/// Deterministic, non-repeating-within-256 test bytes.
pub fn sample(len: usize) -> Vec<u8> {
    (0..=255u8).cycle().take(len).collect()
}

pub fn media_url(addr: SocketAddr, id: impl std::fmt::Display) -> String {
    format!("http://{addr}/api/media/{id}")
}
