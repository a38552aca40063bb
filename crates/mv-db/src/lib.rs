//! mv-db: database access for media metadata.
//!
//! SQLite-backed storage with connection pooling, embedded migrations, the
//! media row model, and the queries the streamer and migration tooling rely
//! on.

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
