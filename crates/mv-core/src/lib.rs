//! mv-core: shared types, IDs, errors, and configuration.
//!
//! This crate is the foundational dependency for the other mv-* crates,
//! providing the typed media identifier, a unified error type, the media
//! record handed from the metadata store to the streamer, and application
//! configuration.

pub mod config;
pub mod error;
pub mod ids;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::*;
pub use media::*;
