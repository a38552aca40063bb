//! Database query modules.

pub mod media;
