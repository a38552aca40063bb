//! Unified error type for mediavault.
//!
//! Every crate funnels its failures into [`Error`]. The HTTP layer derives a
//! status code via [`Error::http_status`] and renders the `Display` text as
//! the client-facing message, so the not-found messages below are part of
//! the public contract.

/// Message for an identifier with no metadata record.
pub const MEDIA_NOT_FOUND: &str = "Media not found";
/// Message for a filesystem record whose file is gone.
pub const MEDIA_FILE_NOT_FOUND: &str = "Media file not found on disk";
/// Message for a record with neither a file nor inline bytes.
pub const MEDIA_DATA_NOT_AVAILABLE: &str = "Media data not available";

/// Unified error type covering all failure modes in mediavault.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested media (or its backing bytes) could not be found.
    #[error("{message}")]
    NotFound {
        /// Client-facing description of what is missing.
        message: String,
    },

    /// Input data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A database operation failed.
    #[error("Database error: {source}")]
    Database {
        /// The underlying database error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::Validation(_) => 400,
            Error::Database { .. } => 500,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    /// No metadata record exists for the identifier.
    pub fn media_not_found() -> Self {
        Self::not_found(MEDIA_NOT_FOUND)
    }

    /// The record points at a file that is missing from the media directory.
    pub fn media_file_not_found() -> Self {
        Self::not_found(MEDIA_FILE_NOT_FOUND)
    }

    /// The record has no file location and no inline bytes.
    pub fn media_data_not_available() -> Self {
        Self::not_found(MEDIA_DATA_NOT_AVAILABLE)
    }

    /// Convenience constructor for [`Error::Database`].
    pub fn database(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Database {
            source: source.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_not_found_display() {
        let err = Error::media_not_found();
        assert_eq!(err.to_string(), "Media not found");
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn media_file_not_found_display() {
        let err = Error::media_file_not_found();
        assert_eq!(err.to_string(), "Media file not found on disk");
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn media_data_not_available_display() {
        let err = Error::media_data_not_available();
        assert_eq!(err.to_string(), "Media data not available");
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn validation_display() {
        let err = Error::Validation("port is required".into());
        assert_eq!(err.to_string(), "Validation error: port is required");
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn database_display() {
        let err = Error::database("connection refused");
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.to_string(), "IO error: denied");
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn internal_display() {
        let err = Error::Internal("unexpected state".into());
        assert_eq!(err.to_string(), "Internal error: unexpected state");
        assert_eq!(err.http_status(), 500);
    }
}
