//! Media-domain types: storage kinds, storage locations, and the read-only
//! record the metadata store hands to the streamer.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ids::MediaId;

/// Content type used when a record carries none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// ---------------------------------------------------------------------------
// StorageKind
// ---------------------------------------------------------------------------

/// Where the bytes of a media asset live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// A file under the configured media directory.
    Filesystem,
    /// Legacy mode: bytes stored inside the metadata record.
    Inline,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filesystem => write!(f, "filesystem"),
            Self::Inline => write!(f, "inline"),
        }
    }
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filesystem" => Ok(Self::Filesystem),
            "inline" => Ok(Self::Inline),
            other => Err(format!("unknown storage kind: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// StorageLocation
// ---------------------------------------------------------------------------

/// Resolved location of a media asset's bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    /// File name relative to the media directory.
    Filesystem(PathBuf),
    /// The raw bytes, held in memory.
    Inline(Bytes),
}

impl StorageLocation {
    pub fn kind(&self) -> StorageKind {
        match self {
            Self::Filesystem(_) => StorageKind::Filesystem,
            Self::Inline(_) => StorageKind::Inline,
        }
    }
}

// ---------------------------------------------------------------------------
// MediaRecord
// ---------------------------------------------------------------------------

/// Snapshot of a media asset's metadata, taken once per request.
///
/// `location` is `None` when the record exists but no backing bytes are
/// known. The total size is not stored here; it is measured by the byte
/// source when the request starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    pub id: MediaId,
    pub content_type: Option<String>,
    pub location: Option<StorageLocation>,
}

impl MediaRecord {
    /// The record's content type, or [`DEFAULT_CONTENT_TYPE`] when empty.
    pub fn content_type(&self) -> &str {
        match self.content_type.as_deref() {
            Some(ct) if !ct.is_empty() => ct,
            _ => DEFAULT_CONTENT_TYPE,
        }
    }

    /// Whether byte-range requests are honoured for this record.
    pub fn is_video(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("video/"))
    }

    pub fn storage_kind(&self) -> Option<StorageKind> {
        self.location.as_ref().map(StorageLocation::kind)
    }
}
