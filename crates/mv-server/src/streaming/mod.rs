//! Range-aware media streaming.
//!
//! [`MediaStreamer`] turns a [`MediaRecord`] and an optional `Range` header
//! into a complete HTTP response:
//!
//! - the record's location picks a [`ByteSource`] (file on disk or legacy
//!   inline buffer) and fixes the total size for the whole response,
//! - [`RangePlan`] decides between 200, 206 and 416,
//! - the planned span is streamed from the source into the body.

pub mod range;
pub mod source;

pub use range::{parse_range_header, RangePlan, RangeRequest};
pub use source::{ByteSource, ByteSpan, ByteStream, FileSource, InlineSource};

use std::path::{Component, Path, PathBuf};

use axum::body::Body;
use axum::http::header;
use axum::response::Response;
use mv_core::config::StorageConfig;
use mv_core::{Error, MediaRecord, Result, StorageLocation};

/// Serves media records, resolving filesystem locations against a fixed
/// media directory.
#[derive(Debug, Clone)]
pub struct MediaStreamer {
    media_dir: PathBuf,
    chunk_size: usize,
    cache_control: String,
}

impl MediaStreamer {
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            media_dir: storage.media_dir.clone(),
            chunk_size: storage.effective_chunk_size(),
            cache_control: storage.cache_control(),
        }
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Open the byte source behind a record.
    pub async fn open_source(&self, record: &MediaRecord) -> Result<Box<dyn ByteSource>> {
        match &record.location {
            Some(StorageLocation::Filesystem(name)) => {
                let path = self.resolve_path(name).ok_or_else(|| {
                    tracing::warn!(
                        media_id = %record.id,
                        location = %name.display(),
                        "Refusing media location outside the media directory"
                    );
                    Error::media_file_not_found()
                })?;
                let source = FileSource::new(&path, self.chunk_size).await?;
                Ok(Box::new(source))
            }
            Some(StorageLocation::Inline(data)) => Ok(Box::new(InlineSource::new(data.clone()))),
            None => Err(Error::media_data_not_available()),
        }
    }

    /// Build the response for `record`, honouring `range_header` on video.
    pub async fn serve(&self, record: &MediaRecord, range_header: Option<&str>) -> Result<Response> {
        let source = self.open_source(record).await?;
        let size = source.size();
        let plan = RangePlan::resolve(record.is_video(), range_header, size);

        tracing::debug!(
            media_id = %record.id,
            storage = %source.kind(),
            size,
            status = plan.status().as_u16(),
            "Serving media"
        );

        let mut builder = Response::builder()
            .status(plan.status())
            .header(header::CONTENT_TYPE, record.content_type())
            .header(header::CACHE_CONTROL, self.cache_control.as_str());

        if let Some(content_range) = plan.content_range() {
            builder = builder
                .header(header::CONTENT_RANGE, content_range)
                .header(header::ACCEPT_RANGES, "bytes");
        }

        let body = match plan.span() {
            Some(span) => {
                builder = builder.header(header::CONTENT_LENGTH, span.length.to_string());
                Body::from_stream(source.open(span).await?)
            }
            None => Body::empty(),
        };

        builder
            .body(body)
            .map_err(|e| Error::Internal(format!("Failed to build media response: {e}")))
    }

    /// Join a stored file name onto the media directory.
    ///
    /// Only plain relative names are accepted; absolute paths and `..` or
    /// `.` components yield `None`.
    fn resolve_path(&self, name: &Path) -> Option<PathBuf> {
        let mut components = name.components().peekable();
        components.peek()?;
        if components.all(|c| matches!(c, Component::Normal(_))) {
            Some(self.media_dir.join(name))
        } else {
            None
        }
    }
}
