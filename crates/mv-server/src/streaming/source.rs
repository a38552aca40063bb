//! Backend-agnostic byte sources.
//!
//! A [`ByteSource`] knows the total size of a media asset and can stream any
//! interval of it. [`FileSource`] reads from disk in bounded chunks;
//! [`InlineSource`] slices a legacy in-memory buffer without copying.

use std::io::SeekFrom;
use std::path::Path;

use bytes::Bytes;
use futures::future::BoxFuture;
use futures::stream::{self, BoxStream};
use futures::{FutureExt, StreamExt};
use mv_core::{Error, Result, StorageKind};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

/// Stream of body chunks produced by a [`ByteSource`].
pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// A contiguous interval of a resource, as an offset and a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSpan {
    pub start: u64,
    pub length: u64,
}

impl ByteSpan {
    /// The whole of a resource of `size` bytes.
    pub fn full(size: u64) -> Self {
        Self { start: 0, length: size }
    }

    /// The inclusive interval `[start, end]`. Requires `start <= end`.
    pub fn inclusive(start: u64, end: u64) -> Self {
        Self {
            start,
            length: end - start + 1,
        }
    }
}

/// Something that can stream an interval of a media asset.
pub trait ByteSource: Send {
    /// Which backend holds the bytes.
    fn kind(&self) -> StorageKind;

    /// Total size, measured once when the source was opened.
    fn size(&self) -> u64;

    /// Start streaming `span`. The span must lie within `size()`.
    ///
    /// Any underlying handle moves into the returned stream and is released
    /// when the stream is dropped.
    fn open(self: Box<Self>, span: ByteSpan) -> BoxFuture<'static, Result<ByteStream>>;
}

// ---------------------------------------------------------------------------
// FileSource
// ---------------------------------------------------------------------------

/// A media file on disk.
#[derive(Debug)]
pub struct FileSource {
    file: File,
    size: u64,
    chunk_size: usize,
}

impl FileSource {
    /// Open `path` and capture its size.
    ///
    /// A missing path, or one that is not a regular file, is reported as
    /// "Media file not found on disk". Other failures are I/O errors.
    pub async fn new(path: &Path, chunk_size: usize) -> Result<Self> {
        let file = match File::open(path).await {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::media_file_not_found());
            }
            Err(e) => return Err(e.into()),
        };

        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(Error::media_file_not_found());
        }

        Ok(Self {
            file,
            size: metadata.len(),
            chunk_size,
        })
    }
}

impl ByteSource for FileSource {
    fn kind(&self) -> StorageKind {
        StorageKind::Filesystem
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn open(self: Box<Self>, span: ByteSpan) -> BoxFuture<'static, Result<ByteStream>> {
        async move {
            let FileSource {
                mut file,
                chunk_size,
                ..
            } = *self;

            file.seek(SeekFrom::Start(span.start)).await?;

            // Take caps reads at exactly `span.length` bytes.
            let limited = file.take(span.length);
            Ok::<ByteStream, Error>(ReaderStream::with_capacity(limited, chunk_size).boxed())
        }
        .boxed()
    }
}

// ---------------------------------------------------------------------------
// InlineSource
// ---------------------------------------------------------------------------

/// Bytes stored directly in the metadata record.
#[derive(Debug, Clone)]
pub struct InlineSource {
    data: Bytes,
}

impl InlineSource {
    pub fn new(data: Bytes) -> Self {
        Self { data }
    }
}

impl ByteSource for InlineSource {
    fn kind(&self) -> StorageKind {
        StorageKind::Inline
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn open(self: Box<Self>, span: ByteSpan) -> BoxFuture<'static, Result<ByteStream>> {
        let start = usize::try_from(span.start);
        let end = usize::try_from(span.start + span.length);

        let result: Result<ByteStream> = match (start, end) {
            (Ok(start), Ok(end)) if end <= self.data.len() => {
                let chunk = self.data.slice(start..end);
                Ok(stream::once(async move { Ok::<_, std::io::Error>(chunk) }).boxed())
            }
            _ => Err(Error::Internal(format!(
                "span {}+{} outside inline buffer of {} bytes",
                span.start,
                span.length,
                self.data.len()
            ))),
        };

        futures::future::ready(result).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    async fn collect(stream: ByteStream) -> Vec<u8> {
        let chunks: Vec<Bytes> = stream.try_collect().await.unwrap();
        chunks.concat()
    }

    fn sample(len: usize) -> Vec<u8> {
        (0..=255u8).cycle().take(len).collect()
    }

    #[test]
    fn span_constructors() {
        assert_eq!(ByteSpan::full(10), ByteSpan { start: 0, length: 10 });
        assert_eq!(ByteSpan::inclusive(200, 299), ByteSpan { start: 200, length: 100 });
        assert_eq!(ByteSpan::inclusive(5, 5).length, 1);
    }

    #[tokio::test]
    async fn file_source_streams_span() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        let data = sample(1000);
        std::fs::write(&path, &data).unwrap();

        let source = FileSource::new(&path, 64).await.unwrap();
        assert_eq!(source.size(), 1000);
        assert_eq!(source.kind(), StorageKind::Filesystem);

        let stream = Box::new(source).open(ByteSpan::inclusive(200, 299)).await.unwrap();
        assert_eq!(collect(stream).await, &data[200..300]);
    }

    #[tokio::test]
    async fn file_source_streams_whole_file_in_small_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        let data = sample(5000);
        std::fs::write(&path, &data).unwrap();

        let source = FileSource::new(&path, 16).await.unwrap();
        let mut stream = Box::new(source).open(ByteSpan::full(5000)).await.unwrap();

        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.unwrap();
            assert!(chunk.len() <= 16);
            out.extend_from_slice(&chunk);
        }
        assert_eq!(out, data);
    }

    #[tokio::test]
    async fn file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(&dir.path().join("gone.mp4"), 64)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Media file not found on disk");
    }

    #[tokio::test]
    async fn file_source_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path(), 64).await.unwrap_err();
        assert_eq!(err.to_string(), "Media file not found on disk");
    }

    #[tokio::test]
    async fn inline_source_slices_span() {
        let data = sample(1000);
        let source = InlineSource::new(Bytes::from(data.clone()));
        assert_eq!(source.size(), 1000);
        assert_eq!(source.kind(), StorageKind::Inline);

        let stream = Box::new(source).open(ByteSpan::inclusive(900, 999)).await.unwrap();
        assert_eq!(collect(stream).await, &data[900..1000]);
    }

    #[tokio::test]
    async fn inline_source_empty_buffer() {
        let source = InlineSource::new(Bytes::new());
        let stream = Box::new(source).open(ByteSpan::full(0)).await.unwrap();
        assert!(collect(stream).await.is_empty());
    }

    #[tokio::test]
    async fn inline_source_span_out_of_bounds() {
        let source = InlineSource::new(Bytes::from_static(b"abc"));
        let result = Box::new(source).open(ByteSpan { start: 2, length: 5 }).await;
        assert!(matches!(result, Err(Error::Internal(_))));
    }

    #[tokio::test]
    async fn file_source_stream_dropped_midway() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        let data = sample(4096);
        std::fs::write(&path, &data).unwrap();

        let source = FileSource::new(&path, 256).await.unwrap();
        let mut stream = Box::new(source).open(ByteSpan::full(4096)).await.unwrap();
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(&first[..], &data[..256]);
        drop(stream);

        // The handle went with the stream; the file can be replaced and served anew.
        std::fs::remove_file(&path).unwrap();
        std::fs::write(&path, &data[..100]).unwrap();
        let source = FileSource::new(&path, 256).await.unwrap();
        assert_eq!(source.size(), 100);
        let stream = Box::new(source).open(ByteSpan::full(100)).await.unwrap();
        assert_eq!(collect(stream).await, &data[..100]);
    }
}
