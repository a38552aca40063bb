//! `Range` header parsing and response planning.
//!
//! Only single `bytes=START-END` ranges on video content are honoured; every
//! other request is served whole.

use axum::http::StatusCode;

use super::source::ByteSpan;

/// A parsed `Range: bytes=START-[END]` header. `end` is inclusive and `None`
/// for open ranges like `bytes=500-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRequest {
    pub start: u64,
    pub end: Option<u64>,
}

/// Parse a `Range` header value.
///
/// The value must start with `bytes=`; the remainder is split on `-` and the
/// first two parts are read as start and end. A missing or empty end means
/// "to the end of the resource"; an overflowing bound reads as `u64::MAX`.
/// Returns `None` for anything else, including
/// suffix ranges (`bytes=-500`) and multi-range lists.
pub fn parse_range_header(value: &str) -> Option<RangeRequest> {
    let ranges = value.strip_prefix("bytes=")?;
    let mut parts = ranges.split('-');

    let start = parse_bound(parts.next()?.trim())?;
    let end = match parts.next().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(parse_bound(s)?),
    };

    Some(RangeRequest { start, end })
}

/// Read one bound. Digit strings too large for `u64` saturate, so they still
/// fail the bounds check instead of being mistaken for a malformed header.
fn parse_bound(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.parse().unwrap_or(u64::MAX))
}

/// How a single request will be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePlan {
    /// 200 with the whole resource.
    Full { size: u64 },
    /// 206 with the inclusive interval `[start, end]`.
    Partial { start: u64, end: u64, size: u64 },
    /// 416, no body. `Content-Range: bytes */size` is not sent.
    Unsatisfiable { size: u64 },
}

impl RangePlan {
    /// Decide the response shape for a resource of `size` bytes.
    ///
    /// The range header is only consulted for video content; an unparseable
    /// header is ignored. A range is unsatisfiable when either bound is at or
    /// past `size`, or when `start > end`.
    pub fn resolve(is_video: bool, range_header: Option<&str>, size: u64) -> Self {
        let request = match range_header {
            Some(value) if is_video => parse_range_header(value),
            _ => None,
        };

        let Some(RangeRequest { start, end }) = request else {
            return RangePlan::Full { size };
        };

        if start >= size {
            return RangePlan::Unsatisfiable { size };
        }

        let end = end.unwrap_or(size - 1);
        if end >= size || start > end {
            return RangePlan::Unsatisfiable { size };
        }

        RangePlan::Partial { start, end, size }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RangePlan::Full { .. } => StatusCode::OK,
            RangePlan::Partial { .. } => StatusCode::PARTIAL_CONTENT,
            RangePlan::Unsatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
        }
    }

    /// Bytes to transfer, or `None` when the response has no body.
    pub fn span(&self) -> Option<ByteSpan> {
        match *self {
            RangePlan::Full { size } => Some(ByteSpan::full(size)),
            RangePlan::Partial { start, end, .. } => Some(ByteSpan::inclusive(start, end)),
            RangePlan::Unsatisfiable { .. } => None,
        }
    }

    /// `Content-Range` value for partial responses.
    pub fn content_range(&self) -> Option<String> {
        match self {
            RangePlan::Partial { start, end, size } => Some(format!("bytes {start}-{end}/{size}")),
            _ => None,
        }
    }
}
