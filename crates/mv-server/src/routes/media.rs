//! Media delivery route.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::Response;
use mv_core::MediaId;

use crate::context::AppContext;
use crate::error::AppError;

/// GET /api/media/{id}
///
/// Serves a media asset from whichever backend holds it. A `Range` header
/// is honoured for video content only.
pub async fn get_media(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    // An identifier that is not a valid ID cannot name any record.
    let id: MediaId = id
        .parse()
        .map_err(|_| mv_core::Error::media_not_found())?;

    let record = ctx
        .resolver
        .resolve(id)
        .await?
        .ok_or_else(mv_core::Error::media_not_found)?;

    let range_header = headers.get(header::RANGE).and_then(|v| v.to_str().ok());

    Ok(ctx.streamer.serve(&record, range_header).await?)
}
