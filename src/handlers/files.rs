use axum::{
    Extension,
    body::Body,
    extract::State,
    http::header,
    response::Response,
};
use tokio_util::io::ReaderStream;

use crate::{
    error::{AppError, Result},
    models::session::CurrentUser,
    state::AppState,
};

/// Streams the protected document to an authenticated user.
///
/// The path served comes from configuration alone; nothing in the request
/// selects the file.
#[axum::debug_handler]
pub async fn download(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Response> {
    tracing::info!("📥 Download for user: {}", current.user_id);

    let path = &state.config.download_file;

    let mime = infer::get_from_path(path)
        .ok()
        .flatten()
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream");

    let file = tokio::fs::File::open(path).await.map_err(|e| {
        tracing::error!("❌ Failed to open protected file {}: {}", path.display(), e);
        match e.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound,
            _ => AppError::Io(e),
        }
    })?;

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download");
    let disposition = format!("attachment; filename=\"{}\"", filename);

    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .header(header::CONTENT_TYPE, mime)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(body)
        .map_err(|e| AppError::Internal(format!("Response build failed: {}", e)))
}
