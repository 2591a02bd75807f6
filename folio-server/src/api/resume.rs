//! Resume download

use axum::{routing::get, Router};
use std::path::Path;
use tower_http::services::ServeFile;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /resume.pdf
///
/// Served from disk when configured (404 if the file is missing), otherwise
/// always 404.
pub fn resume_routes(path: Option<&Path>) -> Router<AppState> {
    match path {
        Some(path) => Router::new().route_service("/resume.pdf", ServeFile::new(path)),
        None => Router::new().route("/resume.pdf", get(resume_not_configured)),
    }
}

async fn resume_not_configured() -> ApiResult<()> {
    Err(ApiError::NotFound("resume.pdf".to_string()))
}
