//! folio-server library - portfolio contact endpoint
//!
//! Serves `POST /contact`, the resume download and the usual health and
//! build-info endpoints. Submissions are logged and, when an email relay is
//! configured, forwarded to it.

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use folio_common::api::types::{ContactResponse, MSG_PROCESSING_ERROR};
use folio_common::email::EmailDelivery;

pub mod api;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Outbound relay for accepted submissions
#[derive(Clone)]
pub struct EmailRelay {
    pub delivery: Arc<dyn EmailDelivery>,
    /// Mailbox that receives contact messages
    pub to_email: String,
}

/// Application state shared across HTTP handlers
#[derive(Clone, Default)]
pub struct AppState {
    /// Relay target; `None` means submissions are only logged
    pub relay: Option<EmailRelay>,
    /// Static resume served at `/resume.pdf`
    pub resume_path: Option<PathBuf>,
    /// CORS origins; empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl AppState {
    /// Log-only state with no resume and permissive CORS
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_relay(
        mut self,
        delivery: Arc<dyn EmailDelivery>,
        to_email: impl Into<String>,
    ) -> Self {
        self.relay = Some(EmailRelay {
            delivery,
            to_email: to_email.into(),
        });
        self
    }

    pub fn with_resume(mut self, path: impl Into<PathBuf>) -> Self {
        self.resume_path = Some(path.into());
        self
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        .merge(api::contact_routes())
        .merge(api::resume_routes(state.resume_path.as_deref()))
        .merge(api::health_routes())
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// 500 envelope for a panicking handler
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ContactResponse::failure(MSG_PROCESSING_ERROR)),
    )
        .into_response()
}
