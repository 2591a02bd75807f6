//! Contact form endpoint

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{routing::post, Json, Router};
use tracing::{info, warn};

use folio_common::api::types::{ContactRequest, ContactResponse, MSG_THANK_YOU};
use folio_common::email::OutboundEmail;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /contact
///
/// Validates, logs the submission and relays it when a relay is configured.
/// Missing fields and implausible addresses are 400; a failed relay is 500.
pub async fn handle_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> ApiResult<Json<ContactResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected contact request body");
        ApiError::BadRequest("Invalid request body".to_string())
    })?;

    let contact = request.validate().map_err(|e| {
        info!(reason = %e, "Contact submission failed validation");
        ApiError::Validation(e)
    })?;

    info!(
        name = %contact.name,
        email = %contact.email,
        body = %contact.message,
        "Contact form submission"
    );

    if let Some(relay) = &state.relay {
        let email = OutboundEmail::new(&contact, &relay.to_email);
        relay.delivery.send(&email).await?;
        info!(delivery = relay.delivery.name(), "Contact submission relayed");
    }

    Ok(Json(ContactResponse::ok(MSG_THANK_YOU)))
}

/// Routes for the contact endpoint (also mounted under `/api`)
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(handle_contact))
        .route("/api/contact", post(handle_contact))
}
