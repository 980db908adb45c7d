use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::errors::AppError;
use crate::models::IntentRequest;
use crate::services::dialog;
use crate::state::AppState;

const SIGNATURE_HEADER: &str = "x-dialog-signature";

fn validate_signature(secret: &str, signature: &str, body: &[u8]) -> bool {
    let mut mac = match Hmac::<Sha1>::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(body);
    let expected = base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes());

    expected == signature
}

pub async fn dialog_turn(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Verify the front end's body signature (skip if no secret — dev mode).
    if !state.config.dialog_signing_secret.is_empty() {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if signature.is_empty() {
            tracing::warn!("missing {SIGNATURE_HEADER} header");
            return (StatusCode::FORBIDDEN, "Missing signature").into_response();
        }

        if !validate_signature(&state.config.dialog_signing_secret, signature, &body) {
            tracing::warn!("invalid dialog signature");
            return (StatusCode::FORBIDDEN, "Invalid signature").into_response();
        }
    }

    let event: IntentRequest = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "malformed dialog event");
            return AppError::InvalidRequest(e.to_string()).into_response();
        }
    };

    tracing::info!(
        bot = %event.bot.name,
        user = %event.user_id,
        intent = %event.current_intent.name,
        "incoming dialog turn"
    );

    match dialog::dispatch(&state, event).await {
        Ok(directive) => Json(directive).into_response(),
        Err(e) => e.into_response(),
    }
}
