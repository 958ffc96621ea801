use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use evently_core::gateways::payment::verify_webhook_signature;
use evently_sdk::objects::payments::GatewayWebhookPayload;

use super::{PaymentApiError, to_response, workflow};
use crate::api::success;
use crate::state::AppState;

const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// `POST /payments/webhook` — the gateway's asynchronous confirmation.
///
/// The signature is verified over the raw body before anything is parsed.
/// This is the only path that advances a payment past `pending`.
pub(super) async fn gateway_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, PaymentApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(PaymentApiError::BadSignature)?;

    let secret = state.config.payment.read().await.secret_key.clone();
    if !verify_webhook_signature(secret.as_bytes(), &body, signature) {
        return Err(PaymentApiError::BadSignature);
    }

    let payload: GatewayWebhookPayload =
        serde_json::from_slice(&body).map_err(|_| PaymentApiError::MalformedPayload)?;
    let raw: serde_json::Value =
        serde_json::from_slice(&body).map_err(|_| PaymentApiError::MalformedPayload)?;

    let payment = workflow(&state)
        .await
        .record_webhook(&payload.data.reference, &payload.event, raw)
        .await?;

    tracing::info!(
        reference = %payment.reference,
        status = ?payment.status,
        "Webhook recorded"
    );
    Ok(success(
        StatusCode::OK,
        "Webhook received",
        to_response(payment),
    ))
}
