//! Payment handlers.
//!
//! # Endpoints
//!
//! - `POST /payments/initialize` – create a payment intent (authenticated)
//! - `POST /payments/webhook`    – gateway confirmation callback (HMAC)

use crate::api::error_response;
use crate::api::extractors::AuthRejection;
use crate::state::AppState;
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use evently_core::entities::payments::Payment;
use evently_core::gateways::payment::GatewayError;
use evently_core::workflows::payments::{PaymentError, PaymentSettings, PaymentWorkflow};
use evently_sdk::objects::payments::PaymentResponse;

mod initialize;
mod webhook;

/// Build the payments router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/initialize", post(initialize::initialize_payment))
        .route("/webhook", post(webhook::gateway_webhook))
}

/// Construct the workflow with the currently configured gateway settings.
async fn workflow(state: &AppState) -> PaymentWorkflow {
    let payment = state.config.payment.read().await;
    let settings = PaymentSettings {
        currency: payment.currency.clone(),
        callback_url: payment.callback_url.clone(),
    };
    drop(payment);
    PaymentWorkflow::new(state.db.clone(), state.payment_gateway.clone(), settings)
}

/// Convert a `Payment` (DB model) into a `PaymentResponse` (API model).
fn to_response(payment: Payment) -> PaymentResponse {
    PaymentResponse {
        id: payment.id,
        reference: payment.reference,
        authorization_url: payment.authorization_url,
        amount: payment.amount,
        currency: payment.currency,
        status: payment.status.into(),
        webhook_status: payment.webhook_status.into(),
    }
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in payment handlers.
#[derive(Debug)]
enum PaymentApiError {
    Auth(AuthRejection),
    /// Workflow rejected the operation.
    Workflow(PaymentError),
    /// Webhook signature missing or wrong.
    BadSignature,
    /// Webhook body is not the expected shape.
    MalformedPayload,
}

impl From<AuthRejection> for PaymentApiError {
    fn from(rejection: AuthRejection) -> Self {
        PaymentApiError::Auth(rejection)
    }
}

impl From<PaymentError> for PaymentApiError {
    fn from(err: PaymentError) -> Self {
        PaymentApiError::Workflow(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        match self {
            PaymentApiError::Auth(rejection) => rejection.into_response(),
            PaymentApiError::Workflow(err) => workflow_error_response(err),
            PaymentApiError::BadSignature => {
                error_response(StatusCode::UNAUTHORIZED, "Webhook signature is invalid")
            }
            PaymentApiError::MalformedPayload => {
                error_response(StatusCode::BAD_REQUEST, "Webhook payload is malformed")
            }
        }
    }
}

fn workflow_error_response(err: PaymentError) -> Response {
    match err {
        PaymentError::UserNotFound
        | PaymentError::EventNotFound
        | PaymentError::TicketNotFound
        | PaymentError::UnknownReference => error_response(StatusCode::NOT_FOUND, err.to_string()),
        PaymentError::Gateway(gateway) => gateway_error_response(gateway),
        PaymentError::Database(e) => {
            tracing::error!(error = %e, "Payment database error");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn gateway_error_response(err: GatewayError) -> Response {
    match err {
        GatewayError::Declined(message) => {
            tracing::warn!(message, "Payment gateway declined initialization");
            error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to initialize payment with the gateway",
            )
        }
        GatewayError::Request(e) => {
            tracing::error!(error = %e, "Payment gateway request failed");
            error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to initialize payment with the gateway",
            )
        }
        GatewayError::BadResponse(detail) => {
            tracing::error!(detail, "Payment gateway returned an unreadable response");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected error during payment initialization",
            )
        }
    }
}
