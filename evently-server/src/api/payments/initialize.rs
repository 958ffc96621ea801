use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use evently_sdk::objects::payments::InitializePaymentRequest;

use super::{PaymentApiError, to_response, workflow};
use crate::api::extractors::CurrentUser;
use crate::api::success;
use crate::state::AppState;

/// `POST /payments/initialize` — create a payment intent.
///
/// The gateway is asked first; the Payment row only exists after the
/// gateway accepts, so a declined call leaves no pending rows behind.
pub(super) async fn initialize_payment(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(body): Json<InitializePaymentRequest>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let payment = workflow(&state)
        .await
        .initialize(caller.0.id, body.event_id, body.ticket_id)
        .await?;

    Ok(success(
        StatusCode::CREATED,
        "Payment initialized successfully",
        to_response(payment),
    ))
}
