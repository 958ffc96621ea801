//! Request and response bodies for the payment endpoints.

use crate::objects::{PaymentStatus, WebhookStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `POST /payments/initialize` — the payer is the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializePaymentRequest {
    pub event_id: Uuid,
    pub ticket_id: Uuid,
}

/// Payment intent as returned after a successful gateway call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub reference: String,
    /// Redirect target where the payer completes the payment.
    pub authorization_url: String,
    /// Gateway minor units (ticket price × 100).
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub webhook_status: WebhookStatus,
}

/// Body of the gateway's asynchronous confirmation callback.
///
/// Only `event` and `data.reference` are interpreted; the full payload is
/// stored verbatim against the payment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayWebhookPayload {
    /// Gateway event name, e.g. "charge.success".
    pub event: String,
    pub data: GatewayWebhookData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayWebhookData {
    pub reference: String,
    #[serde(default)]
    pub status: Option<String>,
}
