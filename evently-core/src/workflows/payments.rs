//! Payment-intent creation and webhook recording.
//!
//! The gateway is asked first; the Payment row is only written after the
//! gateway accepts. A declined or failed gateway call therefore leaves no
//! trace in storage.

use crate::entities::events::Event;
use crate::entities::payments::{Payment, PaymentInsert};
use crate::entities::ticket_prices::TicketPrice;
use crate::entities::users::User;
use crate::entities::{PaymentStatus, WebhookStatus};
use crate::gateways::payment::{GatewayError, InitializeRequest, PaymentGateway};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("User does not exist")]
    UserNotFound,

    #[error("Event does not exist")]
    EventNotFound,

    #[error("Ticket does not exist")]
    TicketNotFound,

    #[error("No payment matches that reference")]
    UnknownReference,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSettings {
    pub currency: String,
    pub callback_url: String,
}

pub struct PaymentWorkflow {
    pool: PgPool,
    gateway: Arc<dyn PaymentGateway>,
    settings: PaymentSettings,
}

impl PaymentWorkflow {
    pub fn new(pool: PgPool, gateway: Arc<dyn PaymentGateway>, settings: PaymentSettings) -> Self {
        Self {
            pool,
            gateway,
            settings,
        }
    }

    /// Create a payment intent for one ticket of one event.
    pub async fn initialize(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        ticket_id: Uuid,
    ) -> Result<Payment, PaymentError> {
        let user = User::find_by_id(&self.pool, user_id)
            .await?
            .ok_or(PaymentError::UserNotFound)?;
        let event = Event::find_by_id(&self.pool, event_id)
            .await?
            .ok_or(PaymentError::EventNotFound)?;
        let ticket = TicketPrice::find_by_id(&self.pool, ticket_id)
            .await?
            .ok_or(PaymentError::TicketNotFound)?;

        let amount = gateway_amount(ticket.price);
        let reference = mint_reference();

        let request = InitializeRequest {
            email: user.email.clone(),
            amount,
            currency: self.settings.currency.clone(),
            callback_url: self.settings.callback_url.clone(),
            reference: reference.clone(),
            metadata: serde_json::json!({
                "user_id": user.id,
                "event_id": event.id,
                "ticket_id": ticket.id,
            }),
        };

        let accepted = self.gateway.initialize(&request).await.map_err(|e| {
            tracing::error!(error = %e, %reference, "Payment initialization rejected");
            e
        })?;

        let payment = Payment::insert_new(
            &self.pool,
            PaymentInsert {
                user_id: user.id,
                event_id: event.id,
                ticket_id: ticket.id,
                amount,
                reference,
                authorization_url: accepted.authorization_url,
                currency: self.settings.currency.clone(),
                payer_email: user.email,
            },
        )
        .await?;

        tracing::info!(payment_id = %payment.id, reference = %payment.reference, "Payment intent created");
        Ok(payment)
    }

    /// Record the gateway's asynchronous confirmation. The raw payload is
    /// stored verbatim; the gateway event name drives the status change.
    pub async fn record_webhook(
        &self,
        reference: &str,
        gateway_event: &str,
        payload: serde_json::Value,
    ) -> Result<Payment, PaymentError> {
        let payment = Payment::find_by_reference(&self.pool, reference)
            .await?
            .ok_or(PaymentError::UnknownReference)?;

        let status = map_gateway_event(gateway_event);
        let webhook_status = match status {
            PaymentStatus::Failed => WebhookStatus::Failed,
            _ => WebhookStatus::Received,
        };

        Payment::record_webhook(&self.pool, payment.id, status, webhook_status, payload)
            .await?
            .ok_or(PaymentError::UnknownReference)
    }
}

/// Gateway amount in minor units: ticket price × 100, zero when no price is
/// attached (free-ticket rows).
pub fn gateway_amount(price: Option<Decimal>) -> i64 {
    price
        .map(|p| (p * Decimal::from(100)).trunc())
        .and_then(|minor| minor.to_i64())
        .unwrap_or(0)
}

/// Process-unique reference: time-based with a random suffix.
pub fn mint_reference() -> String {
    let millis = (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    let suffix: u32 = rand::random_range(0..1000);
    format!("PAY-{millis}-{suffix}")
}

fn map_gateway_event(gateway_event: &str) -> PaymentStatus {
    match gateway_event {
        "charge.success" => PaymentStatus::Success,
        "charge.failed" | "invoice.payment_failed" => PaymentStatus::Failed,
        "charge.abandoned" => PaymentStatus::Abandoned,
        _ => PaymentStatus::Pending,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn amount_is_price_times_one_hundred_in_minor_units() {
        assert_eq!(gateway_amount(Some("50".parse().unwrap())), 5000);
        assert_eq!(gateway_amount(Some("19.99".parse().unwrap())), 1999);
        assert_eq!(gateway_amount(Some("0".parse().unwrap())), 0);
        assert_eq!(gateway_amount(None), 0);
    }

    #[test]
    fn references_carry_the_expected_shape_and_vary() {
        let references: std::collections::HashSet<String> =
            (0..10).map(|_| mint_reference()).collect();
        for reference in &references {
            assert!(reference.starts_with("PAY-"));
            assert_eq!(reference.split('-').count(), 3);
            let suffix: u32 = reference.split('-').nth(2).unwrap().parse().unwrap();
            assert!(suffix < 1000);
        }
        assert!(references.len() > 1);
    }

    #[test]
    fn gateway_events_map_onto_payment_statuses() {
        assert_eq!(map_gateway_event("charge.success"), PaymentStatus::Success);
        assert_eq!(map_gateway_event("charge.failed"), PaymentStatus::Failed);
        assert_eq!(
            map_gateway_event("charge.abandoned"),
            PaymentStatus::Abandoned
        );
        assert_eq!(map_gateway_event("something.else"), PaymentStatus::Pending);
    }
}
