use crate::entities::{PaymentStatus, WebhookStatus};
use sqlx::PgPool;
use time::PrimitiveDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub ticket_id: Uuid,
    /// Gateway minor units (ticket price × 100).
    pub amount: i64,
    pub status: PaymentStatus,
    /// Process-unique reference submitted to the gateway. Unique column.
    pub reference: String,
    pub authorization_url: String,
    pub currency: String,
    pub payer_email: String,
    /// Reserved for a future retry pipeline; no mutating path increments it.
    pub retry_attempts: i32,
    pub webhook_status: WebhookStatus,
    pub webhook_payload: Option<serde_json::Value>,
    pub webhook_received_at: Option<PrimitiveDateTime>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInsert {
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub ticket_id: Uuid,
    pub amount: i64,
    pub reference: String,
    pub authorization_url: String,
    pub currency: String,
    pub payer_email: String,
}

const PAYMENT_COLUMNS: &str = "id, user_id, event_id, ticket_id, amount, status, reference, \
     authorization_url, currency, payer_email, retry_attempts, webhook_status, \
     webhook_payload, webhook_received_at, created_at, updated_at";

impl Payment {
    pub async fn find_by_reference(
        pool: &PgPool,
        reference: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE reference = $1"
        ))
        .bind(reference)
        .fetch_optional(pool)
        .await
    }

    /// Insert a fresh intent. Always starts `pending`/webhook `pending`;
    /// only the webhook path advances it.
    pub async fn insert_new(pool: &PgPool, insert: PaymentInsert) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "INSERT INTO payments \
                (user_id, event_id, ticket_id, amount, reference, authorization_url, \
                 currency, payer_email) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(insert.user_id)
        .bind(insert.event_id)
        .bind(insert.ticket_id)
        .bind(insert.amount)
        .bind(insert.reference)
        .bind(insert.authorization_url)
        .bind(insert.currency)
        .bind(insert.payer_email)
        .fetch_one(pool)
        .await
    }

    /// Record the gateway's asynchronous confirmation against the row.
    pub async fn record_webhook(
        pool: &PgPool,
        id: Uuid,
        status: PaymentStatus,
        webhook_status: WebhookStatus,
        payload: serde_json::Value,
    ) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "UPDATE payments SET \
                status = $2, \
                webhook_status = $3, \
                webhook_payload = $4, \
                webhook_received_at = (now() AT TIME ZONE 'utc'), \
                updated_at = (now() AT TIME ZONE 'utc') \
             WHERE id = $1 \
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .bind(webhook_status)
        .bind(payload)
        .fetch_optional(pool)
        .await
    }
}
