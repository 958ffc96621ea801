use crate::entities::TicketType;
use rust_decimal::Decimal;
use sqlx::PgPool;
use time::PrimitiveDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TicketPrice {
    pub id: Uuid,
    pub event_id: Uuid,
    pub ticket_type: TicketType,
    /// Non-negative. `None` only for reserved free-ticket rows.
    pub price: Option<Decimal>,
    pub day: Option<String>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPriceInsert {
    pub event_id: Uuid,
    pub ticket_type: TicketType,
    pub price: Option<Decimal>,
    pub day: Option<String>,
}

/// In-place merge of an existing row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPriceUpdate {
    pub ticket_type: Option<TicketType>,
    pub price: Option<Decimal>,
    pub day: Option<String>,
}

const TICKET_COLUMNS: &str = "id, event_id, ticket_type, price, day, created_at, updated_at";

impl TicketPrice {
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<TicketPrice>, sqlx::Error> {
        sqlx::query_as::<_, TicketPrice>(&format!(
            "SELECT {TICKET_COLUMNS} FROM ticket_prices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn list_by_event(
        pool: &PgPool,
        event_id: Uuid,
    ) -> Result<Vec<TicketPrice>, sqlx::Error> {
        sqlx::query_as::<_, TicketPrice>(&format!(
            "SELECT {TICKET_COLUMNS} FROM ticket_prices WHERE event_id = $1 ORDER BY created_at"
        ))
        .bind(event_id)
        .fetch_all(pool)
        .await
    }

    pub async fn insert_new<'e>(
        executor: impl sqlx::PgExecutor<'e>,
        insert: TicketPriceInsert,
    ) -> Result<TicketPrice, sqlx::Error> {
        sqlx::query_as::<_, TicketPrice>(&format!(
            "INSERT INTO ticket_prices (event_id, ticket_type, price, day) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {TICKET_COLUMNS}"
        ))
        .bind(insert.event_id)
        .bind(insert.ticket_type)
        .bind(insert.price)
        .bind(insert.day)
        .fetch_one(executor)
        .await
    }

    /// Merge an existing row in place. Scoped to the event so a ticket id
    /// from another event cannot be grafted in.
    pub async fn update<'e>(
        executor: impl sqlx::PgExecutor<'e>,
        id: Uuid,
        event_id: Uuid,
        update: TicketPriceUpdate,
    ) -> Result<Option<TicketPrice>, sqlx::Error> {
        sqlx::query_as::<_, TicketPrice>(&format!(
            "UPDATE ticket_prices SET \
                ticket_type = COALESCE($3, ticket_type), \
                price = COALESCE($4, price), \
                day = COALESCE($5, day), \
                updated_at = (now() AT TIME ZONE 'utc') \
             WHERE id = $1 AND event_id = $2 \
             RETURNING {TICKET_COLUMNS}"
        ))
        .bind(id)
        .bind(event_id)
        .bind(update.ticket_type)
        .bind(update.price)
        .bind(update.day)
        .fetch_optional(executor)
        .await
    }
}
