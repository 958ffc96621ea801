use crate::entities::EventStatus;
use sqlx::PgPool;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: Date,
    /// Start-time label, e.g. "18:30". Display-only.
    pub time: String,
    pub location: String,
    pub status: EventStatus,
    pub event_image: Option<Vec<u8>>,
    pub capacity: Option<i32>,
    pub free_ticket: Option<i32>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInsert {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: Date,
    pub time: String,
    pub location: String,
    pub status: EventStatus,
    pub event_image: Option<Vec<u8>>,
    pub capacity: Option<i32>,
    pub free_ticket: Option<i32>,
}

/// Column updates for an existing event. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<Date>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub status: Option<EventStatus>,
    pub event_image: Option<Vec<u8>>,
    pub capacity: Option<i32>,
    pub free_ticket: Option<i32>,
}

const EVENT_COLUMNS: &str = "id, user_id, title, description, date, \"time\", location, \
     status, event_image, capacity, free_ticket, created_at, updated_at";

impl Event {
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_title(pool: &PgPool, title: &str) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE title = $1"
        ))
        .bind(title)
        .fetch_optional(pool)
        .await
    }

    /// Title-collision probe for updates: matches any *other* event with the
    /// given title.
    pub async fn find_by_title_excluding(
        pool: &PgPool,
        title: &str,
        excluded: Uuid,
    ) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE title = $1 AND id <> $2"
        ))
        .bind(title)
        .bind(excluded)
        .fetch_optional(pool)
        .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn list_by_owner(pool: &PgPool, owner: Uuid) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner)
        .fetch_all(pool)
        .await
    }

    /// Insert inside a caller-supplied executor so the event row and its
    /// ticket rows commit or roll back together.
    pub async fn insert_new<'e>(
        executor: impl sqlx::PgExecutor<'e>,
        insert: EventInsert,
    ) -> Result<Event, sqlx::Error> {
        sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events \
                (user_id, title, description, date, \"time\", location, status, \
                 event_image, capacity, free_ticket) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(insert.user_id)
        .bind(insert.title)
        .bind(insert.description)
        .bind(insert.date)
        .bind(insert.time)
        .bind(insert.location)
        .bind(insert.status)
        .bind(insert.event_image)
        .bind(insert.capacity)
        .bind(insert.free_ticket)
        .fetch_one(executor)
        .await
    }

    pub async fn update<'e>(
        executor: impl sqlx::PgExecutor<'e>,
        id: Uuid,
        update: EventUpdate,
    ) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                date = COALESCE($4, date), \
                \"time\" = COALESCE($5, \"time\"), \
                location = COALESCE($6, location), \
                status = COALESCE($7, status), \
                event_image = COALESCE($8, event_image), \
                capacity = COALESCE($9, capacity), \
                free_ticket = COALESCE($10, free_ticket), \
                updated_at = (now() AT TIME ZONE 'utc') \
             WHERE id = $1 \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(update.title)
        .bind(update.description)
        .bind(update.date)
        .bind(update.time)
        .bind(update.location)
        .bind(update.status)
        .bind(update.event_image)
        .bind(update.capacity)
        .bind(update.free_ticket)
        .fetch_optional(executor)
        .await
    }
}
