//! Request and response bodies for the event endpoints.

use crate::objects::{EventStatus, TicketType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ticket-price entry inside a create/update payload.
///
/// `id` is absent on creation. On update, an entry with an `id` that
/// resolves to an existing row is merged in place; entries without an `id`
/// are inserted as new rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPriceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub ticket_type: TicketType,
    /// Required for non-free tickets; must be non-negative.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Optional day label for multi-day events (e.g. "Day 1").
    #[serde(default)]
    pub day: Option<String>,
}

/// `POST /events`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    /// ISO-8601 calendar date, e.g. "2026-11-02". Must not be in the past.
    pub date: String,
    /// Human-readable start time label, e.g. "18:30".
    pub time: String,
    pub location: String,
    /// Raw image bytes; rejected when larger than the configured cap.
    #[serde(default)]
    pub event_image: Option<Vec<u8>>,
    #[serde(default)]
    pub capacity: Option<i32>,
    /// Number of zero-price tickets to materialize alongside the priced ones.
    #[serde(default)]
    pub free_ticket: Option<i32>,
    #[serde(default)]
    pub ticket_prices: Vec<TicketPriceEntry>,
}

/// `PATCH /events/{id}` — omitted fields are untouched; ticket entries are
/// merged by id (additive, never deleting omitted rows).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub status: Option<EventStatus>,
    pub event_image: Option<Vec<u8>>,
    pub capacity: Option<i32>,
    pub free_ticket: Option<i32>,
    #[serde(default)]
    pub ticket_prices: Vec<TicketPriceEntry>,
}

/// `POST /events/rsvp` — persists the event and mails each invitee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsvpRequest {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub event_image: Option<Vec<u8>>,
    pub invitees: Vec<String>,
}

/// Per-recipient outcome of an RSVP invitation send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsvpOutcome {
    pub invitee: String,
    pub success: bool,
    pub message: String,
}

/// One persisted ticket-price row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketPriceResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub ticket_type: TicketType,
    pub price: Option<Decimal>,
    pub day: Option<String>,
}

/// Event without its ticket rows, as returned by the list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub status: EventStatus,
    pub capacity: Option<i32>,
    pub created_at: i64,
}

/// Event with its ticket rows, as returned by every event read path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub status: EventStatus,
    pub capacity: Option<i32>,
    pub free_ticket: Option<i32>,
    pub ticket_prices: Vec<TicketPriceResponse>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}
