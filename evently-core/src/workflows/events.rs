//! The event/ticket creation and update workflow.
//!
//! One event plus its ticket-price rows (priced and free) are written as a
//! single transaction: any validation failure or write error rolls back the
//! whole batch, so partial persistence is never observable.

use crate::entities::events::{Event, EventInsert, EventUpdate};
use crate::entities::ticket_prices::{TicketPrice, TicketPriceInsert, TicketPriceUpdate};
use crate::entities::users::User;
use crate::entities::{EventStatus, TicketType};
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Tunable limits, sourced from configuration.
///
/// A cleared free-ticket bound (`None`) is not enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLimits {
    pub image_max_bytes: usize,
    pub free_ticket_min: Option<i32>,
    pub free_ticket_max: Option<i32>,
}

impl Default for EventLimits {
    fn default() -> Self {
        Self {
            image_max_bytes: 3 * 1024 * 1024,
            free_ticket_min: Some(2),
            free_ticket_max: Some(20),
        }
    }
}

/// Event fields as submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    /// ISO-8601 calendar date string, parsed and range-checked here.
    pub date: String,
    pub time: String,
    pub location: String,
    pub event_image: Option<Vec<u8>>,
    pub capacity: Option<i32>,
    pub free_ticket: Option<i32>,
}

/// One submitted ticket-price entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    /// Present on update when merging an existing row.
    pub id: Option<Uuid>,
    pub ticket_type: TicketType,
    pub price: Option<Decimal>,
    pub day: Option<String>,
}

impl From<evently_sdk::objects::events::TicketPriceEntry> for TicketDraft {
    fn from(entry: evently_sdk::objects::events::TicketPriceEntry) -> Self {
        Self {
            id: entry.id,
            ticket_type: entry.ticket_type.into(),
            price: entry.price,
            day: entry.day,
        }
    }
}

/// Partial event change for updates. `None` fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventChange {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub status: Option<EventStatus>,
    pub event_image: Option<Vec<u8>>,
    pub capacity: Option<i32>,
    pub free_ticket: Option<i32>,
}

/// Aggregate result of every event read/write path.
#[derive(Debug, Clone, PartialEq)]
pub struct EventWithTickets {
    pub event: Event,
    pub ticket_prices: Vec<TicketPrice>,
}

#[derive(Debug, Error)]
pub enum EventWorkflowError {
    #[error("Event already exists with that title")]
    DuplicateTitle,

    #[error("Event date is not a valid calendar date")]
    InvalidDate,

    #[error("Event date cannot be in the past")]
    PastDate,

    #[error("Event capacity must be at least 1")]
    CapacityTooSmall,

    #[error("Image size should not be more than {0} bytes")]
    ImageTooLarge(usize),

    #[error("Ticket price must be a non-negative value")]
    BadTicketPrice,

    #[error("Duplicate ticket type \"{0}\" found for the same event")]
    DuplicateTicketType(&'static str),

    #[error("Free ticket count must be between {min} and {max}")]
    FreeTicketOutOfRange { min: i32, max: i32 },

    #[error("Event not found")]
    NotFound,

    #[error("Only the event owner can modify this event")]
    NotOwner,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct EventWorkflow {
    pool: PgPool,
    limits: EventLimits,
}

impl EventWorkflow {
    pub fn new(pool: PgPool, limits: EventLimits) -> Self {
        Self { pool, limits }
    }

    /// Create one event with its ticket rows, atomically.
    pub async fn create(
        &self,
        owner: &User,
        draft: EventDraft,
        tickets: Vec<TicketDraft>,
    ) -> Result<EventWithTickets, EventWorkflowError> {
        if Event::find_by_title(&self.pool, &draft.title)
            .await?
            .is_some()
        {
            return Err(EventWorkflowError::DuplicateTitle);
        }

        let today = OffsetDateTime::now_utc().date();
        let date = parse_event_date(&draft.date)?;
        check_not_past(date, today)?;
        check_capacity(draft.capacity)?;
        check_image(draft.event_image.as_deref(), &self.limits)?;
        validate_ticket_batch(&tickets)?;

        let status = derive_status(&tickets);
        let free_rows = free_ticket_rows(draft.free_ticket, status, &self.limits)?;

        let mut tx = self.pool.begin().await?;

        let event = Event::insert_new(
            &mut *tx,
            EventInsert {
                user_id: owner.id,
                title: draft.title,
                description: draft.description,
                date,
                time: draft.time,
                location: draft.location,
                status,
                event_image: draft.event_image,
                capacity: draft.capacity,
                free_ticket: draft.free_ticket,
            },
        )
        .await?;

        let mut ticket_prices = Vec::with_capacity(tickets.len() + free_rows);
        for ticket in tickets {
            let row = TicketPrice::insert_new(
                &mut *tx,
                TicketPriceInsert {
                    event_id: event.id,
                    ticket_type: ticket.ticket_type,
                    price: ticket.price,
                    day: ticket.day,
                },
            )
            .await?;
            ticket_prices.push(row);
        }
        for _ in 0..free_rows {
            let row = TicketPrice::insert_new(
                &mut *tx,
                TicketPriceInsert {
                    event_id: event.id,
                    ticket_type: TicketType::Free,
                    price: Some(Decimal::ZERO),
                    day: None,
                },
            )
            .await?;
            ticket_prices.push(row);
        }

        tx.commit().await?;

        tracing::info!(event_id = %event.id, owner = %owner.id, tickets = ticket_prices.len(), "Event created");
        Ok(EventWithTickets {
            event,
            ticket_prices,
        })
    }

    /// Update an event's mutable fields and merge its ticket rows by id.
    ///
    /// Entries with an id that resolves to one of this event's rows are
    /// merged in place; everything else is inserted. Omitted rows are never
    /// deleted.
    pub async fn update(
        &self,
        caller: &User,
        event_id: Uuid,
        change: EventChange,
        tickets: Vec<TicketDraft>,
    ) -> Result<EventWithTickets, EventWorkflowError> {
        let existing = Event::find_by_id(&self.pool, event_id)
            .await?
            .ok_or(EventWorkflowError::NotFound)?;
        if existing.user_id != caller.id {
            return Err(EventWorkflowError::NotOwner);
        }

        if let Some(title) = change.title.as_deref() {
            if title != existing.title
                && Event::find_by_title_excluding(&self.pool, title, event_id)
                    .await?
                    .is_some()
            {
                return Err(EventWorkflowError::DuplicateTitle);
            }
        }

        let date = match change.date.as_deref() {
            Some(raw) => {
                let parsed = parse_event_date(raw)?;
                check_not_past(parsed, OffsetDateTime::now_utc().date())?;
                Some(parsed)
            }
            None => None,
        };
        check_capacity(change.capacity)?;
        check_image(change.event_image.as_deref(), &self.limits)?;
        validate_ticket_batch(&tickets)?;

        let mut tx = self.pool.begin().await?;

        let event = Event::update(
            &mut *tx,
            event_id,
            EventUpdate {
                title: change.title,
                description: change.description,
                date,
                time: change.time,
                location: change.location,
                status: change.status,
                event_image: change.event_image,
                capacity: change.capacity,
                free_ticket: change.free_ticket,
            },
        )
        .await?
        .ok_or(EventWorkflowError::NotFound)?;

        for ticket in tickets {
            let merged = match ticket.id {
                Some(id) => {
                    TicketPrice::update(
                        &mut *tx,
                        id,
                        event_id,
                        TicketPriceUpdate {
                            ticket_type: Some(ticket.ticket_type),
                            price: ticket.price,
                            day: ticket.day.clone(),
                        },
                    )
                    .await?
                }
                None => None,
            };
            if merged.is_none() {
                TicketPrice::insert_new(
                    &mut *tx,
                    TicketPriceInsert {
                        event_id,
                        ticket_type: ticket.ticket_type,
                        price: ticket.price,
                        day: ticket.day,
                    },
                )
                .await?;
            }
        }

        tx.commit().await?;

        let ticket_prices = TicketPrice::list_by_event(&self.pool, event_id).await?;
        tracing::info!(event_id = %event.id, "Event updated");
        Ok(EventWithTickets {
            event,
            ticket_prices,
        })
    }

    /// Fetch one event with its ticket rows.
    pub async fn get(&self, event_id: Uuid) -> Result<EventWithTickets, EventWorkflowError> {
        let event = Event::find_by_id(&self.pool, event_id)
            .await?
            .ok_or(EventWorkflowError::NotFound)?;
        let ticket_prices = TicketPrice::list_by_event(&self.pool, event_id).await?;
        Ok(EventWithTickets {
            event,
            ticket_prices,
        })
    }

    pub async fn list_all(&self) -> Result<Vec<Event>, EventWorkflowError> {
        Ok(Event::list_all(&self.pool).await?)
    }

    pub async fn list_mine(&self, owner: Uuid) -> Result<Vec<Event>, EventWorkflowError> {
        Ok(Event::list_by_owner(&self.pool, owner).await?)
    }
}

// -- pure validation helpers ---------------------------------------------

pub fn parse_event_date(raw: &str) -> Result<Date, EventWorkflowError> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(raw, &format).map_err(|_| EventWorkflowError::InvalidDate)
}

pub fn check_not_past(date: Date, today: Date) -> Result<(), EventWorkflowError> {
    if date < today {
        Err(EventWorkflowError::PastDate)
    } else {
        Ok(())
    }
}

fn check_capacity(capacity: Option<i32>) -> Result<(), EventWorkflowError> {
    match capacity {
        Some(n) if n < 1 => Err(EventWorkflowError::CapacityTooSmall),
        _ => Ok(()),
    }
}

fn check_image(image: Option<&[u8]>, limits: &EventLimits) -> Result<(), EventWorkflowError> {
    match image {
        Some(bytes) if bytes.len() > limits.image_max_bytes => {
            Err(EventWorkflowError::ImageTooLarge(limits.image_max_bytes))
        }
        _ => Ok(()),
    }
}

/// Reject the whole batch before any row is written: every non-free entry
/// needs a non-negative price, free entries may only be zero-priced, and
/// ticket types must be pairwise distinct.
pub fn validate_ticket_batch(batch: &[TicketDraft]) -> Result<(), EventWorkflowError> {
    for (index, ticket) in batch.iter().enumerate() {
        match (ticket.ticket_type, ticket.price) {
            (TicketType::Free, None) => {}
            (TicketType::Free, Some(price)) if price == Decimal::ZERO => {}
            (TicketType::Free, Some(_)) => return Err(EventWorkflowError::BadTicketPrice),
            (_, None) => return Err(EventWorkflowError::BadTicketPrice),
            (_, Some(price)) if price < Decimal::ZERO => {
                return Err(EventWorkflowError::BadTicketPrice);
            }
            _ => {}
        }

        if batch[..index]
            .iter()
            .any(|earlier| earlier.ticket_type == ticket.ticket_type)
        {
            let label = evently_sdk::objects::TicketType::from(ticket.ticket_type).as_str();
            return Err(EventWorkflowError::DuplicateTicketType(label));
        }
    }
    Ok(())
}

/// An event is free when it has no ticket entries or every entry is
/// zero-priced; otherwise it is available for sale.
pub fn derive_status(batch: &[TicketDraft]) -> EventStatus {
    let all_zero = batch
        .iter()
        .all(|t| t.price.unwrap_or(Decimal::ZERO) == Decimal::ZERO);
    if batch.is_empty() || all_zero {
        EventStatus::Free
    } else {
        EventStatus::Available
    }
}

/// Number of reserved free-ticket rows to materialize. Zero when the event
/// is already classified free; bounds-checked against the configured range.
fn free_ticket_rows(
    requested: Option<i32>,
    status: EventStatus,
    limits: &EventLimits,
) -> Result<usize, EventWorkflowError> {
    let Some(count) = requested else {
        return Ok(0);
    };
    let min = limits.free_ticket_min.unwrap_or(0);
    let max = limits.free_ticket_max.unwrap_or(i32::MAX);
    if count < min || count > max {
        return Err(EventWorkflowError::FreeTicketOutOfRange { min, max });
    }
    if status == EventStatus::Free {
        return Ok(0);
    }
    Ok(count as usize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn draft(ticket_type: TicketType, price: Option<&str>) -> TicketDraft {
        TicketDraft {
            id: None,
            ticket_type,
            price: price.map(|p| p.parse().unwrap()),
            day: None,
        }
    }

    #[test]
    fn status_is_free_for_empty_batch() {
        assert_eq!(derive_status(&[]), EventStatus::Free);
    }

    #[test]
    fn status_is_free_when_every_price_is_zero() {
        let batch = [
            draft(TicketType::Regular, Some("0")),
            draft(TicketType::Free, Some("0")),
        ];
        assert_eq!(derive_status(&batch), EventStatus::Free);
    }

    #[test]
    fn status_is_available_with_any_priced_ticket() {
        let batch = [
            draft(TicketType::Regular, Some("50")),
            draft(TicketType::Vip, Some("150")),
        ];
        assert_eq!(derive_status(&batch), EventStatus::Available);
    }

    #[test]
    fn batch_rejects_negative_price() {
        let batch = [draft(TicketType::Regular, Some("-1"))];
        assert!(matches!(
            validate_ticket_batch(&batch),
            Err(EventWorkflowError::BadTicketPrice)
        ));
    }

    #[test]
    fn batch_rejects_missing_price_on_priced_types() {
        let batch = [draft(TicketType::Vip, None)];
        assert!(matches!(
            validate_ticket_batch(&batch),
            Err(EventWorkflowError::BadTicketPrice)
        ));
    }

    #[test]
    fn free_entries_may_omit_price_but_not_charge_one() {
        assert!(validate_ticket_batch(&[draft(TicketType::Free, None)]).is_ok());
        assert!(validate_ticket_batch(&[draft(TicketType::Free, Some("0"))]).is_ok());
        assert!(matches!(
            validate_ticket_batch(&[draft(TicketType::Free, Some("5"))]),
            Err(EventWorkflowError::BadTicketPrice)
        ));
    }

    #[test]
    fn batch_rejects_duplicate_types() {
        let batch = [
            draft(TicketType::Regular, Some("50")),
            draft(TicketType::Vip, Some("150")),
            draft(TicketType::Regular, Some("75")),
        ];
        assert!(matches!(
            validate_ticket_batch(&batch),
            Err(EventWorkflowError::DuplicateTicketType("REGULAR"))
        ));
    }

    #[test]
    fn date_parsing_and_past_check() {
        let date = parse_event_date("2030-06-15").unwrap();
        assert_eq!(date.to_string(), "2030-06-15");
        assert!(parse_event_date("15/06/2030").is_err());
        assert!(parse_event_date("not a date").is_err());

        let today = parse_event_date("2030-06-15").unwrap();
        assert!(check_not_past(parse_event_date("2030-06-14").unwrap(), today).is_err());
        assert!(check_not_past(today, today).is_ok());
        assert!(check_not_past(parse_event_date("2030-06-16").unwrap(), today).is_ok());
    }

    #[test]
    fn free_ticket_rows_respect_bounds_and_free_status() {
        let limits = EventLimits::default();
        assert_eq!(
            free_ticket_rows(Some(5), EventStatus::Available, &limits).unwrap(),
            5
        );
        // Already free: nothing extra to materialize.
        assert_eq!(
            free_ticket_rows(Some(5), EventStatus::Free, &limits).unwrap(),
            0
        );
        assert!(matches!(
            free_ticket_rows(Some(1), EventStatus::Available, &limits),
            Err(EventWorkflowError::FreeTicketOutOfRange { min: 2, max: 20 })
        ));
        assert!(matches!(
            free_ticket_rows(Some(21), EventStatus::Available, &limits),
            Err(EventWorkflowError::FreeTicketOutOfRange { .. })
        ));

        let unbounded = EventLimits {
            free_ticket_min: None,
            free_ticket_max: None,
            ..EventLimits::default()
        };
        assert_eq!(
            free_ticket_rows(Some(100), EventStatus::Available, &unbounded).unwrap(),
            100
        );
    }

    #[test]
    fn image_cap_applies_only_when_an_image_is_present() {
        let limits = EventLimits {
            image_max_bytes: 8,
            ..EventLimits::default()
        };
        assert!(check_image(None, &limits).is_ok());
        assert!(check_image(Some(&[0u8; 8]), &limits).is_ok());
        assert!(matches!(
            check_image(Some(&[0u8; 9]), &limits),
            Err(EventWorkflowError::ImageTooLarge(8))
        ));
    }

    #[test]
    fn capacity_must_be_positive_when_present() {
        assert!(check_capacity(None).is_ok());
        assert!(check_capacity(Some(1)).is_ok());
        assert!(check_capacity(Some(0)).is_err());
        assert!(check_capacity(Some(-3)).is_err());
    }
}
