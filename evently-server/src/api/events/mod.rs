//! Event handlers.
//!
//! # Endpoints
//!
//! - `POST  /events`           – create event + ticket rows (planner)
//! - `GET   /events`           – list all events
//! - `GET   /events/myevents`  – list the caller's events
//! - `POST  /events/rsvp`      – create event + mail invitees (planner)
//! - `GET   /events/{id}`      – fetch one event with its tickets
//! - `PATCH /events/{id}`      – update event, merge ticket rows (owner)

use crate::api::extractors::AuthRejection;
use crate::api::{error_response, validation_error_response};
use crate::state::AppState;
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use evently_core::entities::events::Event;
use evently_core::entities::ticket_prices::TicketPrice;
use evently_core::validate::Violation;
use evently_core::workflows::events::{EventWithTickets, EventWorkflow, EventWorkflowError};
use evently_sdk::objects::events::{EventResponse, EventSummary, TicketPriceResponse};

mod create_event;
mod get_event;
mod list_events;
mod my_events;
mod rsvp;
mod update_event;

/// Build the events router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_event::create_event).get(list_events::list_events),
        )
        .route("/myevents", get(my_events::my_events))
        .route("/rsvp", post(rsvp::create_rsvp))
        .route(
            "/{id}",
            get(get_event::get_event).patch(update_event::update_event),
        )
}

/// Construct the workflow with the currently configured limits.
async fn workflow(state: &AppState) -> EventWorkflow {
    let limits = state.config.limits.read().await.clone();
    EventWorkflow::new(state.db.clone(), limits)
}

/// Convert an `EventWithTickets` (DB aggregate) into an `EventResponse`
/// (API model).
fn to_response(aggregate: EventWithTickets) -> EventResponse {
    let EventWithTickets {
        event,
        ticket_prices,
    } = aggregate;
    EventResponse {
        id: event.id,
        owner_id: event.user_id,
        title: event.title,
        description: event.description,
        date: event.date.to_string(),
        time: event.time,
        location: event.location,
        status: event.status.into(),
        capacity: event.capacity,
        free_ticket: event.free_ticket,
        ticket_prices: ticket_prices.into_iter().map(to_ticket_response).collect(),
        created_at: event.created_at.assume_utc().unix_timestamp(),
    }
}

fn to_ticket_response(row: TicketPrice) -> TicketPriceResponse {
    TicketPriceResponse {
        id: row.id,
        event_id: row.event_id,
        ticket_type: row.ticket_type.into(),
        price: row.price,
        day: row.day,
    }
}

fn to_summary(event: Event) -> EventSummary {
    EventSummary {
        id: event.id,
        owner_id: event.user_id,
        title: event.title,
        description: event.description,
        date: event.date.to_string(),
        time: event.time,
        location: event.location,
        status: event.status.into(),
        capacity: event.capacity,
        created_at: event.created_at.assume_utc().unix_timestamp(),
    }
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in event handlers.
#[derive(Debug)]
enum EventApiError {
    /// Authentication/role failure from the extractor helpers.
    Auth(AuthRejection),
    /// Payload failed field validation.
    Validation(Vec<Violation>),
    /// Workflow rejected the operation.
    Workflow(EventWorkflowError),
}

impl From<AuthRejection> for EventApiError {
    fn from(rejection: AuthRejection) -> Self {
        EventApiError::Auth(rejection)
    }
}

impl From<EventWorkflowError> for EventApiError {
    fn from(err: EventWorkflowError) -> Self {
        EventApiError::Workflow(err)
    }
}

impl IntoResponse for EventApiError {
    fn into_response(self) -> Response {
        match self {
            EventApiError::Auth(rejection) => rejection.into_response(),
            EventApiError::Validation(errors) => validation_error_response(errors),
            EventApiError::Workflow(err) => workflow_error_response(err),
        }
    }
}

fn workflow_error_response(err: EventWorkflowError) -> Response {
    match err {
        EventWorkflowError::NotFound => error_response(StatusCode::NOT_FOUND, err.to_string()),
        EventWorkflowError::NotOwner => error_response(StatusCode::FORBIDDEN, err.to_string()),
        EventWorkflowError::Database(e) => {
            tracing::error!(error = %e, "Event workflow database error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred while processing the event",
            )
        }
        // Everything else is an operational validation failure.
        other => error_response(StatusCode::BAD_REQUEST, other.to_string()),
    }
}
