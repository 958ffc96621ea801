use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use evently_core::validate::Validate;
use evently_core::workflows::events::EventDraft;
use evently_sdk::objects::events::CreateEventRequest;

use super::{EventApiError, to_response, workflow};
use crate::api::extractors::CurrentUser;
use crate::api::success;
use crate::state::AppState;

/// `POST /events` — create an event with its ticket rows.
///
/// The event row, the priced ticket rows, and any materialized free-ticket
/// rows commit in one transaction; any validation failure leaves nothing
/// behind.
pub(super) async fn create_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, EventApiError> {
    user.require_planner()?;
    body.check().map_err(EventApiError::Validation)?;

    let draft = EventDraft {
        title: body.title,
        description: body.description,
        date: body.date,
        time: body.time,
        location: body.location,
        event_image: body.event_image,
        capacity: body.capacity,
        free_ticket: body.free_ticket,
    };
    let tickets = body.ticket_prices.into_iter().map(Into::into).collect();

    let created = workflow(&state).await.create(&user.0, draft, tickets).await?;

    Ok(success(
        StatusCode::CREATED,
        "Event created successfully",
        to_response(created),
    ))
}
