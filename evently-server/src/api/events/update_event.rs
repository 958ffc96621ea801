use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use evently_core::workflows::events::EventChange;
use evently_sdk::objects::events::UpdateEventRequest;
use uuid::Uuid;

use super::{EventApiError, to_response, workflow};
use crate::api::extractors::CurrentUser;
use crate::api::success;
use crate::state::AppState;

/// `PATCH /events/{id}` — update an event and merge its ticket rows.
///
/// Ticket entries with an id are merged in place; entries without one are
/// inserted. Rows omitted from the payload stay untouched.
pub(super) async fn update_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, EventApiError> {
    user.require_planner()?;

    let change = EventChange {
        title: body.title,
        description: body.description,
        date: body.date,
        time: body.time,
        location: body.location,
        status: body.status.map(Into::into),
        event_image: body.event_image,
        capacity: body.capacity,
        free_ticket: body.free_ticket,
    };
    let tickets = body.ticket_prices.into_iter().map(Into::into).collect();

    let updated = workflow(&state)
        .await
        .update(&user.0, id, change, tickets)
        .await?;

    Ok(success(
        StatusCode::OK,
        "Event updated successfully",
        to_response(updated),
    ))
}
