use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use evently_core::validate::Validate;
use evently_core::workflows::events::EventDraft;
use evently_core::workflows::rsvp::send_invites;
use evently_sdk::objects::events::{EventResponse, RsvpOutcome, RsvpRequest};
use serde::Serialize;

use super::{EventApiError, to_response, workflow};
use crate::api::extractors::CurrentUser;
use crate::api::success;
use crate::state::AppState;

#[derive(Serialize)]
struct RsvpData {
    event: EventResponse,
    outcomes: Vec<RsvpOutcome>,
}

/// `POST /events/rsvp` — create an event and invite people by email.
///
/// The event is persisted first; invitation mails then go out concurrently
/// and independently. A failed send shows up in that invitee's outcome and
/// never rolls the event back.
pub(super) async fn create_rsvp(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<RsvpRequest>,
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
        capacity: None,
        free_ticket: None,
    };

    let created = workflow(&state).await.create(&user.0, draft, vec![]).await?;

    let outcomes = send_invites(state.notifier.as_ref(), &created.event, &body.invitees)
        .await
        .into_iter()
        .map(|outcome| RsvpOutcome {
            invitee: outcome.invitee,
            success: outcome.success,
            message: outcome.message,
        })
        .collect();

    Ok(success(
        StatusCode::OK,
        "RSVP sent successfully",
        RsvpData {
            event: to_response(created),
            outcomes,
        },
    ))
}
