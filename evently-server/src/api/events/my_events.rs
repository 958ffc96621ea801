use axum::{extract::State, http::StatusCode, response::IntoResponse};

use super::{EventApiError, to_summary, workflow};
use crate::api::extractors::CurrentUser;
use crate::api::success;
use crate::state::AppState;

/// `GET /events/myevents` — list the caller's own events.
pub(super) async fn my_events(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, EventApiError> {
    let events = workflow(&state).await.list_mine(user.0.id).await?;
    let summaries: Vec<_> = events.into_iter().map(to_summary).collect();
    Ok(success(
        StatusCode::OK,
        "Events fetched successfully",
        summaries,
    ))
}
