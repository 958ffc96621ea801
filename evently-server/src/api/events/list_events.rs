use axum::{extract::State, http::StatusCode, response::IntoResponse};

use super::{EventApiError, to_summary, workflow};
use crate::api::success;
use crate::state::AppState;

/// `GET /events` — list every event.
pub(super) async fn list_events(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, EventApiError> {
    let events = workflow(&state).await.list_all().await?;
    let summaries: Vec<_> = events.into_iter().map(to_summary).collect();
    Ok(success(
        StatusCode::OK,
        "Events fetched successfully",
        summaries,
    ))
}
