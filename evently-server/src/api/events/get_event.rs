use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use super::{EventApiError, to_response, workflow};
use crate::api::success;
use crate::state::AppState;

/// `GET /events/{id}` — fetch one event with its ticket rows.
pub(super) async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, EventApiError> {
    let aggregate = workflow(&state).await.get(id).await?;
    Ok(success(
        StatusCode::OK,
        "Event fetched successfully",
        to_response(aggregate),
    ))
}
