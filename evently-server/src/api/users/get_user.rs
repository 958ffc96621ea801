use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use evently_core::entities::users::User;
use uuid::Uuid;

use super::{UserApiError, to_user_response};
use crate::api::extractors::CurrentUser;
use crate::api::success;
use crate::state::AppState;

/// `GET /users/{id}` — fetch one account.
pub(super) async fn get_user(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, UserApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(UserApiError::NotFound)?;
    Ok(success(
        StatusCode::OK,
        "Successful",
        to_user_response(&user),
    ))
}
