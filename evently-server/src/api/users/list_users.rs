use axum::{extract::State, http::StatusCode, response::IntoResponse};
use evently_core::entities::users::User;

use super::{UserApiError, to_user_response};
use crate::api::extractors::CurrentUser;
use crate::api::success;
use crate::state::AppState;

/// `GET /users` — list every account (admin only).
pub(super) async fn list_users(
    State(state): State<AppState>,
    caller: CurrentUser,
) -> Result<impl IntoResponse, UserApiError> {
    caller.require_admin()?;

    let users = User::list_all(&state.db).await?;
    let result: Vec<_> = users.iter().map(to_user_response).collect();
    Ok(success(StatusCode::OK, "Successful", result))
}
