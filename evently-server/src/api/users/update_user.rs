use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use evently_core::entities::Role;
use evently_core::entities::users::{User, UserProfileUpdate};
use evently_core::validate::Validate;
use evently_sdk::objects::users::UpdateUserRequest;
use uuid::Uuid;

use super::{UserApiError, to_user_response};
use crate::api::extractors::{AuthRejection, CurrentUser};
use crate::api::success;
use crate::state::AppState;

/// `PATCH /users/{id}` — update profile fields.
///
/// Callers may update their own profile; admins may update anyone's. Role
/// and password are not reachable through this path.
pub(super) async fn update_user(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, UserApiError> {
    if caller.0.id != id && caller.0.role != Role::Admin {
        return Err(UserApiError::Auth(AuthRejection::Forbidden));
    }

    body.check().map_err(UserApiError::Validation)?;

    if let Some(email) = body.email.as_deref() {
        if let Some(existing) = User::find_by_email(&state.db, email).await? {
            if existing.id != id {
                return Err(UserApiError::EmailTaken);
            }
        }
    }

    let updated = User::update_profile(
        &state.db,
        id,
        UserProfileUpdate {
            email: body.email,
            first_name: body.first_name,
            second_name: body.second_name,
        },
    )
    .await?
    .ok_or(UserApiError::NotFound)?;

    Ok(success(
        StatusCode::OK,
        "User updated successfully",
        to_user_response(&updated),
    ))
}
