use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use evently_core::auth::password;
use evently_core::entities::users::User;
use evently_core::validate::{self, Violation};
use evently_sdk::objects::auth::UpdatePasswordRequest;
use uuid::Uuid;

use super::{AuthApiError, issue_session};
use crate::api::extractors::CurrentUser;
use crate::state::AppState;

/// `PATCH /auth/update-password/{id}` — change the password while logged in.
///
/// Bumps `password_changed_at`, which invalidates every previously issued
/// bearer token; the response carries a fresh one.
pub(super) async fn update_password(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePasswordRequest>,
) -> Result<Response, AuthApiError> {
    if caller.0.id != id {
        return Err(AuthApiError::NotYou);
    }

    if body.current_password.is_empty() {
        return Err(AuthApiError::Validation(vec![Violation::new(
            "current_password",
            "Please provide your current password",
        )]));
    }
    if let Some(message) = validate::password_strength(&body.password) {
        return Err(AuthApiError::Validation(vec![Violation::new(
            "password", message,
        )]));
    }

    let Some(current_hash) = caller.0.password_hash.as_deref() else {
        return Err(AuthApiError::NoPassword);
    };
    if !password::verify_password(&body.current_password, current_hash)? {
        return Err(AuthApiError::WrongCurrentPassword);
    }

    let new_hash = password::hash_password(&body.password)?;
    let updated = User::update_password(&state.db, caller.0.id, &new_hash)
        .await?
        .ok_or(AuthApiError::UserNotFound)?;

    issue_session(
        &state,
        &updated,
        StatusCode::OK,
        "Your password has been updated successfully",
    )
    .await
}
