use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use evently_core::auth::password;
use evently_core::entities::users::User;
use evently_core::validate::{self, Violation};
use evently_sdk::objects::auth::ResetPasswordRequest;
use time::OffsetDateTime;

use super::{AuthApiError, issue_session};
use crate::state::AppState;

/// `PATCH /auth/reset-password/{token}` — consume a reset token.
///
/// The presented raw token is re-hashed and looked up by digest; an unknown
/// digest and an expired one answer identically. The password is only
/// touched after both checks pass.
pub(super) async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Response, AuthApiError> {
    if let Some(message) = validate::password_strength(&body.password) {
        return Err(AuthApiError::Validation(vec![Violation::new(
            "password", message,
        )]));
    }

    let digest = password::digest_reset_token(&token);
    let user = User::find_by_reset_digest(&state.db, &digest)
        .await?
        .ok_or(AuthApiError::ResetTokenInvalid)?;

    if password::reset_token_expired(user.password_reset_expires, OffsetDateTime::now_utc()) {
        return Err(AuthApiError::ResetTokenInvalid);
    }

    let new_hash = password::hash_password(&body.password)?;
    let updated = User::complete_password_reset(&state.db, user.id, &new_hash)
        .await?
        .ok_or(AuthApiError::Internal)?;

    issue_session(
        &state,
        &updated,
        StatusCode::CREATED,
        "Your password has been reset successfully",
    )
    .await
}
