use axum::{Json, extract::State, http::StatusCode, response::Response};
use evently_core::auth::password;
use evently_core::entities::Role;
use evently_core::entities::users::{User, UserInsert};
use evently_core::validate::Validate;
use evently_sdk::objects::auth::RegisterRequest;

use super::{AuthApiError, issue_session};
use crate::state::AppState;

/// `POST /auth/register` — create a local account.
///
/// Duplicate emails are rejected with a pre-check so the caller gets a 400
/// instead of a constraint error surfacing as a 500.
pub(super) async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Response, AuthApiError> {
    body.check().map_err(AuthApiError::Validation)?;

    if User::find_by_email(&state.db, &body.email).await?.is_some() {
        return Err(AuthApiError::EmailTaken);
    }

    let password_hash = password::hash_password(&body.password)?;
    let user = User::insert_new(
        &state.db,
        UserInsert {
            email: body.email,
            first_name: body.first_name,
            second_name: body.second_name,
            password_hash: Some(password_hash),
            role: Role::RegularUser,
            google_id: None,
        },
    )
    .await?;

    issue_session(&state, &user, StatusCode::CREATED, "Registered successfully").await
}
