use axum::{Json, extract::State, http::StatusCode, response::Response};
use evently_core::auth::strategy::{AuthStrategy, Credentials, PasswordStrategy};
use evently_core::validate::Validate;
use evently_sdk::objects::auth::LoginRequest;

use super::{AuthApiError, issue_session};
use crate::state::AppState;

/// `POST /auth/login` — password login.
pub(super) async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, AuthApiError> {
    body.check().map_err(AuthApiError::Validation)?;

    let strategy = PasswordStrategy::new(state.db.clone());
    let user = strategy
        .authenticate(Credentials::Password {
            email: body.email,
            password: body.password,
        })
        .await?;

    issue_session(&state, &user, StatusCode::OK, "Login successful").await
}
