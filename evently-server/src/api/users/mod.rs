//! User handlers.
//!
//! # Endpoints
//!
//! - `GET   /users`       – list accounts (admin)
//! - `GET   /users/{id}`  – fetch one account
//! - `PATCH /users/{id}`  – update profile fields (self or admin)

use crate::api::extractors::AuthRejection;
use crate::api::{error_response, validation_error_response};
use crate::state::AppState;
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use evently_core::entities::users::User;
use evently_core::validate::Violation;
use evently_sdk::objects::users::UserResponse;

mod get_user;
mod list_users;
mod update_user;

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users::list_users))
        .route(
            "/{id}",
            get(get_user::get_user).patch(update_user::update_user),
        )
}

/// Convert a `User` (DB model) into a `UserResponse` (API model).
///
/// The password hash and reset-token material never leave this boundary.
pub(crate) fn to_user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        second_name: user.second_name.clone(),
        role: user.role.into(),
        active: user.active,
        created_at: user.created_at.assume_utc().unix_timestamp(),
    }
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in user handlers.
#[derive(Debug)]
enum UserApiError {
    Auth(AuthRejection),
    Validation(Vec<Violation>),
    /// Another account already uses the requested email.
    EmailTaken,
    NotFound,
    Database(sqlx::Error),
}

impl From<AuthRejection> for UserApiError {
    fn from(rejection: AuthRejection) -> Self {
        UserApiError::Auth(rejection)
    }
}

impl From<sqlx::Error> for UserApiError {
    fn from(err: sqlx::Error) -> Self {
        UserApiError::Database(err)
    }
}

impl IntoResponse for UserApiError {
    fn into_response(self) -> Response {
        match self {
            UserApiError::Auth(rejection) => rejection.into_response(),
            UserApiError::Validation(errors) => validation_error_response(errors),
            UserApiError::EmailTaken => error_response(
                StatusCode::BAD_REQUEST,
                "User already exists with that email",
            ),
            UserApiError::NotFound => error_response(StatusCode::NOT_FOUND, "User not found"),
            UserApiError::Database(e) => {
                tracing::error!(error = %e, "User API database error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
