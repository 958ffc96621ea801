//! Authentication handlers.
//!
//! # Endpoints
//!
//! - `POST  /auth/register`                   – create a local account
//! - `POST  /auth/login`                      – password login
//! - `GET   /auth/google/callback`            – OAuth code exchange
//! - `POST  /auth/forgot-password`            – mint and mail a reset token
//! - `PATCH /auth/reset-password/{token}`     – consume a reset token
//! - `PATCH /auth/update-password/{id}`       – change password (logged in)

use crate::api::users::to_user_response;
use crate::api::{error_response, success, validation_error_response};
use crate::state::AppState;
use axum::{
    Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use evently_core::auth::{AuthError, tokens};
use evently_core::entities::users::User;
use evently_core::validate::Violation;
use evently_sdk::objects::auth::AuthResponse;

mod forgot_password;
mod google;
mod login;
mod register;
mod reset_password;
mod update_password;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register::register))
        .route("/login", post(login::login))
        .route("/google/callback", get(google::google_callback))
        .route("/forgot-password", post(forgot_password::forgot_password))
        .route(
            "/reset-password/{token}",
            patch(reset_password::reset_password),
        )
        .route(
            "/update-password/{id}",
            patch(update_password::update_password),
        )
}

/// Issue a bearer token for the user and answer with the session envelope.
///
/// The token travels twice: in the body for header-based clients, and as an
/// http-only cookie for browser sessions.
async fn issue_session(
    state: &AppState,
    user: &User,
    code: StatusCode,
    message: &str,
) -> Result<Response, AuthApiError> {
    let auth = state.config.auth.read().await;
    let token = tokens::issue(
        auth.secret_bytes(),
        user.id,
        user.role.into(),
        auth.jwt_expiry,
    )
    .map_err(|_| AuthApiError::Internal)?;
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; Max-Age={}",
        auth.cookie_name,
        token,
        auth.cookie_expires.whole_seconds()
    );
    drop(auth);

    let body = AuthResponse {
        token,
        user: to_user_response(user),
    };
    let mut response = success(code, message, body).into_response();
    match header::HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode session cookie");
        }
    }
    Ok(response)
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in auth handlers.
#[derive(Debug)]
enum AuthApiError {
    /// Payload failed field validation.
    Validation(Vec<Violation>),
    /// An account already exists with that email.
    EmailTaken,
    /// No account matches the presented identity.
    UserNotFound,
    /// OAuth-only account asked for a password operation.
    NoPassword,
    /// Wrong password at login.
    WrongPassword,
    /// Wrong current password at password change.
    WrongCurrentPassword,
    /// Caller tried to change another account's password.
    NotYou,
    /// Reset token unknown or past its expiry.
    ResetTokenInvalid,
    /// OAuth section not configured.
    OAuthUnavailable,
    /// Code exchange or profile fetch failed.
    OAuthFailed,
    /// The reset email could not be delivered.
    EmailDeliveryFailed,
    /// Anything unexpected; detail is logged, never surfaced.
    Internal,
}

impl From<AuthError> for AuthApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotFound => AuthApiError::UserNotFound,
            AuthError::NoPassword => AuthApiError::NoPassword,
            AuthError::InvalidCredentials => AuthApiError::WrongPassword,
            AuthError::OAuth(detail) => {
                tracing::error!(detail, "OAuth exchange failed");
                AuthApiError::OAuthFailed
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
                AuthApiError::Internal
            }
            AuthError::Hash(detail) => {
                tracing::error!(detail, "Password hashing error");
                AuthApiError::Internal
            }
            AuthError::InvalidToken | AuthError::StaleToken => AuthApiError::Internal,
        }
    }
}

impl From<sqlx::Error> for AuthApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "Auth database error");
        AuthApiError::Internal
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        match self {
            AuthApiError::Validation(errors) => validation_error_response(errors),
            AuthApiError::EmailTaken => error_response(
                StatusCode::BAD_REQUEST,
                "User already exists with that email",
            ),
            AuthApiError::UserNotFound => {
                error_response(StatusCode::NOT_FOUND, "User does not exist")
            }
            AuthApiError::NoPassword => {
                error_response(StatusCode::BAD_REQUEST, "Password is missing for the user")
            }
            AuthApiError::WrongPassword => error_response(
                StatusCode::BAD_REQUEST,
                "Invalid Password, please try again",
            ),
            AuthApiError::WrongCurrentPassword => {
                error_response(StatusCode::UNAUTHORIZED, "Current password is incorrect")
            }
            AuthApiError::NotYou => error_response(
                StatusCode::FORBIDDEN,
                "You can only change your own password",
            ),
            AuthApiError::ResetTokenInvalid => error_response(
                StatusCode::BAD_REQUEST,
                "Reset Token has expired or it is invalid, try again",
            ),
            AuthApiError::OAuthUnavailable => error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Google login is not configured",
            ),
            AuthApiError::OAuthFailed => {
                error_response(StatusCode::BAD_GATEWAY, "Authentication with Google failed")
            }
            AuthApiError::EmailDeliveryFailed => error_response(
                StatusCode::BAD_GATEWAY,
                "Failed to send the reset email, try again later",
            ),
            AuthApiError::Internal => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred",
            ),
        }
    }
}
