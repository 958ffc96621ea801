use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use evently_core::auth::password;
use evently_core::entities::users::User;
use evently_core::validate::Violation;
use evently_sdk::objects::auth::ForgotPasswordRequest;

use super::AuthApiError;
use crate::api::success;
use crate::state::AppState;

/// `POST /auth/forgot-password` — mint a reset token and mail it.
///
/// Only the SHA-256 digest of the token is stored. If the mail cannot be
/// delivered the stored digest is cleared again so the account is left
/// exactly as before the request.
pub(super) async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    if body.email.trim().is_empty() {
        return Err(AuthApiError::Validation(vec![Violation::new(
            "email",
            "Please enter your email",
        )]));
    }

    let user = User::find_by_email(&state.db, &body.email)
        .await?
        .ok_or(AuthApiError::UserNotFound)?;

    let token = password::mint_reset_token();
    User::set_reset_token(&state.db, user.id, &token.digest, token.expires).await?;

    let public_url = state.config.server.read().await.public_url.clone();
    let reset_url = format!("{public_url}/auth/reset-password/{}", token.raw);
    let message = format!(
        "Forgot your password? Submit a request with your new password to: {reset_url}\n\
         If you didn't make this request, please ignore this email.",
    );

    let outcome = state
        .notifier
        .send_email(
            &user.email,
            "Your password reset token (valid for 10 minutes)",
            &message,
        )
        .await;

    if !outcome.success {
        User::clear_reset_token(&state.db, user.id).await?;
        return Err(AuthApiError::EmailDeliveryFailed);
    }

    Ok(success(StatusCode::OK, "Token sent to your email!", ()))
}
