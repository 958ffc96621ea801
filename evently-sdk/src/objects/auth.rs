//! Request and response bodies for the authentication endpoints.

use crate::objects::users::UserResponse;
use serde::{Deserialize, Serialize};

/// `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub second_name: String,
    pub email: String,
    pub password: String,
}

/// `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/forgot-password`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// `PATCH /auth/reset-password/{token}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// `PATCH /auth/update-password/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub password: String,
}

/// Query parameters of the OAuth redirect: `GET /auth/google/callback?code=...`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: String,
}

/// Returned by every endpoint that establishes a session.
///
/// The token is also set as an http-only cookie; the body copy exists for
/// clients that prefer the `Authorization: Bearer` header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}
