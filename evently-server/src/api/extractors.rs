//! Custom Axum extractors for request authentication.
//!
//! [`CurrentUser`] resolves the caller from a bearer token (`Authorization`
//! header) or the session cookie, verifies the token, loads the account,
//! and rejects tokens issued before the last password change.

use crate::api::error_response;
use crate::state::AppState;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use evently_core::auth::{password, tokens};
use evently_core::entities::Role;
use evently_core::entities::users::User;

/// The authenticated caller.
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// Role gate for planner-only routes. Admins pass as well.
    pub fn require_planner(&self) -> Result<(), AuthRejection> {
        match self.0.role {
            Role::EventPlanner | Role::Admin => Ok(()),
            Role::RegularUser => Err(AuthRejection::Forbidden),
        }
    }

    pub fn require_admin(&self) -> Result<(), AuthRejection> {
        match self.0.role {
            Role::Admin => Ok(()),
            _ => Err(AuthRejection::Forbidden),
        }
    }
}

/// Errors raised while resolving the caller.
#[derive(Debug)]
pub enum AuthRejection {
    /// No token in header or cookie.
    Missing,
    /// Signature/expiry verification failed.
    Invalid,
    /// Token verified but the account is gone or deactivated.
    UserGone,
    /// Token predates the last password change.
    Stale,
    /// Authenticated, but the role does not allow this route.
    Forbidden,
    /// Lookup failed.
    Database(sqlx::Error),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Missing => error_response(
                StatusCode::UNAUTHORIZED,
                "You are not logged in, please login",
            ),
            AuthRejection::Invalid => error_response(
                StatusCode::UNAUTHORIZED,
                "Invalid token. Please log in again",
            ),
            AuthRejection::UserGone => error_response(
                StatusCode::UNAUTHORIZED,
                "The user belonging to this token no longer exists",
            ),
            AuthRejection::Stale => error_response(
                StatusCode::UNAUTHORIZED,
                "User recently changed password! Please log in again",
            ),
            AuthRejection::Forbidden => error_response(
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action",
            ),
            AuthRejection::Database(e) => {
                tracing::error!(error = %e, "Auth lookup failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = state.config.auth.read().await;

        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts, &auth.cookie_name))
            .ok_or(AuthRejection::Missing)?;

        let claims = tokens::verify(auth.secret_bytes(), &token)
            .map_err(|_| AuthRejection::Invalid)?;
        drop(auth);

        let user = User::find_by_id(&state.db, claims.sub)
            .await
            .map_err(AuthRejection::Database)?
            .ok_or(AuthRejection::UserGone)?;

        if !user.active {
            return Err(AuthRejection::UserGone);
        }
        if password::changed_after(user.password_changed_at, claims.iat) {
            return Err(AuthRejection::Stale);
        }

        Ok(CurrentUser(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

/// Pull the token out of the `Cookie` header by cookie name.
fn cookie_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let cookies = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == cookie_name).then(|| value.to_owned())
    })
}
