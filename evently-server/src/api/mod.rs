//! HTTP surface: one module per resource, one file per handler.

pub mod auth;
pub mod events;
pub mod extractors;
pub mod payments;
pub mod users;

use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;

/// Assemble the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/events", events::router())
        .nest("/users", users::router())
        .nest("/payments", payments::router())
}

/// Success envelope: `{"status": true, "message": ..., "data": ...}`.
#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: bool,
    pub message: String,
    pub data: T,
}

pub fn success<T: Serialize>(
    code: StatusCode,
    message: impl Into<String>,
    data: T,
) -> (StatusCode, Json<Envelope<T>>) {
    (
        code,
        Json(Envelope {
            status: true,
            message: message.into(),
            data,
        }),
    )
}

/// Error envelope: `{"status_code": ..., "status": ..., "message": ...}`.
/// 4xx responses report "failed", everything else "error"; internal detail
/// never travels in the message.
#[derive(Serialize)]
struct ErrorBody {
    status_code: u16,
    status: &'static str,
    message: String,
}

pub fn error_response(code: StatusCode, message: impl Into<String>) -> Response {
    let status = if code.is_client_error() {
        "failed"
    } else {
        "error"
    };
    (
        code,
        Json(ErrorBody {
            status_code: code.as_u16(),
            status,
            message: message.into(),
        }),
    )
        .into_response()
}

/// 400 envelope carrying the full violation list.
#[derive(Serialize)]
struct ValidationErrorBody {
    status_code: u16,
    status: &'static str,
    message: &'static str,
    errors: Vec<evently_core::validate::Violation>,
}

pub fn validation_error_response(errors: Vec<evently_core::validate::Violation>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationErrorBody {
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            status: "failed",
            message: "Validation failed",
            errors,
        }),
    )
        .into_response()
}
