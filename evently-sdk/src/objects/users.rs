//! Request and response bodies for the user endpoints.

use crate::objects::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User as exposed over the API. Never carries the password hash or any
/// reset-token material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub second_name: String,
    pub role: Role,
    pub active: bool,
    /// Unix timestamp of account creation.
    pub created_at: i64,
}

/// `PATCH /users/{id}` — all fields optional; omitted fields are untouched.
///
/// Role and password are not updatable through this path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub second_name: Option<String>,
}
