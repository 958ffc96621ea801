//! Authentication primitives: password hashing, bearer tokens, reset
//! tokens, and the pluggable credential strategies.

pub mod password;
pub mod strategy;
pub mod tokens;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password or unusable OAuth code.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account matches the presented identity.
    #[error("account not found")]
    NotFound,

    /// OAuth-only account asked to do a password operation.
    #[error("account has no password set")]
    NoPassword,

    #[error("token is invalid or expired")]
    InvalidToken,

    /// The password changed after this token was issued.
    #[error("password changed after token was issued")]
    StaleToken,

    #[error("password hashing error: {0}")]
    Hash(String),

    #[error("oauth exchange failed: {0}")]
    OAuth(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
