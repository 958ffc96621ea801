//! Pluggable credential strategies.
//!
//! Each strategy turns one kind of credential into an authenticated
//! [`User`]. Route handlers hold the concrete strategy for their flow;
//! the trait exists so the login surface stays uniform across password and
//! OAuth-code logins.

use crate::auth::{AuthError, password};
use crate::entities::Role;
use crate::entities::users::{User, UserInsert};
use async_trait::async_trait;
use serde::Deserialize;
use sqlx::PgPool;

/// Credentials presented by a login attempt.
#[derive(Debug, Clone)]
pub enum Credentials {
    Password { email: String, password: String },
    GoogleCode { code: String },
}

#[async_trait]
pub trait AuthStrategy: Send + Sync {
    async fn authenticate(&self, credentials: Credentials) -> Result<User, AuthError>;
}

// -- Password -----------------------------------------------------------

pub struct PasswordStrategy {
    pool: PgPool,
}

impl PasswordStrategy {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthStrategy for PasswordStrategy {
    async fn authenticate(&self, credentials: Credentials) -> Result<User, AuthError> {
        let Credentials::Password { email, password } = credentials else {
            return Err(AuthError::InvalidCredentials);
        };

        let user = User::find_by_email(&self.pool, &email)
            .await?
            .ok_or(AuthError::NotFound)?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AuthError::NoPassword);
        };

        if password::verify_password(&password, hash)? {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

// -- Google OAuth code flow ---------------------------------------------

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    /// Override points for tests; defaults are the live Google endpoints.
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
}

impl GoogleOAuthConfig {
    pub fn new(client_id: String, client_secret: String, redirect_url: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_url,
            token_endpoint: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_endpoint: "https://openidconnect.googleapis.com/v1/userinfo".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleProfile {
    /// Google's stable subject id.
    sub: String,
    email: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
}

pub struct GoogleCodeStrategy {
    pool: PgPool,
    http: reqwest::Client,
    config: GoogleOAuthConfig,
}

impl GoogleCodeStrategy {
    pub fn new(pool: PgPool, http: reqwest::Client, config: GoogleOAuthConfig) -> Self {
        Self { pool, http, config }
    }

    async fn exchange_code(&self, code: &str) -> Result<GoogleProfile, AuthError> {
        let token: TokenExchangeResponse = self
            .http
            .post(&self.config.token_endpoint)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuthError::OAuth(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))?;

        self.http
            .get(&self.config.userinfo_endpoint)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))?
            .error_for_status()
            .map_err(|e| AuthError::OAuth(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::OAuth(e.to_string()))
    }

    /// Find the account for this Google subject, creating it on first login.
    async fn find_or_create(&self, profile: GoogleProfile) -> Result<User, AuthError> {
        if let Some(user) = User::find_by_google_id(&self.pool, &profile.sub).await? {
            return Ok(user);
        }

        let email = profile
            .email
            .ok_or_else(|| AuthError::OAuth("profile carries no email".to_string()))?;
        let insert = UserInsert {
            email,
            first_name: profile.given_name.unwrap_or_default(),
            second_name: profile.family_name.unwrap_or_default(),
            password_hash: None,
            role: Role::RegularUser,
            google_id: Some(profile.sub),
        };
        Ok(User::insert_new(&self.pool, insert).await?)
    }
}

#[async_trait]
impl AuthStrategy for GoogleCodeStrategy {
    async fn authenticate(&self, credentials: Credentials) -> Result<User, AuthError> {
        let Credentials::GoogleCode { code } = credentials else {
            return Err(AuthError::InvalidCredentials);
        };
        let profile = self.exchange_code(&code).await?;
        self.find_or_create(profile).await
    }
}
