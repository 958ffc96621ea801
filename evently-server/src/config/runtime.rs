//! Validated runtime configuration shared through [`crate::state::AppState`].
//!
//! Each section sits behind its own lock so a SIGHUP reload of, say, the
//! auth section does not block readers of the limits section.

use evently_core::workflows::events::EventLimits;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub public_url: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: Box<[u8]>,
    pub jwt_expiry: time::Duration,
    pub cookie_name: String,
    pub cookie_expires: time::Duration,
}

impl AuthConfig {
    pub fn secret_bytes(&self) -> &[u8] {
        &self.jwt_secret
    }
}

#[derive(Debug, Clone, Default)]
pub struct OAuthConfig {
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_url: String,
}

impl OAuthConfig {
    pub fn is_configured(&self) -> bool {
        !self.google_client_id.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: String,
    pub from_address: String,
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub secret_key: String,
    pub callback_url: String,
    pub currency: String,
    pub base_url: Option<String>,
}

/// Shared configuration state with separate locks for each section.
#[derive(Clone)]
pub struct SharedConfig {
    pub server: Arc<RwLock<ServerConfig>>,
    pub auth: Arc<RwLock<AuthConfig>>,
    pub oauth: Arc<RwLock<OAuthConfig>>,
    pub payment: Arc<RwLock<PaymentConfig>>,
    pub limits: Arc<RwLock<EventLimits>>,
}
