//! TOML file configuration structures.
//!
//! These structs directly map to the `evently-config.toml` file format.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub server: ServerSection,
    pub auth: AuthSection,
    #[serde(default)]
    pub oauth: OAuthSection,
    pub email: EmailSection,
    pub payment: PaymentSection,
    #[serde(default)]
    pub limits: LimitsSection,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
    /// Externally reachable base URL, used in password-reset links.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default address")
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

/// Bearer-token configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSection {
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiry_hours")]
    pub jwt_expiry_hours: i64,
    /// Name of the session cookie carrying the token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_cookie_days")]
    pub cookie_expires_days: i64,
}

fn default_jwt_expiry_hours() -> i64 {
    1
}

fn default_cookie_name() -> String {
    "jwt".to_string()
}

fn default_cookie_days() -> i64 {
    1
}

/// Google OAuth section. Optional: with an empty client id the OAuth login
/// route answers with an error instead of calling out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthSection {
    #[serde(default)]
    pub google_client_id: String,
    #[serde(default)]
    pub google_client_secret: String,
    #[serde(default)]
    pub google_redirect_url: String,
}

/// Email provider section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSection {
    pub api_key: String,
    pub from_address: String,
}

/// Payment gateway section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSection {
    /// Bearer secret for the gateway API; also keys webhook signatures.
    pub secret_key: String,
    /// Where the gateway redirects the payer after checkout.
    pub callback_url: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Override for tests / self-hosted gateways.
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_currency() -> String {
    "NGN".to_string()
}

/// Workflow limits. A free-ticket bound of 0 disables that bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSection {
    #[serde(default = "default_image_max_bytes")]
    pub image_max_bytes: usize,
    #[serde(default = "default_free_ticket_min")]
    pub free_ticket_min: i32,
    #[serde(default = "default_free_ticket_max")]
    pub free_ticket_max: i32,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            image_max_bytes: default_image_max_bytes(),
            free_ticket_min: default_free_ticket_min(),
            free_ticket_max: default_free_ticket_max(),
        }
    }
}

fn default_image_max_bytes() -> usize {
    3 * 1024 * 1024
}

fn default_free_ticket_min() -> i32 {
    2
}

fn default_free_ticket_max() -> i32 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[auth]
jwt_secret = "test-secret"

[email]
api_key = "sg-key"
from_address = "no-reply@example.com"

[payment]
secret_key = "sk_test_123"
callback_url = "https://example.com/thanks"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.auth.jwt_expiry_hours, 1);
        assert_eq!(config.auth.cookie_name, "jwt");
        assert_eq!(config.payment.currency, "NGN");
        assert!(config.payment.base_url.is_none());
        assert_eq!(config.limits.image_max_bytes, 3 * 1024 * 1024);
        assert_eq!(config.limits.free_ticket_min, 2);
        assert_eq!(config.limits.free_ticket_max, 20);
        assert!(config.oauth.google_client_id.is_empty());
    }

    #[test]
    fn test_limit_overrides() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[auth]
jwt_secret = "test-secret"
jwt_expiry_hours = 12

[email]
api_key = "sg-key"
from_address = "no-reply@example.com"

[payment]
secret_key = "sk_test_123"
callback_url = "https://example.com/thanks"
currency = "USD"

[limits]
free_ticket_min = 0
free_ticket_max = 50
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.auth.jwt_expiry_hours, 12);
        assert_eq!(config.payment.currency, "USD");
        assert_eq!(config.limits.free_ticket_min, 0);
        assert_eq!(config.limits.free_ticket_max, 50);
    }
}
