//! Payment-initialization gateway (Paystack-style API).
//!
//! One HTTPS POST with a bearer secret; the gateway answers with a
//! redirect (`authorization_url`) where the payer completes the charge.
//! Confirmation arrives later on the webhook, authenticated by an
//! HMAC-SHA512 signature over the raw body.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway answered but refused the initialization.
    #[error("gateway declined: {0}")]
    Declined(String),

    #[error("gateway returned an unreadable response: {0}")]
    BadResponse(String),
}

/// Payload sent to the gateway's `transaction/initialize` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitializeRequest {
    pub email: String,
    /// Minor units (ticket price × 100).
    pub amount: i64,
    pub currency: String,
    pub callback_url: String,
    pub reference: String,
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeResponse {
    pub authorization_url: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initialize(&self, request: &InitializeRequest)
    -> Result<InitializeResponse, GatewayError>;
}

// -- Paystack ------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PaystackEnvelope {
    status: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<PaystackData>,
}

#[derive(Debug, Deserialize)]
struct PaystackData {
    authorization_url: String,
}

pub struct PaystackGateway {
    http: reqwest::Client,
    secret_key: String,
    base_url: String,
}

impl PaystackGateway {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.paystack.co";

    pub fn new(secret_key: String, base_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            secret_key,
            base_url: base_url.unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize(
        &self,
        request: &InitializeRequest,
    ) -> Result<InitializeResponse, GatewayError> {
        let url = format!("{}/transaction/initialize", self.base_url);
        let envelope: PaystackEnvelope = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !envelope.status {
            return Err(GatewayError::Declined(envelope.message));
        }
        match envelope.data {
            Some(data) => Ok(InitializeResponse {
                authorization_url: data.authorization_url,
            }),
            None => Err(GatewayError::BadResponse(
                "accepted without an authorization_url".to_string(),
            )),
        }
    }
}

// -- Webhook authentication ----------------------------------------------

/// Verify the gateway's webhook signature: hex HMAC-SHA512 of the raw body
/// keyed with the account secret.
pub fn verify_webhook_signature(secret: &[u8], body: &[u8], signature_hex: &str) -> bool {
    let Some(presented) = decode_hex(signature_hex) else {
        return false;
    };
    let key = ring::hmac::Key::new(ring::hmac::HMAC_SHA512, secret);
    ring::hmac::verify(&key, body, &presented).is_ok()
}

/// Counterpart of [`verify_webhook_signature`], used by tests and by any
/// client simulating the gateway.
pub fn sign_webhook_body(secret: &[u8], body: &[u8]) -> String {
    let key = ring::hmac::Key::new(ring::hmac::HMAC_SHA512, secret);
    let tag = ring::hmac::sign(&key, body);
    tag.as_ref().iter().map(|b| format!("{b:02x}")).collect()
}

fn decode_hex(input: &str) -> Option<Vec<u8>> {
    if input.len() % 2 != 0 {
        return None;
    }
    (0..input.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(input.get(i..i + 2)?, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_signature_round_trip() {
        let secret = b"sk_test_abcdef";
        let body = br#"{"event":"charge.success","data":{"reference":"PAY-1-1"}}"#;
        let signature = sign_webhook_body(secret, body);
        assert!(verify_webhook_signature(secret, body, &signature));
    }

    #[test]
    fn webhook_signature_rejects_tampering() {
        let secret = b"sk_test_abcdef";
        let body = br#"{"event":"charge.success"}"#;
        let signature = sign_webhook_body(secret, body);
        assert!(!verify_webhook_signature(secret, b"{}", &signature));
        assert!(!verify_webhook_signature(b"other-secret", body, &signature));
        assert!(!verify_webhook_signature(secret, body, "zz-not-hex"));
        assert!(!verify_webhook_signature(secret, body, "abc"));
    }
}
