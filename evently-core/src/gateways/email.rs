//! Transactional email delivery.
//!
//! A send always resolves to a [`SendOutcome`]; callers (password reset,
//! RSVP fan-out) treat delivery failure as data, not as an abort.

use async_trait::async_trait;
use serde_json::json;

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub success: bool,
    pub message: String,
}

impl SendOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: "Email sent successfully".to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> SendOutcome;
}

/// SendGrid v3 `mail/send` client.
pub struct SendgridMailer {
    http: reqwest::Client,
    api_key: String,
    from_address: String,
}

impl SendgridMailer {
    const ENDPOINT: &'static str = "https://api.sendgrid.com/v3/mail/send";

    pub fn new(api_key: String, from_address: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            api_key,
            from_address,
        }
    }
}

#[async_trait]
impl Notifier for SendgridMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> SendOutcome {
        let payload = json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.from_address },
            "subject": subject,
            "content": [{ "type": "text/plain", "value": body }],
        });

        let response = self
            .http
            .post(Self::ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(res) if res.status().is_success() => SendOutcome::ok(),
            Ok(res) => {
                let status = res.status();
                let detail = res.text().await.unwrap_or_default();
                tracing::error!(%status, detail, to, "Email provider rejected send");
                SendOutcome::failed(format!("Email provider returned {status}"))
            }
            Err(e) => {
                tracing::error!(error = %e, to, "Email request failed");
                SendOutcome::failed("Failed to send email")
            }
        }
    }
}
