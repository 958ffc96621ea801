//! Application state shared across all request handlers.

use crate::config::runtime::SharedConfig;
use evently_core::gateways::email::Notifier;
use evently_core::gateways::payment::PaymentGateway;
use sqlx::PgPool;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
/// The gateway clients are built once at startup from the initial
/// configuration; a SIGHUP reload swaps the config sections but not the
/// gateway credentials.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Runtime configuration (can be reloaded via SIGHUP).
    pub config: SharedConfig,
    /// Transactional email delivery.
    pub notifier: Arc<dyn Notifier>,
    /// Payment-initialization gateway.
    pub payment_gateway: Arc<dyn PaymentGateway>,
    /// Shared HTTP client for OAuth code exchange.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(
        db: PgPool,
        config: SharedConfig,
        notifier: Arc<dyn Notifier>,
        payment_gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            db,
            config,
            notifier,
            payment_gateway,
            http: reqwest::Client::new(),
        }
    }
}
