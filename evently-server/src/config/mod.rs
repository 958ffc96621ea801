//! Configuration module for evently-server.
//!
//! Handles loading configuration from TOML files, CLI arguments, and
//! environment variables. `DATABASE_URL` is the only value read from the
//! environment; everything else lives in the config file.

pub mod file;
pub mod runtime;

use crate::config::file::FileConfig;
use crate::config::runtime::{
    AuthConfig, EmailConfig, OAuthConfig, PaymentConfig, ServerConfig, SharedConfig,
};
use evently_core::workflows::events::EventLimits;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Loaded configuration result containing all parts.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub oauth: OAuthConfig,
    pub email: EmailConfig,
    pub payment: PaymentConfig,
    pub limits: EventLimits,
}

impl LoadedConfig {
    /// Convert into a SharedConfig with Arc<RwLock<T>> wrappers.
    ///
    /// The email section is consumed at startup to build the notifier and is
    /// not part of the shared state.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig {
            server: Arc::new(RwLock::new(self.server)),
            auth: Arc::new(RwLock::new(self.auth)),
            oauth: Arc::new(RwLock::new(self.oauth)),
            payment: Arc::new(RwLock::new(self.payment)),
            limits: Arc::new(RwLock::new(self.limits)),
        }
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        self.validate(&file_config)?;

        Ok(build_loaded_config(file_config))
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.auth.jwt_secret.len() < 16 {
            return Err(ConfigError::ValidationError(
                "auth.jwt_secret must be at least 16 characters".to_string(),
            ));
        }
        if config.limits.free_ticket_min > config.limits.free_ticket_max
            && config.limits.free_ticket_max != 0
        {
            return Err(ConfigError::ValidationError(
                "limits.free_ticket_min exceeds limits.free_ticket_max".to_string(),
            ));
        }
        Ok(())
    }
}

fn build_loaded_config(file_config: FileConfig) -> LoadedConfig {
    LoadedConfig {
        server: ServerConfig {
            listen: file_config.server.listen,
            public_url: file_config.server.public_url,
        },
        auth: AuthConfig {
            jwt_secret: file_config.auth.jwt_secret.into_bytes().into_boxed_slice(),
            jwt_expiry: time::Duration::hours(file_config.auth.jwt_expiry_hours),
            cookie_name: file_config.auth.cookie_name,
            cookie_expires: time::Duration::days(file_config.auth.cookie_expires_days),
        },
        oauth: OAuthConfig {
            google_client_id: file_config.oauth.google_client_id,
            google_client_secret: file_config.oauth.google_client_secret,
            google_redirect_url: file_config.oauth.google_redirect_url,
        },
        email: EmailConfig {
            api_key: file_config.email.api_key,
            from_address: file_config.email.from_address,
        },
        payment: PaymentConfig {
            secret_key: file_config.payment.secret_key,
            callback_url: file_config.payment.callback_url,
            currency: file_config.payment.currency,
            base_url: file_config.payment.base_url,
        },
        limits: convert_limits(&file_config.limits),
    }
}

/// A bound of 0 in the file disables that bound.
fn convert_limits(limits: &file::LimitsSection) -> EventLimits {
    EventLimits {
        image_max_bytes: limits.image_max_bytes,
        free_ticket_min: (limits.free_ticket_min > 0).then_some(limits.free_ticket_min),
        free_ticket_max: (limits.free_ticket_max > 0).then_some(limits.free_ticket_max),
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bounds_disable_free_ticket_limits() {
        let section = file::LimitsSection {
            image_max_bytes: 1024,
            free_ticket_min: 0,
            free_ticket_max: 0,
        };
        let limits = convert_limits(&section);
        assert_eq!(limits.image_max_bytes, 1024);
        assert_eq!(limits.free_ticket_min, None);
        assert_eq!(limits.free_ticket_max, None);

        let bounded = convert_limits(&file::LimitsSection::default());
        assert_eq!(bounded.free_ticket_min, Some(2));
        assert_eq!(bounded.free_ticket_max, Some(20));
    }
}
