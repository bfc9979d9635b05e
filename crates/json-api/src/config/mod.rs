//! Server configuration module

use clap::Parser;

use crate::config::{
    carts::CartsConfig, db::DatabaseConfig, logging::LoggingConfig, payments::PaymentsConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod carts;
pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod payments;
pub(crate) mod server;

pub(crate) use logging::LogFormat;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Payment provider settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Idle cart sweeping.
    #[command(flatten)]
    pub carts: CartsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_the_database_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.server.shutdown_grace(), std::time::Duration::from_secs(30));
        assert_eq!(config.payments.paypal_currency, "USD");
        assert_eq!(config.carts.cart_sweep_interval_seconds, 3600);
        assert_eq!(config.logging.slow_request_threshold_ms, 1_000);
        assert_eq!(
            config.payments.to_settings().paypal.timeout,
            std::time::Duration::from_secs(10)
        );

        Ok(())
    }

    #[test]
    fn debug_output_hides_payment_secret() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "--paypal-client-secret",
            "hunter2",
        ])?;

        let rendered = format!("{config:?}");

        assert!(!rendered.contains("hunter2"), "secret leaked: {rendered}");

        Ok(())
    }
}
