//! Payments Config

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    time::Duration,
};

use clap::Args;

use storefront_app::{
    context::PaymentsSettings,
    payments::{PayPalConfig, paypal::SANDBOX_ENDPOINT},
};

/// `PayPal` REST API settings.
#[derive(Args)]
pub struct PaymentsConfig {
    /// `PayPal` API base URL
    #[arg(long, env = "PAYPAL_ENDPOINT", default_value = SANDBOX_ENDPOINT)]
    pub paypal_endpoint: String,

    /// `PayPal` OAuth client id
    #[arg(long, env = "PAYPAL_CLIENT_ID", default_value = "")]
    pub paypal_client_id: String,

    /// `PayPal` OAuth client secret
    #[arg(long, env = "PAYPAL_CLIENT_SECRET", default_value = "", hide_env_values = true)]
    pub paypal_client_secret: String,

    /// ISO 4217 currency sent with every payment
    #[arg(long, env = "PAYPAL_CURRENCY", default_value = "USD")]
    pub paypal_currency: String,

    /// Public URL customers are sent back to after paying
    #[arg(long, env = "PUBLIC_BASE_URL", default_value = "http://localhost:8698")]
    pub public_base_url: String,

    /// Seconds before a `PayPal` request is abandoned
    #[arg(long, env = "PAYPAL_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub paypal_timeout_seconds: u64,
}

impl Debug for PaymentsConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PaymentsConfig")
            .field("paypal_endpoint", &self.paypal_endpoint)
            .field("paypal_client_id", &self.paypal_client_id)
            .field("paypal_client_secret", &"**redacted**")
            .field("paypal_currency", &self.paypal_currency)
            .field("public_base_url", &self.public_base_url)
            .field("paypal_timeout_seconds", &self.paypal_timeout_seconds)
            .finish()
    }
}

impl PaymentsConfig {
    pub(crate) fn to_settings(&self) -> PaymentsSettings {
        PaymentsSettings {
            paypal: PayPalConfig {
                endpoint: self.paypal_endpoint.clone(),
                client_id: self.paypal_client_id.clone(),
                client_secret: self.paypal_client_secret.clone(),
                return_base_url: self.public_base_url.clone(),
                timeout: Duration::from_secs(self.paypal_timeout_seconds.max(1)),
            },
            currency: self.paypal_currency.clone(),
        }
    }
}
