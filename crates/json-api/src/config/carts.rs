//! Carts Config

use std::time::Duration;

use clap::Args;

/// Idle cart sweeping settings.
#[derive(Debug, Args)]
pub struct CartsConfig {
    /// Seconds between sweeps of idle carts
    #[arg(long, env = "CART_SWEEP_INTERVAL_SECONDS", default_value_t = 3600_u64)]
    pub cart_sweep_interval_seconds: u64,
}

impl CartsConfig {
    pub(crate) fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cart_sweep_interval_seconds.max(1))
    }
}
