//! External payment provider.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;

pub mod errors;
pub mod paypal;

pub use errors::PaymentError;
pub use paypal::{PayPalClient, PayPalConfig};

/// A hosted checkout the customer is redirected to, polled until the payment is captured.
#[automock]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Register a payment for `order_id` and return the provider's order id.
    async fn create_order(
        &self,
        order_id: i64,
        currency: &str,
        amount: Decimal,
    ) -> Result<String, PaymentError>;

    /// Try to capture the provider order; `true` once the payment is complete.
    async fn check_order_completed(&self, provider_order_id: &str) -> Result<bool, PaymentError>;
}
