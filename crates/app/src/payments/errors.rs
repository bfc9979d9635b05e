//! Payment provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    /// Transport failure or an undecodable body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status from the provider.
    #[error("unexpected response from payment provider: {0}")]
    UnexpectedResponse(String),
}
