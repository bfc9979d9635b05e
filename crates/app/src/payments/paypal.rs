//! PayPal REST client for hosted checkout.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    time::Duration,
};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use reqwest::{Client, Response, header::CONTENT_TYPE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::payments::{PaymentError, PaymentProvider};

/// PayPal sandbox API base URL.
pub const SANDBOX_ENDPOINT: &str = "https://api-m.sandbox.paypal.com";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for connecting to the PayPal REST API.
#[derive(Clone)]
pub struct PayPalConfig {
    /// API base URL, e.g. [`SANDBOX_ENDPOINT`].
    pub endpoint: String,

    pub client_id: String,

    pub client_secret: String,

    /// Public URL of this service; the customer is sent back to
    /// `{return_base_url}/orders/{id}/finish-payment` after approving.
    pub return_base_url: String,

    /// Upper bound on each provider request, connection included.
    pub timeout: Duration,
}

impl Debug for PayPalConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PayPalConfig")
            .field("endpoint", &self.endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"**redacted**")
            .field("return_base_url", &self.return_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Timestamp,
}

/// OAuth2 client-credentials client for the PayPal orders API.
///
/// The bearer token is cached until it expires; the cache lock is held across a refresh so
/// concurrent callers never request more than one token.
#[derive(Debug)]
pub struct PayPalClient {
    config: PayPalConfig,
    http: Client,
    token: Mutex<Option<AccessToken>>,
}

impl PayPalClient {
    /// Build a client whose requests give up after `config.timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be initialised.
    pub fn new(config: PayPalConfig) -> Result<Self, PaymentError> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            config,
            http,
            token: Mutex::new(None),
        })
    }

    async fn access_token(&self) -> Result<String, PaymentError> {
        let mut cached = self.token.lock().await;
        let now = Timestamp::now();

        if let Some(token) = cached.as_ref()
            && token.expires_at > now
        {
            return Ok(token.value.clone());
        }

        let response = self
            .http
            .post(format!("{}/v1/oauth2/token", self.config.endpoint))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?;

        let parsed: AccessTokenResponse = ensure_success(response, "token").await?.json().await?;

        let expires_at = now
            .checked_add(SignedDuration::from_secs(parsed.expires_in))
            .unwrap_or(now);

        tracing::debug!(expires_at = %expires_at, "refreshed payment provider token");

        *cached = Some(AccessToken {
            value: parsed.access_token.clone(),
            expires_at,
        });

        Ok(parsed.access_token)
    }
}

#[async_trait]
impl PaymentProvider for PayPalClient {
    #[tracing::instrument(name = "payments.paypal.create_order", skip(self), err)]
    async fn create_order(
        &self,
        order_id: i64,
        currency: &str,
        amount: Decimal,
    ) -> Result<String, PaymentError> {
        let token = self.access_token().await?;

        let body = CreateOrderRequest {
            intent: "CAPTURE",
            purchase_units: vec![PurchaseUnit {
                amount: PurchaseUnitAmount {
                    currency_code: currency.to_string(),
                    value: format!("{:.2}", amount.round_dp(2)),
                },
            }],
            application_context: ApplicationContext {
                return_url: format!(
                    "{}/orders/{order_id}/finish-payment",
                    self.config.return_base_url.trim_end_matches('/')
                ),
            },
        };

        let response = self
            .http
            .post(format!("{}/v2/checkout/orders", self.config.endpoint))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let parsed: CreateOrderResponse =
            ensure_success(response, "create order").await?.json().await?;

        Ok(parsed.id)
    }

    #[tracing::instrument(name = "payments.paypal.check_order_completed", skip(self), err)]
    async fn check_order_completed(&self, provider_order_id: &str) -> Result<bool, PaymentError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .post(format!(
                "{}/v2/checkout/orders/{provider_order_id}/capture",
                self.config.endpoint
            ))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let parsed: CaptureOrderResponse =
            ensure_success(response, "capture order").await?.json().await?;

        Ok(parsed.status == "COMPLETED")
    }
}

async fn ensure_success(response: Response, operation: &str) -> Result<Response, PaymentError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    Err(PaymentError::UnexpectedResponse(format!(
        "{operation} request failed with status {status}: {text}"
    )))
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    intent: &'static str,
    purchase_units: Vec<PurchaseUnit>,
    application_context: ApplicationContext,
}

#[derive(Debug, Serialize)]
struct PurchaseUnit {
    amount: PurchaseUnitAmount,
}

#[derive(Debug, Serialize)]
struct PurchaseUnitAmount {
    currency_code: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct ApplicationContext {
    return_url: String,
}

#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CaptureOrderResponse {
    status: String,
}
