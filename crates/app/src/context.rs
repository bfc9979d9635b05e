//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        analytics::{AnalyticsService, PgAnalyticsService},
        carts::{CartsService, PgCartsService},
        categories::{CategoriesService, PgCategoriesService},
        characteristics::{CharacteristicsService, PgCharacteristicsService},
        checkout::{CheckoutService, PgCheckoutService},
        customers::{CustomersService, PgCustomersService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
    payments::{PayPalClient, PayPalConfig, PaymentError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),

    #[error("failed to build payment provider client")]
    Payments(#[source] PaymentError),
}

/// Payment settings the orders service needs.
#[derive(Debug, Clone)]
pub struct PaymentsSettings {
    pub paypal: PayPalConfig,
    /// ISO 4217 code sent with every provider order.
    pub currency: String,
}

/// Every service behind its trait, ready to be shared with request handlers.
#[derive(Clone)]
pub struct AppContext {
    pub categories: Arc<dyn CategoriesService>,
    pub characteristics: Arc<dyn CharacteristicsService>,
    pub products: Arc<dyn ProductsService>,
    pub customers: Arc<dyn CustomersService>,
    pub orders: Arc<dyn OrdersService>,
    pub carts: Arc<dyn CartsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub analytics: Arc<dyn AnalyticsService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or building the payment client fails.
    pub async fn from_database_url(
        url: &str,
        payments: PaymentsSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        Self::from_db(&Db::new(pool), payments)
    }

    /// Build application context over an existing pool.
    ///
    /// # Errors
    ///
    /// Returns an error when the payment provider client cannot be built.
    pub fn from_db(db: &Db, payments: PaymentsSettings) -> Result<Self, AppInitError> {
        let provider =
            Arc::new(PayPalClient::new(payments.paypal).map_err(AppInitError::Payments)?);

        Ok(Self {
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            characteristics: Arc::new(PgCharacteristicsService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            customers: Arc::new(PgCustomersService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), provider, payments.currency)),
            carts: Arc::new(PgCartsService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone())),
            analytics: Arc::new(PgAnalyticsService::new(db.clone())),
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
