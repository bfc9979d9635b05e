//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    database::Db,
    domain::{
        analytics::PgAnalyticsService, carts::PgCartsService,
        categories::PgCategoriesService, characteristics::PgCharacteristicsService,
        checkout::PgCheckoutService, customers::PgCustomersService, orders::PgOrdersService,
        products::PgProductsService,
    },
    payments::MockPaymentProvider,
};

use super::db::TestDb;

/// Currency passed to the payment provider by the orders service under test.
pub const TEST_CURRENCY: &str = "USD";

/// Every service wired to one fresh database.
///
/// The orders service gets a payment provider with no expectations; payment tests build
/// their own service over [`TestContext::app_db`].
pub struct TestContext {
    pub db: TestDb,
    pub categories: PgCategoriesService,
    pub characteristics: PgCharacteristicsService,
    pub products: PgProductsService,
    pub customers: PgCustomersService,
    pub orders: PgOrdersService,
    pub carts: PgCartsService,
    pub checkout: PgCheckoutService,
    pub analytics: PgAnalyticsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            categories: PgCategoriesService::new(db.clone()),
            characteristics: PgCharacteristicsService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            customers: PgCustomersService::new(db.clone()),
            orders: PgOrdersService::new(
                db.clone(),
                Arc::new(MockPaymentProvider::new()),
                TEST_CURRENCY,
            ),
            carts: PgCartsService::new(db.clone()),
            checkout: PgCheckoutService::new(db.clone()),
            analytics: PgAnalyticsService::new(db),
            db: test_db,
        }
    }

    /// A [`Db`] over this context's database, for services built inside a test.
    pub fn app_db(&self) -> Db {
        Db::new(self.db.pool().clone())
    }
}
