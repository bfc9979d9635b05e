//! Carts service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartContents, CartId, CartProduct, CartProductId},
            repositories::{PgCartProductsRepository, PgCartsRepository},
        },
        products::{PgProductsRepository, models::ProductId},
    },
    pagination::{Page, PageRequest},
};

/// Carts untouched for longer than this are swept by [`CartsService::clean_old_carts`].
pub const CART_MAX_IDLE: SignedDuration = SignedDuration::from_hours(7 * 24);

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts: PgCartsRepository,
    products: PgCartProductsRepository,
    catalog: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            products: PgCartProductsRepository::new(),
            catalog: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn list_carts(&self, page: PageRequest) -> Result<Page<Cart>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let carts = self.carts.list_carts(&mut tx, page).await?;
        let total = self.carts.count_carts(&mut tx).await?;

        tx.commit().await?;

        Ok(Page::new(carts, total))
    }

    async fn get_cart(&self, cart: CartId) -> Result<CartContents, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts.get_cart(&mut tx, cart).await?;
        let products = self.products.list_cart_products(&mut tx, cart.id).await?;

        tx.commit().await?;

        Ok(CartContents { cart, products })
    }

    async fn open_cart(&self, cart: CartId) -> Result<CartContents, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts.touch_cart(&mut tx, cart, Timestamp::now()).await?;
        let products = self.products.list_cart_products(&mut tx, cart.id).await?;

        tx.commit().await?;

        Ok(CartContents { cart, products })
    }

    #[tracing::instrument(name = "carts.service.delete_cart", skip(self), err)]
    async fn delete_cart(&self, cart: CartId) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.carts.delete_cart(&mut tx, cart).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(name = "carts.service.add_product", skip(self), err)]
    async fn add_product(
        &self,
        cart: CartId,
        product: ProductId,
    ) -> Result<CartProduct, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts.touch_cart(&mut tx, cart, Timestamp::now()).await?;

        match self.catalog.get_product(&mut tx, product).await {
            Err(sqlx::Error::RowNotFound) => return Err(CartsServiceError::InvalidReference),
            result => result?,
        };

        let line = match self
            .products
            .find_cart_product_by_product(&mut tx, cart, product)
            .await?
        {
            Some(existing) => existing,
            None => {
                let id = self
                    .products
                    .create_cart_product(&mut tx, cart, product, 1)
                    .await?;

                self.products.get_cart_product(&mut tx, cart, id).await?
            }
        };

        tx.commit().await?;

        Ok(line)
    }

    #[tracing::instrument(name = "carts.service.set_quantity", skip(self), err)]
    async fn set_quantity(
        &self,
        cart: CartId,
        item: CartProductId,
        quantity: u32,
    ) -> Result<CartProduct, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts.touch_cart(&mut tx, cart, Timestamp::now()).await?;

        let line = self.products.get_cart_product(&mut tx, cart, item).await?;
        let available = line.product.quantity;

        if quantity < 1 || quantity > available {
            return Err(CartsServiceError::InvalidQuantity {
                quantity,
                available,
            });
        }

        self.products
            .update_cart_product_quantity(&mut tx, cart, item, quantity)
            .await?;

        tx.commit().await?;

        Ok(CartProduct { quantity, ..line })
    }

    #[tracing::instrument(name = "carts.service.remove_product", skip(self), err)]
    async fn remove_product(&self, cart: CartId, item: CartProductId) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts.touch_cart(&mut tx, cart, Timestamp::now()).await?;

        let rows_affected = self.products.delete_cart_product(&mut tx, cart, item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn units_in_cart(&self, cart: CartId) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts.touch_cart(&mut tx, cart, Timestamp::now()).await?;

        let units = self.products.count_cart_units(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(u64::try_from(units).unwrap_or_default())
    }

    #[tracing::instrument(name = "carts.service.clean_old_carts", skip(self), err)]
    async fn clean_old_carts(&self) -> Result<u64, CartsServiceError> {
        let cutoff = Timestamp::now()
            .checked_sub(CART_MAX_IDLE)
            .unwrap_or(Timestamp::MIN);

        let mut tx = self.db.begin().await?;

        let deleted = self.carts.delete_carts_idle_since(&mut tx, cutoff).await?;

        tx.commit().await?;

        tracing::info!(deleted, cutoff = %cutoff, "cleaned old carts");

        Ok(deleted)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve one page of carts, most recently used first.
    async fn list_carts(&self, page: PageRequest) -> Result<Page<Cart>, CartsServiceError>;

    /// Admin view of a cart; does not refresh its access time.
    async fn get_cart(&self, cart: CartId) -> Result<CartContents, CartsServiceError>;

    /// Get-or-create the cart and return its lines.
    async fn open_cart(&self, cart: CartId) -> Result<CartContents, CartsServiceError>;

    async fn delete_cart(&self, cart: CartId) -> Result<(), CartsServiceError>;

    /// Put a product in the cart. A product already in the cart keeps its line and quantity.
    async fn add_product(
        &self,
        cart: CartId,
        product: ProductId,
    ) -> Result<CartProduct, CartsServiceError>;

    /// Set a line's quantity; it must be between one and the product's stock.
    async fn set_quantity(
        &self,
        cart: CartId,
        item: CartProductId,
        quantity: u32,
    ) -> Result<CartProduct, CartsServiceError>;

    async fn remove_product(&self, cart: CartId, item: CartProductId) -> Result<(), CartsServiceError>;

    /// Sum of quantities over every line.
    async fn units_in_cart(&self, cart: CartId) -> Result<u64, CartsServiceError>;

    /// Delete carts idle for more than [`CART_MAX_IDLE`], returning how many went.
    async fn clean_old_carts(&self) -> Result<u64, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::test::{TestContext, helpers::create_product};

    use super::*;

    fn new_cart() -> CartId {
        CartId::new(Uuid::new_v4())
    }

    #[tokio::test]
    async fn open_cart_creates_then_touches() -> TestResult {
        let ctx = TestContext::new().await;
        let id = new_cart();

        let first = ctx.carts.open_cart(id).await?;

        assert_eq!(first.cart.id, id);
        assert!(first.products.is_empty());

        let second = ctx.carts.open_cart(id).await?;

        assert!(second.cart.last_access_time >= first.cart.last_access_time);
        assert_eq!(ctx.carts.list_carts(PageRequest::default()).await?.total, 1);

        Ok(())
    }

    #[tokio::test]
    async fn add_product_twice_keeps_single_line() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = new_cart();
        let product = create_product(&ctx, "Kettle", None, Decimal::new(1999, 2), 3).await?;

        let line = ctx.carts.add_product(cart, product.id).await?;
        ctx.carts.set_quantity(cart, line.id, 2).await?;

        let again = ctx.carts.add_product(cart, product.id).await?;

        assert_eq!(again.id, line.id);
        assert_eq!(again.quantity, 2);

        let contents = ctx.carts.open_cart(cart).await?;

        assert_eq!(contents.products.len(), 1);
        assert_eq!(contents.units(), 2);
        assert_eq!(contents.total(), Decimal::new(3998, 2));

        Ok(())
    }

    #[tokio::test]
    async fn add_unknown_product_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.add_product(new_cart(), ProductId::new(999)).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn set_quantity_is_bounded_by_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = new_cart();
        let product = create_product(&ctx, "Lamp", None, Decimal::TEN, 4).await?;
        let line = ctx.carts.add_product(cart, product.id).await?;

        for quantity in [0, 5] {
            let result = ctx.carts.set_quantity(cart, line.id, quantity).await;

            assert!(
                matches!(
                    result,
                    Err(CartsServiceError::InvalidQuantity { available: 4, .. })
                ),
                "expected InvalidQuantity for {quantity}, got {result:?}"
            );
        }

        let updated = ctx.carts.set_quantity(cart, line.id, 4).await?;

        assert_eq!(updated.quantity, 4);
        assert_eq!(ctx.carts.units_in_cart(cart).await?, 4);

        Ok(())
    }

    #[tokio::test]
    async fn lines_are_scoped_to_their_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = new_cart();
        let product = create_product(&ctx, "Mug", None, Decimal::ONE, 10).await?;
        let line = ctx.carts.add_product(owner, product.id).await?;

        let result = ctx.carts.remove_product(new_cart(), line.id).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        ctx.carts.remove_product(owner, line.id).await?;

        assert_eq!(ctx.carts.units_in_cart(owner).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn clean_old_carts_removes_only_idle_carts() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Chair", None, Decimal::ONE, 10).await?;

        let stale = new_cart();
        let fresh = new_cart();

        ctx.carts.add_product(stale, product.id).await?;
        ctx.carts.open_cart(fresh).await?;

        let long_ago = Timestamp::now().checked_sub(SignedDuration::from_hours(8 * 24))?;
        let db = ctx.app_db();
        let mut tx = db.begin().await?;
        PgCartsRepository::new()
            .touch_cart(&mut tx, stale, long_ago)
            .await?;
        tx.commit().await?;

        assert_eq!(ctx.carts.clean_old_carts().await?, 1);

        let result = ctx.carts.get_cart(stale).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert_eq!(ctx.carts.get_cart(fresh).await?.cart.id, fresh);

        Ok(())
    }
}
