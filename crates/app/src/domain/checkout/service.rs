//! Checkout service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{PgCartProductsRepository, PgCartsRepository, models::CartId},
        checkout::{
            errors::CheckoutError,
            models::{CheckoutForm, CheckoutReview},
        },
        customers::{PgCustomersRepository, models::CustomerDraft},
        orders::{PgOrderItemsRepository, PgOrdersRepository, models::Order},
        products::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    carts: PgCartsRepository,
    cart_products: PgCartProductsRepository,
    products: PgProductsRepository,
    customers: PgCustomersRepository,
    orders: PgOrdersRepository,
    order_items: PgOrderItemsRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            cart_products: PgCartProductsRepository::new(),
            products: PgProductsRepository::new(),
            customers: PgCustomersRepository::new(),
            orders: PgOrdersRepository::new(),
            order_items: PgOrderItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(name = "checkout.service.review", skip(self), err)]
    async fn review(&self, cart: CartId) -> Result<CheckoutReview, CheckoutError> {
        let mut tx = self.db.begin().await?;

        self.carts.touch_cart(&mut tx, cart, Timestamp::now()).await?;

        let mut lines = self.cart_products.list_cart_products(&mut tx, cart).await?;

        for line in &mut lines {
            let clamped = line.quantity.min(line.product.quantity).max(1);

            if clamped != line.quantity {
                self.cart_products
                    .update_cart_product_quantity(&mut tx, cart, line.id, clamped)
                    .await?;

                tracing::debug!(
                    item = %line.id,
                    from = line.quantity,
                    to = clamped,
                    "clamped cart line to stock"
                );

                line.quantity = clamped;
            }
        }

        tx.commit().await?;

        Ok(CheckoutReview::new(cart, lines))
    }

    #[tracing::instrument(name = "checkout.service.place_order", skip(self, form), err)]
    async fn place_order(&self, cart: CartId, form: CheckoutForm) -> Result<Order, CheckoutError> {
        let errors = form.validate();

        if !errors.is_empty() {
            return Err(CheckoutError::Validation(errors));
        }

        let mut tx = self.db.begin().await?;

        self.carts.touch_cart(&mut tx, cart, Timestamp::now()).await?;

        let lines = self.cart_products.list_cart_products(&mut tx, cart).await?;

        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let customer = self
            .customers
            .upsert_customer(
                &mut tx,
                &CustomerDraft {
                    id: None,
                    first_name: form.first_name,
                    last_name: form.last_name,
                    email: form.email,
                },
            )
            .await?;

        let order = self
            .orders
            .create_order(&mut tx, Some(customer.id), &form.address)
            .await?;

        for line in lines {
            let product = line.product;

            if !self
                .products
                .subtract_quantity(&mut tx, product.id, line.quantity)
                .await?
            {
                return Err(CheckoutError::InsufficientStock {
                    product_id: product.id,
                    model: product.model,
                    requested: line.quantity,
                });
            }

            self.order_items
                .create_order_item(&mut tx, order, product.id, line.quantity, product.price)
                .await?;
        }

        self.cart_products.delete_cart_products(&mut tx, cart).await?;

        let placed = self.orders.get_order(&mut tx, order).await?;

        tx.commit().await?;

        tracing::info!(order = %placed.id, "order placed");

        Ok(placed)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Clamp every line to `1..=stock`, persisting changed quantities, and total the cart.
    async fn review(&self, cart: CartId) -> Result<CheckoutReview, CheckoutError>;

    /// Turn the cart into an order in one transaction.
    ///
    /// Stock is reserved line by line; a short line aborts the whole order and leaves the cart
    /// untouched. On success the cart is emptied.
    async fn place_order(&self, cart: CartId, form: CheckoutForm) -> Result<Order, CheckoutError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::{
            carts::CartsService,
            customers::CustomersService,
            orders::{OrdersService, models::OrderStatus},
            products::ProductsService,
        },
        pagination::PageRequest,
        test::{
            TestContext,
            helpers::{create_product, set_stock},
        },
    };

    use super::*;

    fn form() -> CheckoutForm {
        CheckoutForm {
            email: "shopper@example.com".to_string(),
            first_name: "Sol".to_string(),
            last_name: "Reyes".to_string(),
            address: "9 Market Sq".to_string(),
        }
    }

    fn new_cart() -> CartId {
        CartId::new(Uuid::new_v4())
    }

    #[tokio::test]
    async fn review_clamps_lines_to_stock_and_persists() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = new_cart();
        let product = create_product(&ctx, "Desk", None, Decimal::new(5000, 2), 5).await?;

        let line = ctx.carts.add_product(cart, product.id).await?;
        ctx.carts.set_quantity(cart, line.id, 5).await?;

        set_stock(&ctx, &product, 2).await?;

        let review = ctx.checkout.review(cart).await?;

        assert_eq!(review.units, 2);
        assert_eq!(review.total, Decimal::new(10000, 2));
        assert_eq!(ctx.carts.units_in_cart(cart).await?, 2);

        set_stock(&ctx, &product, 0).await?;

        let review = ctx.checkout.review(cart).await?;

        assert_eq!(review.units, 1);

        Ok(())
    }

    #[tokio::test]
    async fn place_order_rejects_invalid_form() {
        let ctx = TestContext::new().await;

        let result = ctx
            .checkout
            .place_order(
                new_cart(),
                CheckoutForm {
                    address: "  ".to_string(),
                    ..form()
                },
            )
            .await;

        assert!(
            matches!(&result, Err(CheckoutError::Validation(errors))
                if errors.len() == 1 && errors.iter().all(|e| e.field == "address")),
            "expected address validation error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn place_order_rejects_empty_cart() {
        let ctx = TestContext::new().await;

        let result = ctx.checkout.place_order(new_cart(), form()).await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn place_order_reserves_stock_and_clears_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = new_cart();
        let pen = create_product(&ctx, "Pen", None, Decimal::new(150, 2), 10).await?;
        let pad = create_product(&ctx, "Pad", None, Decimal::new(300, 2), 4).await?;

        let line = ctx.carts.add_product(cart, pen.id).await?;
        ctx.carts.set_quantity(cart, line.id, 3).await?;
        ctx.carts.add_product(cart, pad.id).await?;

        let order = ctx.checkout.place_order(cart, form()).await?;

        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.address, "9 Market Sq");
        assert_eq!(
            order.customer.as_ref().map(|c| c.email.as_str()),
            Some("shopper@example.com")
        );

        assert_eq!(ctx.orders.order_total(order.id).await?, Decimal::new(750, 2));
        assert_eq!(ctx.products.get_product(pen.id).await?.quantity, 7);
        assert_eq!(ctx.products.get_product(pad.id).await?.quantity, 3);
        assert_eq!(ctx.carts.units_in_cart(cart).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn short_line_aborts_the_whole_order() -> TestResult {
        let ctx = TestContext::new().await;
        let cart = new_cart();
        let plenty = create_product(&ctx, "Plenty", None, Decimal::ONE, 10).await?;
        let scarce = create_product(&ctx, "Scarce", None, Decimal::ONE, 5).await?;

        ctx.carts.add_product(cart, plenty.id).await?;
        let line = ctx.carts.add_product(cart, scarce.id).await?;
        ctx.carts.set_quantity(cart, line.id, 5).await?;

        set_stock(&ctx, &scarce, 2).await?;

        let result = ctx.checkout.place_order(cart, form()).await;

        assert!(
            matches!(&result, Err(CheckoutError::InsufficientStock { product_id, model, requested: 5 })
                if *product_id == scarce.id && model == "Scarce"),
            "expected InsufficientStock for Scarce, got {result:?}"
        );

        assert_eq!(ctx.products.get_product(plenty.id).await?.quantity, 10);
        assert_eq!(ctx.products.get_product(scarce.id).await?.quantity, 2);
        assert_eq!(ctx.orders.list_orders(PageRequest::default()).await?.total, 0);
        assert_eq!(ctx.carts.units_in_cart(cart).await?, 6);

        Ok(())
    }

    #[tokio::test]
    async fn repeat_shopper_reuses_customer() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Soap", None, Decimal::ONE, 10).await?;

        let mut customers = Vec::new();

        for _ in 0..2 {
            let cart = new_cart();
            ctx.carts.add_product(cart, product.id).await?;

            let order = ctx.checkout.place_order(cart, form()).await?;
            customers.push(order.customer.map(|c| c.id));
        }

        assert_eq!(customers.first(), customers.last());
        assert!(customers.iter().all(Option::is_some));

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_checkouts_share_one_customer() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Mug", None, Decimal::ONE, 10).await?;

        let first_cart = new_cart();
        let second_cart = new_cart();
        ctx.carts.add_product(first_cart, product.id).await?;
        ctx.carts.add_product(second_cart, product.id).await?;

        let (first, second) = tokio::join!(
            ctx.checkout.place_order(first_cart, form()),
            ctx.checkout.place_order(
                second_cart,
                CheckoutForm {
                    email: "Shopper@Example.com".to_string(),
                    ..form()
                }
            ),
        );

        let first = first?;
        let second = second?;

        assert!(first.customer.is_some(), "checkout attaches a customer");
        assert_eq!(
            first.customer.map(|c| c.id),
            second.customer.map(|c| c.id),
            "both checkouts resolve to the same customer"
        );
        assert_eq!(
            ctx.customers.list_customers(PageRequest::default()).await?.total,
            1
        );

        Ok(())
    }
}
