//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        customers::PgCustomersRepository,
        orders::{
            errors::OrdersServiceError,
            models::{
                NewOrderItem, Order, OrderDraft, OrderId, OrderItem, OrderItemId, OrderStatus,
                PaymentOutcome, order_total,
            },
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        products::{PgProductsRepository, models::Product},
    },
    pagination::{Page, PageRequest},
    payments::PaymentProvider,
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    products: PgProductsRepository,
    customers: PgCustomersRepository,
    payments: Arc<dyn PaymentProvider>,
    currency: String,
}

impl std::fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, payments: Arc<dyn PaymentProvider>, currency: impl Into<String>) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            products: PgProductsRepository::new(),
            customers: PgCustomersRepository::new(),
            payments,
            currency: currency.into(),
        }
    }

    /// Lock the order and check it is still editable.
    async fn lock_created(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<(), OrdersServiceError> {
        let status = self.orders.lock_order(tx, order).await?;

        ensure_status(status, OrderStatus::Created)
    }

    async fn product_for_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewOrderItem,
    ) -> Result<Product, OrdersServiceError> {
        match self.products.get_product(tx, item.product_id).await {
            Err(sqlx::Error::RowNotFound) => Err(OrdersServiceError::InvalidReference),
            result => Ok(result?),
        }
    }
}

fn ensure_status(actual: OrderStatus, expected: OrderStatus) -> Result<(), OrdersServiceError> {
    if actual == expected {
        Ok(())
    } else {
        Err(OrdersServiceError::InvalidStatus { expected, actual })
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self, page: PageRequest) -> Result<Page<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders(&mut tx, page).await?;
        let total = self.orders.count_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(Page::new(orders, total))
    }

    async fn get_order(&self, order: OrderId) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    #[tracing::instrument(name = "orders.service.save_order", skip(self), err)]
    async fn save_order(&self, order: OrderDraft) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let id = if let Some(id) = order.id {
            self.orders
                .update_order_address(&mut tx, id, &order.address)
                .await?
        } else {
            let customer = match &order.customer {
                Some(customer) => Some(self.customers.upsert_customer(&mut tx, customer).await?.id),
                None => None,
            };

            self.orders
                .create_order(&mut tx, customer, &order.address)
                .await?
        };

        let saved = self.orders.get_order(&mut tx, id).await?;

        tx.commit().await?;

        Ok(saved)
    }

    #[tracing::instrument(name = "orders.service.delete_order", skip(self), err)]
    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let status = self.orders.lock_order(&mut tx, order).await?;

        if status != OrderStatus::Complete {
            for item in self.items.list_order_items(&mut tx, order).await? {
                self.products
                    .add_quantity(&mut tx, item.product.id, item.quantity)
                    .await?;
            }
        }

        let rows_affected = self.orders.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_order_items(&self, order: OrderId) -> Result<Vec<OrderItem>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.orders.get_order(&mut tx, order).await?;

        let items = self.items.list_order_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_order_item(
        &self,
        order: OrderId,
        item: OrderItemId,
    ) -> Result<OrderItem, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let item = self.items.get_order_item(&mut tx, order, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    #[tracing::instrument(name = "orders.service.add_item", skip(self), err)]
    async fn add_item(
        &self,
        order: OrderId,
        item: NewOrderItem,
    ) -> Result<OrderItem, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_created(&mut tx, order).await?;

        let product = self.product_for_item(&mut tx, item).await?;

        if item.quantity == 0 || item.quantity > product.quantity {
            return Err(OrdersServiceError::InvalidQuantity {
                product_id: product.id,
                quantity: item.quantity,
            });
        }

        if !self
            .products
            .subtract_quantity(&mut tx, product.id, item.quantity)
            .await?
        {
            return Err(OrdersServiceError::InsufficientStock {
                product_id: product.id,
                requested: item.quantity,
            });
        }

        let id = self
            .items
            .create_order_item(&mut tx, order, product.id, item.quantity, product.price)
            .await?;

        let created = self.items.get_order_item(&mut tx, order, id).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(name = "orders.service.remove_item", skip(self), err)]
    async fn remove_item(&self, order: OrderId, item: OrderItemId) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_created(&mut tx, order).await?;

        let existing = self.items.get_order_item(&mut tx, order, item).await?;

        self.items.delete_order_item(&mut tx, order, item).await?;
        self.products
            .add_quantity(&mut tx, existing.product.id, existing.quantity)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(name = "orders.service.update_item_quantity", skip(self), err)]
    async fn update_item_quantity(
        &self,
        order: OrderId,
        item: OrderItemId,
        quantity: u32,
    ) -> Result<OrderItem, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_created(&mut tx, order).await?;

        let existing = self.items.get_order_item(&mut tx, order, item).await?;
        let product_id = existing.product.id;

        if quantity == 0 {
            return Err(OrdersServiceError::InvalidQuantity {
                product_id,
                quantity,
            });
        }

        if quantity > existing.quantity {
            let extra = quantity - existing.quantity;

            if !self
                .products
                .subtract_quantity(&mut tx, product_id, extra)
                .await?
            {
                return Err(OrdersServiceError::InsufficientStock {
                    product_id,
                    requested: quantity,
                });
            }
        } else if quantity < existing.quantity {
            self.products
                .add_quantity(&mut tx, product_id, existing.quantity - quantity)
                .await?;
        }

        self.items
            .update_order_item_quantity(&mut tx, order, item, quantity)
            .await?;

        let updated = self.items.get_order_item(&mut tx, order, item).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn order_total(&self, order: OrderId) -> Result<Decimal, OrdersServiceError> {
        let items = self.list_order_items(order).await?;

        Ok(order_total(&items))
    }

    #[tracing::instrument(name = "orders.service.start_payment", skip(self), err)]
    async fn start_payment(&self, order: OrderId) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.lock_created(&mut tx, order).await?;

        let items = self.items.list_order_items(&mut tx, order).await?;

        if items.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        let payment_id = self
            .payments
            .create_order(order.get(), &self.currency, order_total(&items))
            .await?;

        self.orders
            .set_payment_id(&mut tx, order, &payment_id)
            .await?;

        let updated = self.orders.get_order(&mut tx, order).await?;

        tx.commit().await?;

        tracing::info!(order = %order, payment_id = %payment_id, "payment started");

        Ok(updated)
    }

    #[tracing::instrument(name = "orders.service.finish_payment", skip(self), err)]
    async fn finish_payment(&self, order: OrderId) -> Result<PaymentOutcome, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let status = self.orders.lock_order(&mut tx, order).await?;
        let current = self.orders.get_order(&mut tx, order).await?;

        if status == OrderStatus::Complete {
            return Ok(PaymentOutcome::Completed(current));
        }

        ensure_status(status, OrderStatus::Payment)?;

        let Some(payment_id) = current.payment_id.as_deref() else {
            tracing::warn!(order = %order, "order awaiting payment has no provider id");

            return Ok(PaymentOutcome::Pending);
        };

        match self.payments.check_order_completed(payment_id).await {
            Ok(true) => {}
            Ok(false) => return Ok(PaymentOutcome::Pending),
            Err(error) => {
                tracing::warn!(order = %order, error = %error, "payment status check failed");

                return Ok(PaymentOutcome::Pending);
            }
        }

        self.orders
            .set_status(&mut tx, order, OrderStatus::Complete)
            .await?;

        let completed = self.orders.get_order(&mut tx, order).await?;

        tx.commit().await?;

        tracing::info!(order = %order, "payment completed");

        Ok(PaymentOutcome::Completed(completed))
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve one page of orders with their customers.
    async fn list_orders(&self, page: PageRequest) -> Result<Page<Order>, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, order: OrderId) -> Result<Order, OrdersServiceError>;

    /// Create an order (upserting its customer by email) or change an order's address.
    async fn save_order(&self, order: OrderDraft) -> Result<Order, OrdersServiceError>;

    /// Deletes an order with its items. Stock is returned unless the order was paid.
    async fn delete_order(&self, order: OrderId) -> Result<(), OrdersServiceError>;

    async fn list_order_items(&self, order: OrderId) -> Result<Vec<OrderItem>, OrdersServiceError>;

    async fn get_order_item(
        &self,
        order: OrderId,
        item: OrderItemId,
    ) -> Result<OrderItem, OrdersServiceError>;

    /// Reserve stock and add a line priced at the current product price.
    async fn add_item(
        &self,
        order: OrderId,
        item: NewOrderItem,
    ) -> Result<OrderItem, OrdersServiceError>;

    /// Delete a line and return its units to stock.
    async fn remove_item(&self, order: OrderId, item: OrderItemId) -> Result<(), OrdersServiceError>;

    /// Change a line's quantity, moving the difference in or out of stock. The price is kept.
    async fn update_item_quantity(
        &self,
        order: OrderId,
        item: OrderItemId,
        quantity: u32,
    ) -> Result<OrderItem, OrdersServiceError>;

    /// Σ quantity × price per item, computed from the current lines.
    async fn order_total(&self, order: OrderId) -> Result<Decimal, OrdersServiceError>;

    /// Register the order with the payment provider and move it to `payment`.
    async fn start_payment(&self, order: OrderId) -> Result<Order, OrdersServiceError>;

    /// Poll the provider; completes the order once the payment is captured.
    async fn finish_payment(&self, order: OrderId) -> Result<PaymentOutcome, OrdersServiceError>;
}
