//! Order Items Repository

use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{count_to_i32, try_get_count},
    domain::{
        orders::models::{OrderId, OrderItem, OrderItemId},
        products::{models::ProductId, try_get_product},
    },
};

const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");
const GET_ORDER_ITEM_SQL: &str = include_str!("../sql/get_order_item.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const UPDATE_ORDER_ITEM_QUANTITY_SQL: &str = include_str!("../sql/update_order_item_quantity.sql");
const DELETE_ORDER_ITEM_SQL: &str = include_str!("../sql/delete_order_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(LIST_ORDER_ITEMS_SQL)
            .bind(order.get())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        item: OrderItemId,
    ) -> Result<OrderItem, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEM_SQL)
            .bind(item.get())
            .bind(order.get())
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert a line priced at `price_per_item`, the product price at this moment.
    #[tracing::instrument(name = "orders.repository.create_order_item", skip(self, tx), err)]
    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        product: ProductId,
        quantity: u32,
        price_per_item: Decimal,
    ) -> Result<OrderItemId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_ORDER_ITEM_SQL)
            .bind(order.get())
            .bind(product.get())
            .bind(count_to_i32(quantity, "quantity")?)
            .bind(price_per_item)
            .fetch_one(&mut **tx)
            .await?;

        Ok(OrderItemId::new(id))
    }

    pub(crate) async fn update_order_item_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        item: OrderItemId,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_ITEM_QUANTITY_SQL)
            .bind(item.get())
            .bind(order.get())
            .bind(count_to_i32(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        item: OrderItemId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_ITEM_SQL)
            .bind(item.get())
            .bind(order.get())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderItemId::new(row.try_get("id")?),
            order_id: OrderId::new(row.try_get("order_id")?),
            product: try_get_product(row, "product_")?,
            quantity: try_get_count(row, "quantity")?,
            price_per_item: row.try_get("price_per_item")?,
        })
    }
}
