//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::{
        customers::models::{Customer, CustomerId},
        orders::models::{Order, OrderId, OrderStatus},
    },
    pagination::PageRequest,
};

const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("../sql/count_orders.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const UPDATE_ORDER_ADDRESS_SQL: &str = include_str!("../sql/update_order_address.sql");
const SET_ORDER_STATUS_SQL: &str = include_str!("../sql/set_order_status.sql");
const SET_ORDER_PAYMENT_SQL: &str = include_str!("../sql/set_order_payment.sql");
const DELETE_ORDER_SQL: &str = include_str!("../sql/delete_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_ORDERS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.get())
            .fetch_one(&mut **tx)
            .await
    }

    /// Row-lock the order for the rest of the transaction and return its status.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<OrderStatus, sqlx::Error> {
        let status: String = query_scalar(LOCK_ORDER_SQL)
            .bind(order.get())
            .fetch_one(&mut **tx)
            .await?;

        parse_status(&status)
    }

    #[tracing::instrument(name = "orders.repository.create_order", skip(self, tx), err)]
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: Option<CustomerId>,
        address: &str,
    ) -> Result<OrderId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_ORDER_SQL)
            .bind(customer.map(CustomerId::get))
            .bind(address.trim())
            .fetch_one(&mut **tx)
            .await?;

        Ok(OrderId::new(id))
    }

    pub(crate) async fn update_order_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        address: &str,
    ) -> Result<OrderId, sqlx::Error> {
        let id: i64 = query_scalar(UPDATE_ORDER_ADDRESS_SQL)
            .bind(order.get())
            .bind(address.trim())
            .fetch_one(&mut **tx)
            .await?;

        Ok(OrderId::new(id))
    }

    #[tracing::instrument(name = "orders.repository.set_status", skip(self, tx), err)]
    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_ORDER_STATUS_SQL)
            .bind(order.get())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Move a `created` order to `payment`, remembering the provider's order id.
    #[tracing::instrument(name = "orders.repository.set_payment_id", skip(self, tx), err)]
    pub(crate) async fn set_payment_id(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        payment_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_ORDER_PAYMENT_SQL)
            .bind(order.get())
            .bind(payment_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.get())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn parse_status(status: &str) -> Result<OrderStatus, sqlx::Error> {
    status.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let customer = row
            .try_get::<Option<i64>, _>("customer_id")?
            .map(|id| -> sqlx::Result<Customer> {
                Ok(Customer {
                    id: CustomerId::new(id),
                    first_name: row.try_get("customer_first_name")?,
                    last_name: row.try_get("customer_last_name")?,
                    email: row.try_get("customer_email")?,
                })
            })
            .transpose()?;

        Ok(Self {
            id: OrderId::new(row.try_get("id")?),
            customer,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            address: row.try_get("address")?,
            status: parse_status(row.try_get("status")?)?,
            payment_id: row.try_get("payment_id")?,
        })
    }
}
