//! Carts Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::carts::models::{Cart, CartId},
    pagination::PageRequest,
};

const LIST_CARTS_SQL: &str = include_str!("../sql/list_carts.sql");
const COUNT_CARTS_SQL: &str = include_str!("../sql/count_carts.sql");
const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const TOUCH_CART_SQL: &str = include_str!("../sql/touch_cart.sql");
const DELETE_CART_SQL: &str = include_str!("../sql/delete_cart.sql");
const DELETE_IDLE_CARTS_SQL: &str = include_str!("../sql/delete_idle_carts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<Vec<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(LIST_CARTS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_carts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CARTS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(GET_CART_SQL)
            .bind(cart.get())
            .fetch_one(&mut **tx)
            .await
    }

    /// Get-or-create: inserts the cart on first use, otherwise bumps its access time.
    pub(crate) async fn touch_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        point_in_time: Timestamp,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(TOUCH_CART_SQL)
            .bind(cart.get())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.get())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Delete carts last touched before `cutoff`; their lines cascade.
    pub(crate) async fn delete_carts_idle_since(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cutoff: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_IDLE_CARTS_SQL)
            .bind(SqlxTimestamp::from(cutoff))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartId::new(row.try_get("id")?),
            last_access_time: row
                .try_get::<SqlxTimestamp, _>("last_access_time")?
                .to_jiff(),
        })
    }
}
