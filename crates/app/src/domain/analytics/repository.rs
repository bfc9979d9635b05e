//! Analytics Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::try_get_total,
    domain::{
        analytics::{
            models::{BoughtWith, DailyValue, ProductPair, ProductUnits},
            series::Window,
        },
        products::{models::ProductId, try_get_product},
    },
};

const MOST_ORDERED_PRODUCT_SQL: &str = include_str!("sql/most_ordered_product.sql");
const LEAST_ORDERED_PRODUCT_SQL: &str = include_str!("sql/least_ordered_product.sql");
const ORDER_TOTALS_SQL: &str = include_str!("sql/order_totals.sql");
const CUSTOMERS_PER_DAY_SQL: &str = include_str!("sql/customers_per_day.sql");
const ORDERS_PER_DAY_SQL: &str = include_str!("sql/orders_per_day.sql");
const MOST_BOUGHT_WITH_SQL: &str = include_str!("sql/most_bought_with.sql");
const MOST_BOUGHT_PAIRS_SQL: &str = include_str!("sql/most_bought_pairs.sql");
const LEAST_BOUGHT_PAIRS_SQL: &str = include_str!("sql/least_bought_pairs.sql");

/// Sort direction for ranked queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rank {
    Most,
    Least,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAnalyticsRepository;

impl PgAnalyticsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn ordered_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: Window,
        rank: Rank,
    ) -> Result<Option<ProductUnits>, sqlx::Error> {
        let sql = match rank {
            Rank::Most => MOST_ORDERED_PRODUCT_SQL,
            Rank::Least => LEAST_ORDERED_PRODUCT_SQL,
        };

        query_as::<Postgres, ProductUnits>(sql)
            .bind(SqlxTimestamp::from(window.start))
            .bind(SqlxTimestamp::from(window.end))
            .fetch_optional(&mut **tx)
            .await
    }

    /// Per-order totals tagged with the UTC day the order was placed.
    pub(crate) async fn order_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: Window,
    ) -> Result<Vec<DailyValue<Decimal>>, sqlx::Error> {
        let rows = sqlx::query(ORDER_TOTALS_SQL)
            .bind(SqlxTimestamp::from(window.start))
            .bind(SqlxTimestamp::from(window.end))
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(DailyValue {
                    day: try_get_day(row)?,
                    value: row.try_get("total")?,
                })
            })
            .collect()
    }

    /// Distinct customers per day; days without orders are absent.
    pub(crate) async fn customers_per_day(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: Window,
    ) -> Result<Vec<DailyValue<u64>>, sqlx::Error> {
        query_as::<Postgres, DailyValue<u64>>(CUSTOMERS_PER_DAY_SQL)
            .bind(SqlxTimestamp::from(window.start))
            .bind(SqlxTimestamp::from(window.end))
            .fetch_all(&mut **tx)
            .await
    }

    /// Orders per day; days without orders are absent.
    pub(crate) async fn orders_per_day(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: Window,
    ) -> Result<Vec<DailyValue<u64>>, sqlx::Error> {
        query_as::<Postgres, DailyValue<u64>>(ORDERS_PER_DAY_SQL)
            .bind(SqlxTimestamp::from(window.start))
            .bind(SqlxTimestamp::from(window.end))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn most_bought_with(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        window: Window,
    ) -> Result<Option<BoughtWith>, sqlx::Error> {
        query_as::<Postgres, BoughtWith>(MOST_BOUGHT_WITH_SQL)
            .bind(product.get())
            .bind(SqlxTimestamp::from(window.start))
            .bind(SqlxTimestamp::from(window.end))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn bought_pairs(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        window: Window,
        rank: Rank,
        limit: u32,
    ) -> Result<Vec<ProductPair>, sqlx::Error> {
        let sql = match rank {
            Rank::Most => MOST_BOUGHT_PAIRS_SQL,
            Rank::Least => LEAST_BOUGHT_PAIRS_SQL,
        };

        query_as::<Postgres, ProductPair>(sql)
            .bind(SqlxTimestamp::from(window.start))
            .bind(SqlxTimestamp::from(window.end))
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }
}

fn try_get_day(row: &PgRow) -> sqlx::Result<jiff::civil::Date> {
    Ok(row.try_get::<SqlxDate, _>("day")?.to_jiff())
}

impl<'r> FromRow<'r, PgRow> for ProductUnits {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: try_get_product(row, "product_")?,
            units: try_get_total(row, "units")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for BoughtWith {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: try_get_product(row, "product_")?,
            orders: try_get_total(row, "orders")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductPair {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            first: try_get_product(row, "first_")?,
            second: try_get_product(row, "second_")?,
            orders: try_get_total(row, "orders")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for DailyValue<u64> {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            day: try_get_day(row)?,
            value: try_get_total(row, "value")?,
        })
    }
}
