//! Analytics service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    database::Db,
    domain::{
        analytics::{
            errors::AnalyticsError,
            models::{AnalyticsReport, BoughtWith, DailyValue, ProductPair, ProductUnits},
            repository::{PgAnalyticsRepository, Rank},
            series::{Window, average, extreme_day, fill_missing_days, median, per_day},
        },
        products::models::ProductId,
    },
};

/// Number of pairs listed in each direction on the report.
pub const REPORT_PAIRS: u32 = 5;

#[derive(Debug, Clone)]
pub struct PgAnalyticsService {
    db: Db,
    repository: PgAnalyticsRepository,
}

impl PgAnalyticsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAnalyticsRepository::new(),
        }
    }

    async fn ordered_product(
        &self,
        point_in_time: Timestamp,
        rank: Rank,
    ) -> Result<ProductUnits, AnalyticsError> {
        let window = Window::ending_at(point_in_time)?;
        let mut tx = self.db.begin().await?;

        let product = self.repository.ordered_product(&mut tx, window, rank).await?;

        tx.commit().await?;

        product.ok_or(AnalyticsError::NotFound)
    }

    async fn order_totals(
        &self,
        point_in_time: Timestamp,
    ) -> Result<(Window, Vec<DailyValue<Decimal>>), AnalyticsError> {
        let window = Window::ending_at(point_in_time)?;
        let mut tx = self.db.begin().await?;

        let totals = self.repository.order_totals(&mut tx, window).await?;

        tx.commit().await?;

        Ok((window, totals))
    }

    async fn extreme_order_day(
        &self,
        point_in_time: Timestamp,
        want_max: bool,
    ) -> Result<DailyValue<u64>, AnalyticsError> {
        let window = Window::ending_at(point_in_time)?;
        let mut tx = self.db.begin().await?;

        let counts = self.repository.orders_per_day(&mut tx, window).await?;

        tx.commit().await?;

        extreme_day(&counts, want_max).ok_or(AnalyticsError::NotFound)
    }

    async fn bought_pairs(
        &self,
        limit: u32,
        point_in_time: Timestamp,
        rank: Rank,
    ) -> Result<Vec<ProductPair>, AnalyticsError> {
        let window = Window::ending_at(point_in_time)?;
        let mut tx = self.db.begin().await?;

        let pairs = self
            .repository
            .bought_pairs(&mut tx, window, rank, limit)
            .await?;

        tx.commit().await?;

        Ok(pairs)
    }
}

fn totals_of(points: &[DailyValue<Decimal>]) -> Vec<Decimal> {
    points.iter().map(|point| point.value).collect()
}

#[async_trait]
impl AnalyticsService for PgAnalyticsService {
    async fn most_ordered_product(
        &self,
        point_in_time: Timestamp,
    ) -> Result<ProductUnits, AnalyticsError> {
        self.ordered_product(point_in_time, Rank::Most).await
    }

    async fn least_ordered_product(
        &self,
        point_in_time: Timestamp,
    ) -> Result<ProductUnits, AnalyticsError> {
        self.ordered_product(point_in_time, Rank::Least).await
    }

    async fn average_order_total(&self, point_in_time: Timestamp) -> Result<Decimal, AnalyticsError> {
        let (_, totals) = self.order_totals(point_in_time).await?;

        average(&totals_of(&totals)).ok_or(AnalyticsError::NotFound)
    }

    async fn median_order_total(&self, point_in_time: Timestamp) -> Result<Decimal, AnalyticsError> {
        let (_, totals) = self.order_totals(point_in_time).await?;

        median(&totals_of(&totals)).ok_or(AnalyticsError::NotFound)
    }

    async fn customers_per_day(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<DailyValue<u64>>, AnalyticsError> {
        let window = Window::ending_at(point_in_time)?;
        let mut tx = self.db.begin().await?;

        let counts = self.repository.customers_per_day(&mut tx, window).await?;

        tx.commit().await?;

        Ok(fill_missing_days(&window, &counts))
    }

    async fn average_order_total_per_day(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<DailyValue<Decimal>>, AnalyticsError> {
        let (window, totals) = self.order_totals(point_in_time).await?;

        Ok(fill_missing_days(&window, &per_day(&totals, average)))
    }

    async fn median_order_total_per_day(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<DailyValue<Decimal>>, AnalyticsError> {
        let (window, totals) = self.order_totals(point_in_time).await?;

        Ok(fill_missing_days(&window, &per_day(&totals, median)))
    }

    async fn day_with_min_orders(
        &self,
        point_in_time: Timestamp,
    ) -> Result<DailyValue<u64>, AnalyticsError> {
        self.extreme_order_day(point_in_time, false).await
    }

    async fn day_with_max_orders(
        &self,
        point_in_time: Timestamp,
    ) -> Result<DailyValue<u64>, AnalyticsError> {
        self.extreme_order_day(point_in_time, true).await
    }

    async fn most_bought_with(
        &self,
        product: ProductId,
        point_in_time: Timestamp,
    ) -> Result<BoughtWith, AnalyticsError> {
        let window = Window::ending_at(point_in_time)?;
        let mut tx = self.db.begin().await?;

        let other = self
            .repository
            .most_bought_with(&mut tx, product, window)
            .await?;

        tx.commit().await?;

        other.ok_or(AnalyticsError::NotFound)
    }

    async fn most_bought_pairs(
        &self,
        limit: u32,
        point_in_time: Timestamp,
    ) -> Result<Vec<ProductPair>, AnalyticsError> {
        self.bought_pairs(limit, point_in_time, Rank::Most).await
    }

    async fn least_bought_pairs(
        &self,
        limit: u32,
        point_in_time: Timestamp,
    ) -> Result<Vec<ProductPair>, AnalyticsError> {
        self.bought_pairs(limit, point_in_time, Rank::Least).await
    }

    #[tracing::instrument(name = "analytics.service.report", skip(self), err)]
    async fn report(&self, point_in_time: Timestamp) -> Result<AnalyticsReport, AnalyticsError> {
        let window = Window::ending_at(point_in_time)?;
        let mut tx = self.db.begin().await?;

        let most_ordered = self
            .repository
            .ordered_product(&mut tx, window, Rank::Most)
            .await?;

        let least_ordered = self
            .repository
            .ordered_product(&mut tx, window, Rank::Least)
            .await?;

        let bought_with_most_ordered = match &most_ordered {
            Some(most) => {
                self.repository
                    .most_bought_with(&mut tx, most.product.id, window)
                    .await?
            }
            None => None,
        };

        let totals = self.repository.order_totals(&mut tx, window).await?;
        let customers = self.repository.customers_per_day(&mut tx, window).await?;
        let orders = self.repository.orders_per_day(&mut tx, window).await?;

        let most_bought_pairs = self
            .repository
            .bought_pairs(&mut tx, window, Rank::Most, REPORT_PAIRS)
            .await?;

        let least_bought_pairs = self
            .repository
            .bought_pairs(&mut tx, window, Rank::Least, REPORT_PAIRS)
            .await?;

        tx.commit().await?;

        let order_totals = totals_of(&totals);

        Ok(AnalyticsReport {
            point_in_time,
            most_ordered,
            least_ordered,
            bought_with_most_ordered,
            average_order_total: average(&order_totals),
            median_order_total: median(&order_totals),
            customers_per_day: fill_missing_days(&window, &customers),
            average_order_total_per_day: fill_missing_days(&window, &per_day(&totals, average)),
            median_order_total_per_day: fill_missing_days(&window, &per_day(&totals, median)),
            day_with_min_orders: extreme_day(&orders, false),
            day_with_max_orders: extreme_day(&orders, true),
            most_bought_pairs,
            least_bought_pairs,
        })
    }
}

#[automock]
#[async_trait]
pub trait AnalyticsService: Send + Sync {
    /// Product with the most units ordered; ties go to the lowest id.
    async fn most_ordered_product(
        &self,
        point_in_time: Timestamp,
    ) -> Result<ProductUnits, AnalyticsError>;

    /// Product with the fewest (but some) units ordered; ties go to the lowest id.
    async fn least_ordered_product(
        &self,
        point_in_time: Timestamp,
    ) -> Result<ProductUnits, AnalyticsError>;

    /// Mean of per-order totals.
    async fn average_order_total(&self, point_in_time: Timestamp) -> Result<Decimal, AnalyticsError>;

    /// Median of per-order totals.
    async fn median_order_total(&self, point_in_time: Timestamp) -> Result<Decimal, AnalyticsError>;

    /// Distinct customers per day, one point for each of the 31 window days.
    async fn customers_per_day(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<DailyValue<u64>>, AnalyticsError>;

    async fn average_order_total_per_day(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<DailyValue<Decimal>>, AnalyticsError>;

    async fn median_order_total_per_day(
        &self,
        point_in_time: Timestamp,
    ) -> Result<Vec<DailyValue<Decimal>>, AnalyticsError>;

    /// Day with the fewest orders among days that had any.
    async fn day_with_min_orders(
        &self,
        point_in_time: Timestamp,
    ) -> Result<DailyValue<u64>, AnalyticsError>;

    async fn day_with_max_orders(
        &self,
        point_in_time: Timestamp,
    ) -> Result<DailyValue<u64>, AnalyticsError>;

    /// The other product sharing the most orders with `product`.
    async fn most_bought_with(
        &self,
        product: ProductId,
        point_in_time: Timestamp,
    ) -> Result<BoughtWith, AnalyticsError>;

    /// Pairs bought together most often, at most `limit` of them.
    async fn most_bought_pairs(
        &self,
        limit: u32,
        point_in_time: Timestamp,
    ) -> Result<Vec<ProductPair>, AnalyticsError>;

    /// Pairs bought together least often; never-paired products do not appear.
    async fn least_bought_pairs(
        &self,
        limit: u32,
        point_in_time: Timestamp,
    ) -> Result<Vec<ProductPair>, AnalyticsError>;

    /// All of the above in one snapshot.
    async fn report(&self, point_in_time: Timestamp) -> Result<AnalyticsReport, AnalyticsError>;
}
