//! Analytics Models

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;

use crate::domain::products::models::Product;

/// A product with the number of units ordered in the window.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUnits {
    pub product: Product,
    pub units: u64,
}

/// A product with the number of orders it shared with another product.
#[derive(Debug, Clone, PartialEq)]
pub struct BoughtWith {
    pub product: Product,
    pub orders: u64,
}

/// Two products bought in the same orders; `first.id < second.id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPair {
    pub first: Product,
    pub second: Product,
    pub orders: u64,
}

/// One point of a daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyValue<T> {
    pub day: Date,
    pub value: T,
}

/// Everything shown on the analysis page. Aggregates with no data are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub point_in_time: Timestamp,
    pub most_ordered: Option<ProductUnits>,
    pub least_ordered: Option<ProductUnits>,
    pub bought_with_most_ordered: Option<BoughtWith>,
    pub average_order_total: Option<Decimal>,
    pub median_order_total: Option<Decimal>,
    pub customers_per_day: Vec<DailyValue<u64>>,
    pub average_order_total_per_day: Vec<DailyValue<Decimal>>,
    pub median_order_total_per_day: Vec<DailyValue<Decimal>>,
    pub day_with_min_orders: Option<DailyValue<u64>>,
    pub day_with_max_orders: Option<DailyValue<u64>>,
    pub most_bought_pairs: Vec<ProductPair>,
    pub least_bought_pairs: Vec<ProductPair>,
}
