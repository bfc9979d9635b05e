//! Analysis Report Handler

use std::sync::Arc;

use jiff::civil::Date;
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::analytics::models::{
    AnalyticsReport, BoughtWith, DailyValue, ProductPair, ProductUnits,
};

use crate::{
    analysis::errors::into_status_error, extensions::*, products::get::ProductResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductUnitsResponse {
    pub product: ProductResponse,
    pub units: u64,
}

impl From<ProductUnits> for ProductUnitsResponse {
    fn from(value: ProductUnits) -> Self {
        Self {
            product: value.product.into(),
            units: value.units,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BoughtWithResponse {
    pub product: ProductResponse,
    /// Orders containing both products
    pub orders: u64,
}

impl From<BoughtWith> for BoughtWithResponse {
    fn from(value: BoughtWith) -> Self {
        Self {
            product: value.product.into(),
            orders: value.orders,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPairResponse {
    pub first: ProductResponse,
    pub second: ProductResponse,
    pub orders: u64,
}

impl From<ProductPair> for ProductPairResponse {
    fn from(pair: ProductPair) -> Self {
        Self {
            first: pair.first.into(),
            second: pair.second.into(),
            orders: pair.orders,
        }
    }
}

/// A daily count
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DailyCountResponse {
    /// UTC calendar day, `YYYY-MM-DD`
    pub day: String,
    pub value: u64,
}

impl From<DailyValue<u64>> for DailyCountResponse {
    fn from(point: DailyValue<u64>) -> Self {
        Self {
            day: day(point.day),
            value: point.value,
        }
    }
}

/// A daily amount of money
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DailyAmountResponse {
    pub day: String,
    pub value: String,
}

impl From<DailyValue<Decimal>> for DailyAmountResponse {
    fn from(point: DailyValue<Decimal>) -> Self {
        Self {
            day: day(point.day),
            value: point.value.to_string(),
        }
    }
}

fn day(date: Date) -> String {
    date.to_string()
}

/// Analysis Report Response
///
/// Aggregates are `null` when the window has no orders; series always hold 31 days.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AnalysisReportResponse {
    pub point_in_time: String,
    pub most_ordered: Option<ProductUnitsResponse>,
    pub least_ordered: Option<ProductUnitsResponse>,
    /// The product most often bought with `most_ordered`
    pub bought_with_most_ordered: Option<BoughtWithResponse>,
    pub average_order_total: Option<String>,
    pub median_order_total: Option<String>,
    pub customers_per_day: Vec<DailyCountResponse>,
    pub average_order_total_per_day: Vec<DailyAmountResponse>,
    pub median_order_total_per_day: Vec<DailyAmountResponse>,
    pub day_with_min_orders: Option<DailyCountResponse>,
    pub day_with_max_orders: Option<DailyCountResponse>,
    pub most_bought_pairs: Vec<ProductPairResponse>,
    pub least_bought_pairs: Vec<ProductPairResponse>,
}

impl From<AnalyticsReport> for AnalysisReportResponse {
    fn from(report: AnalyticsReport) -> Self {
        Self {
            point_in_time: report.point_in_time.to_string(),
            most_ordered: report.most_ordered.map(Into::into),
            least_ordered: report.least_ordered.map(Into::into),
            bought_with_most_ordered: report.bought_with_most_ordered.map(Into::into),
            average_order_total: report.average_order_total.map(|total| total.to_string()),
            median_order_total: report.median_order_total.map(|total| total.to_string()),
            customers_per_day: collect(report.customers_per_day),
            average_order_total_per_day: collect(report.average_order_total_per_day),
            median_order_total_per_day: collect(report.median_order_total_per_day),
            day_with_min_orders: report.day_with_min_orders.map(Into::into),
            day_with_max_orders: report.day_with_max_orders.map(Into::into),
            most_bought_pairs: collect(report.most_bought_pairs),
            least_bought_pairs: collect(report.least_bought_pairs),
        }
    }
}

pub(crate) fn collect<T, U: From<T>>(values: Vec<T>) -> Vec<U> {
    values.into_iter().map(U::from).collect()
}

/// Analysis Report Handler
#[endpoint(tags("analysis"), summary = "Order Analysis")]
#[tracing::instrument(name = "analysis.report", skip_all, err)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<AnalysisReportResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let report = state
        .app
        .analytics
        .report(point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(report.into()))
}
