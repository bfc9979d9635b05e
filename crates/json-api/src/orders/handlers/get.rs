//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::{Order, OrderId};

use crate::{
    customers::get::CustomerResponse, extensions::*, orders::errors::into_status_error,
    state::State,
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: i64,
    pub customer: Option<CustomerResponse>,
    /// RFC 3339 timestamp
    pub created_at: String,
    pub address: String,
    /// `created`, `payment` or `complete`
    pub status: String,
    /// Payment provider order id, once payment has started
    pub payment_id: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.get(),
            customer: order.customer.map(Into::into),
            created_at: order.created_at.to_string(),
            address: order.address,
            status: order.status.as_str().to_string(),
            payment_id: order.payment_id,
        }
    }
}

/// Get Order Handler
#[endpoint(tags("orders"), summary = "Get Order")]
pub(crate) async fn handler(
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(OrderId::new(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
