//! Order Item Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::orders::models::OrderId;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, items::get::OrderItemResponse},
    state::State,
};

/// Order Item Index Handler
#[endpoint(tags("orders"), summary = "List Order Items")]
pub(crate) async fn handler(
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderItemResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let items = state
        .app
        .orders
        .list_order_items(OrderId::new(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}
