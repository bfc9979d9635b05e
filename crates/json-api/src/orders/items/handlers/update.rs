//! Update Order Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::{OrderId, OrderItemId};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, items::get::OrderItemResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderItemRequest {
    pub quantity: u32,
}

/// Update Order Item Handler
///
/// Changes the quantity only; the recorded price stays.
#[endpoint(
    tags("orders"),
    summary = "Change Order Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
        (status_code = StatusCode::NOT_FOUND, description = "Order item not found"),
    ),
)]
#[tracing::instrument(name = "orders.items.update", skip_all, err)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    item: PathParam<i64>,
    json: JsonBody<UpdateOrderItemRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .orders
        .update_item_quantity(
            OrderId::new(order.into_inner()),
            OrderItemId::new(item.into_inner()),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
