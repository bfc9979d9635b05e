//! Add Order Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    orders::models::{NewOrderItem, OrderId},
    products::models::ProductId,
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, items::get::OrderItemResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddOrderItemRequest {
    pub product_id: i64,
    pub quantity: u32,
}

/// Add Order Item Handler
///
/// Reserves stock for the product and records its current price on the item.
#[endpoint(
    tags("orders"),
    summary = "Add Order Item",
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity not available"),
        (status_code = StatusCode::CONFLICT, description = "Order is no longer editable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "orders.items.create", skip_all, err)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    json: JsonBody<AddOrderItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = OrderId::new(order.into_inner());
    let request = json.into_inner();

    let item = state
        .app
        .orders
        .add_item(
            order,
            NewOrderItem {
                product_id: ProductId::new(request.product_id),
                quantity: request.quantity,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{order}/items/{}", item.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
