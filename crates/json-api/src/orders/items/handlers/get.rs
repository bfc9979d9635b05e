//! Get Order Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::{OrderId, OrderItem, OrderItemId};

use crate::{
    extensions::*, orders::errors::into_status_error, products::get::ProductResponse,
    state::State,
};

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub id: i64,
    pub order_id: i64,
    pub product: ProductResponse,
    pub quantity: u32,
    /// Unit price when the item was added
    pub price_per_item: String,
    pub subtotal: String,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id.get(),
            order_id: item.order_id.get(),
            subtotal: item.subtotal().to_string(),
            price_per_item: item.price_per_item.to_string(),
            quantity: item.quantity,
            product: item.product.into(),
        }
    }
}

/// Get Order Item Handler
#[endpoint(tags("orders"), summary = "Get Order Item")]
pub(crate) async fn handler(
    order: PathParam<i64>,
    item: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .orders
        .get_order_item(
            OrderId::new(order.into_inner()),
            OrderItemId::new(item.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
