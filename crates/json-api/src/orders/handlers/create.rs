//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::OrderDraft;

use crate::{
    customers::create::CustomerRequest,
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Order create request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderRequest {
    /// Upserted by email; omit for a guest order.
    #[serde(default)]
    pub customer: Option<CustomerRequest>,
    pub address: String,
}

/// Create Order Handler
///
/// New orders start out `created` and empty.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "orders.create", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<OrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let order = state
        .app
        .orders
        .save_order(OrderDraft {
            id: None,
            customer: request.customer.map(|customer| customer.into_draft(None)),
            address: request.address,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(order_id = %order.id, "created order");

    Ok(Json(order.into()))
}
