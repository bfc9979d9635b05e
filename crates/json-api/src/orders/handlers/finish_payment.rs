//! Finish Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::{OrderId, PaymentOutcome};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Seconds the client should wait before polling again.
const RETRY_AFTER_SECONDS: &str = "5";

/// Body returned while the provider has not captured the payment yet.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentPendingResponse {
    pub order_id: i64,
    pub status: String,
}

/// Finish Payment Handler
///
/// The payment provider redirects the customer here after approval. A captured payment
/// completes the order; otherwise the response is `202` with a `Refresh` header and the
/// client polls again. Calling it on a completed order returns that order.
#[endpoint(
    tags("orders"),
    summary = "Finish Payment",
    responses(
        (status_code = StatusCode::OK, description = "Payment captured", body = OrderResponse),
        (status_code = StatusCode::ACCEPTED, description = "Payment pending", body = PaymentPendingResponse),
        (status_code = StatusCode::CONFLICT, description = "Payment was never started"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(name = "orders.finish_payment", skip_all, err)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = OrderId::new(order.into_inner());

    let outcome = state
        .app
        .orders
        .finish_payment(order)
        .await
        .map_err(into_status_error)?;

    match outcome {
        PaymentOutcome::Completed(order) => {
            res.render(Json(OrderResponse::from(order)));
        }
        PaymentOutcome::Pending => {
            tracing::debug!(order_id = %order, "payment still pending");

            res.add_header("refresh", RETRY_AFTER_SECONDS, true)
                .or_500("failed to set refresh header")?
                .status_code(StatusCode::ACCEPTED)
                .render(Json(PaymentPendingResponse {
                    order_id: order.get(),
                    status: "pending".to_string(),
                }));
        }
    }

    Ok(())
}
