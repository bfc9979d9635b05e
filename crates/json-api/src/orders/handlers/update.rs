//! Update Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::{OrderDraft, OrderId};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderRequest {
    pub address: String,
}

/// Update Order Handler
///
/// Only the delivery address can change after an order is created.
#[endpoint(
    tags("orders"),
    summary = "Update Order Address",
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "orders.update", skip_all, err)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .save_order(OrderDraft {
            id: Some(OrderId::new(order.into_inner())),
            customer: None,
            address: json.into_inner().address,
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::orders::{
        OrdersServiceError,
        models::{Order, OrderStatus},
    };

    use crate::test_helpers::{TestServices, make_order};

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("orders/{order}").put(handler))
    }

    #[tokio::test]
    async fn test_update_address() -> TestResult {
        let mut services = TestServices::default();

        services
            .orders
            .expect_save_order()
            .once()
            .withf(|draft| draft.id == Some(OrderId::new(3)) && draft.address == "9 Hill Lane")
            .return_once(|draft| {
                Ok(Order {
                    address: draft.address,
                    ..make_order(3, OrderStatus::Created)
                })
            });

        let mut res = TestClient::put("http://example.com/orders/3")
            .json(&json!({ "address": "9 Hill Lane" }))
            .send(&make_service(services))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.address, "9 Hill Lane");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_order_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .orders
            .expect_save_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let res = TestClient::put("http://example.com/orders/3")
            .json(&json!({ "address": "9 Hill Lane" }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
