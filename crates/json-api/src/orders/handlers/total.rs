//! Order Total Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::OrderId;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderTotalResponse {
    pub order_id: i64,
    /// Σ quantity × price per item, recomputed on every call
    pub total: String,
}

/// Order Total Handler
#[endpoint(tags("orders"), summary = "Get Order Total")]
pub(crate) async fn handler(
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderTotalResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = OrderId::new(order.into_inner());

    let total = state
        .app
        .orders
        .order_total(order)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderTotalResponse {
        order_id: order.get(),
        total: total.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::TestServices;

    use super::*;

    #[tokio::test]
    async fn test_total_is_rendered_as_decimal_string() -> TestResult {
        let mut services = TestServices::default();

        services
            .orders
            .expect_order_total()
            .once()
            .withf(|order| *order == OrderId::new(2))
            .return_once(|_| Ok(Decimal::new(4_999, 2)));

        let service = services.service(Router::with_path("orders/{order}/total").get(handler));

        let mut res = TestClient::get("http://example.com/orders/2/total")
            .send(&service)
            .await;

        let body: OrderTotalResponse = res.take_json().await?;

        assert_eq!(body.order_id, 2);
        assert_eq!(body.total, "49.99");

        Ok(())
    }
}
