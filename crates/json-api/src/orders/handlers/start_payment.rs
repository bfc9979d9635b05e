//! Start Payment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::orders::models::OrderId;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Start Payment Handler
///
/// Registers the order total with the payment provider and moves the order to `payment`.
/// The returned `payment_id` is the provider order the customer approves.
#[endpoint(
    tags("orders"),
    summary = "Start Payment",
    responses(
        (status_code = StatusCode::OK, description = "Payment started"),
        (status_code = StatusCode::CONFLICT, description = "Order is not created or has no items"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment provider unavailable"),
    ),
)]
#[tracing::instrument(name = "orders.start_payment", skip_all, err)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .start_payment(OrderId::new(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        domain::orders::{
            OrdersServiceError,
            models::{Order, OrderStatus},
        },
        payments::PaymentError,
    };

    use crate::test_helpers::{TestServices, make_order};

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("orders/{order}/payment").post(handler))
    }

    #[tokio::test]
    async fn test_start_payment_returns_provider_id() -> TestResult {
        let mut services = TestServices::default();

        services
            .orders
            .expect_start_payment()
            .once()
            .withf(|order| *order == OrderId::new(5))
            .return_once(|_| {
                Ok(Order {
                    payment_id: Some("PAY-5".to_string()),
                    ..make_order(5, OrderStatus::Payment)
                })
            });

        let mut res = TestClient::post("http://example.com/orders/5/payment")
            .send(&make_service(services))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.status, "payment");
        assert_eq!(body.payment_id.as_deref(), Some("PAY-5"));

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_order_returns_409() -> TestResult {
        let mut services = TestServices::default();

        services
            .orders
            .expect_start_payment()
            .once()
            .return_once(|_| Err(OrdersServiceError::EmptyOrder));

        let res = TestClient::post("http://example.com/orders/5/payment")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_provider_failure_returns_502() -> TestResult {
        let mut services = TestServices::default();

        services
            .orders
            .expect_start_payment()
            .once()
            .return_once(|_| {
                Err(OrdersServiceError::Payment(PaymentError::UnexpectedResponse(
                    "create order request failed with status 500".to_string(),
                )))
            });

        let res = TestClient::post("http://example.com/orders/5/payment")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
