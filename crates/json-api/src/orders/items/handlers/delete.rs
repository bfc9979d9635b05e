//! Remove Order Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::orders::models::{OrderId, OrderItemId};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Remove Order Item Handler
///
/// The item's units go back into stock.
#[endpoint(
    tags("orders"),
    summary = "Remove Order Item",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Order item not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is no longer editable"),
    ),
)]
#[tracing::instrument(name = "orders.items.delete", skip_all, err)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    item: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .orders
        .remove_item(
            OrderId::new(order.into_inner()),
            OrderItemId::new(item.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::orders::OrdersServiceError;

    use crate::test_helpers::TestServices;

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("orders/{order}/items/{item}").delete(handler))
    }

    #[tokio::test]
    async fn test_remove_item() -> TestResult {
        let mut services = TestServices::default();

        services
            .orders
            .expect_remove_item()
            .once()
            .withf(|order, item| *order == OrderId::new(1) && *item == OrderItemId::new(3))
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete("http://example.com/orders/1/items/3")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_missing_item_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .orders
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::delete("http://example.com/orders/1/items/3")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
