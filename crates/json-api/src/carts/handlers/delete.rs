//! Delete Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::domain::carts::models::CartId;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Delete Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Delete Cart",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.delete",
    skip(cart, depot),
    fields(cart_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cart = CartId::new(cart.into_inner());

    tracing::Span::current().record("cart_id", tracing::field::display(cart));

    state
        .app
        .carts
        .delete_cart(cart)
        .await
        .map_err(into_status_error)?;

    tracing::info!("deleted cart");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::carts::CartsServiceError;

    use crate::test_helpers::{TestServices, new_cart_id};

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("carts/{cart}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_cart_success() -> TestResult {
        let cart = new_cart_id();
        let mut services = TestServices::default();

        services
            .carts
            .expect_delete_cart()
            .once()
            .withf(move |id| *id == cart)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/carts/{cart}"))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_cart_invalid_uuid_returns_400() -> TestResult {
        let res = TestClient::delete("http://example.com/carts/123")
            .send(&make_service(TestServices::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_cart_not_found_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .carts
            .expect_delete_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/carts/{}", new_cart_id()))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
