//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::carts::models::CartProductId;

use crate::{cart::errors::into_status_error, extensions::*, state::State};

/// Remove Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cart = depot.cart_id_or_500()?;

    state
        .app
        .carts
        .remove_product(cart, CartProductId::new(item.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::carts::CartsServiceError;

    use crate::{
        cart::session,
        test_helpers::{TestServices, cart_cookie, new_cart_id},
    };

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(
            Router::with_path("cart/items/{item}")
                .hoop(session::handler)
                .delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_item() -> TestResult {
        let cart = new_cart_id();
        let mut services = TestServices::default();

        services
            .carts
            .expect_remove_product()
            .once()
            .withf(move |id, item| *id == cart && *item == CartProductId::new(5))
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete("http://example.com/cart/items/5")
            .add_header("cookie", cart_cookie(cart), true)
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_item_from_another_cart_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .carts
            .expect_remove_product()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete("http://example.com/cart/items/5")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
