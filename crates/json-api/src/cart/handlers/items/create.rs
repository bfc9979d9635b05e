//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::models::ProductId;

use crate::{
    cart::{errors::into_status_error, show::CartLineResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_id: i64,
}

/// Add Cart Item Handler
///
/// Puts one unit of a product in the session cart. Adding a product that is
/// already in the cart returns the existing line unchanged.
#[endpoint(
    tags("cart"),
    summary = "Add Product to Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Product added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "cart.items.create", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cart = depot.cart_id_or_500()?;

    let product = ProductId::from_positive(json.into_inner().product_id)
        .ok_or_else(|| StatusError::not_found().brief("Product not found"))?;

    let line = state
        .app
        .carts
        .add_product(cart, product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/cart/items/{}", line.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(line.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::carts::CartsServiceError;

    use crate::{
        cart::session,
        test_helpers::{TestServices, cart_cookie, make_cart_product, new_cart_id},
    };

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(
            Router::with_path("cart/items")
                .hoop(session::handler)
                .post(handler),
        )
    }

    #[tokio::test]
    async fn test_add_product_to_session_cart() -> TestResult {
        let cart = new_cart_id();
        let mut services = TestServices::default();

        services
            .carts
            .expect_add_product()
            .once()
            .withf(move |id, product| *id == cart && *product == ProductId::new(3))
            .return_once(move |_, _| Ok(make_cart_product(cart, 3, 1)));

        let mut res = TestClient::post("http://example.com/cart/items")
            .add_header("cookie", cart_cookie(cart), true)
            .json(&json!({ "product_id": 3 }))
            .send(&make_service(services))
            .await;

        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/cart/items/3"));

        let body: CartLineResponse = res.take_json().await?;

        assert_eq!(body.quantity, 1);
        assert_eq!(body.product.model, "Model 3");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_unknown_product_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .carts
            .expect_add_product()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_id": 99 }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_non_positive_product_id_skips_service() -> TestResult {
        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_id": 0 }))
            .send(&make_service(TestServices::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
