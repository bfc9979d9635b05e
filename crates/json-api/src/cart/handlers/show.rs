//! Show Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{CartContents, CartProduct};

use crate::{
    cart::errors::into_status_error, extensions::*, products::get::ProductResponse,
    state::State,
};

/// A product line in the cart
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub id: i64,
    pub product: ProductResponse,
    pub quantity: u32,
    /// `quantity × price` at the current product price
    pub subtotal: String,
}

impl From<CartProduct> for CartLineResponse {
    fn from(line: CartProduct) -> Self {
        Self {
            id: line.id.get(),
            subtotal: line.subtotal().to_string(),
            quantity: line.quantity,
            product: line.product.into(),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The session cart id, also carried by the `cartId` cookie
    pub id: Uuid,
    pub items: Vec<CartLineResponse>,
    /// Total units over every line
    pub units: u64,
    pub total: String,
}

impl From<CartContents> for CartResponse {
    fn from(contents: CartContents) -> Self {
        Self {
            id: contents.cart.id.get(),
            units: contents.units(),
            total: contents.total().to_string(),
            items: contents.products.into_iter().map(Into::into).collect(),
        }
    }
}

/// Show Cart Handler
///
/// Returns the session cart, creating it on first use.
#[endpoint(tags("cart"), summary = "Show Cart")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cart = depot.cart_id_or_500()?;

    let contents = state
        .app
        .carts
        .open_cart(cart)
        .await
        .map_err(into_status_error)?;

    Ok(Json(contents.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        cart::session,
        test_helpers::{TestServices, cart_cookie, make_cart, make_cart_product, new_cart_id},
    };

    use super::*;

    #[tokio::test]
    async fn test_show_cart_totals_lines() -> TestResult {
        let cart = new_cart_id();
        let mut services = TestServices::default();

        services
            .carts
            .expect_open_cart()
            .once()
            .withf(move |id| *id == cart)
            .return_once(move |_| {
                Ok(CartContents {
                    cart: make_cart(cart),
                    products: vec![make_cart_product(cart, 1, 2), make_cart_product(cart, 2, 1)],
                })
            });

        let service = services.service(
            Router::with_path("cart")
                .hoop(session::handler)
                .get(handler),
        );

        let mut res = TestClient::get("http://example.com/cart")
            .add_header("cookie", cart_cookie(cart), true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartResponse = res.take_json().await?;

        assert_eq!(body.id, cart.get());
        assert_eq!(body.units, 3);
        assert_eq!(body.total, "37.50");
        assert_eq!(body.items.first().map(|line| line.subtotal.as_str()), Some("25.00"));

        Ok(())
    }
}
