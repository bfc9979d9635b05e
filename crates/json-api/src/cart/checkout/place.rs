//! Place Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::checkout::{CheckoutError, models::CheckoutForm};

use crate::{
    cart::checkout::errors::{ValidationErrorResponse, into_status_error},
    extensions::*,
    observability::{CheckoutOutcome, observe_checkout},
    orders::get::OrderResponse,
    state::State,
};

/// Checkout form. Missing fields are reported together with the other invalid ones.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CheckoutRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

impl From<CheckoutRequest> for CheckoutForm {
    fn from(request: CheckoutRequest) -> Self {
        Self {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            address: request.address,
        }
    }
}

/// Place Order Handler
///
/// Turns the session cart into an order. Stock for every line is reserved in the same
/// transaction; if any line is short nothing is written and the cart is kept.
#[endpoint(
    tags("cart"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed", body = OrderResponse),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid form", body = ValidationErrorResponse),
        (status_code = StatusCode::CONFLICT, description = "Cart is empty or a product is out of stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "cart.checkout.place", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cart = depot.cart_id_or_500()?;

    let result = state
        .app
        .checkout
        .place_order(cart, json.into_inner().into())
        .await;

    let order = match result {
        Ok(order) => order,
        Err(CheckoutError::Validation(errors)) => {
            observe_checkout(CheckoutOutcome::Rejected);

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY)
                .render(Json(ValidationErrorResponse {
                    errors: errors.into_iter().map(Into::into).collect(),
                }));

            return Ok(());
        }
        Err(error) => {
            observe_checkout(match error {
                CheckoutError::InsufficientStock { .. } => CheckoutOutcome::OutOfStock,
                _ => CheckoutOutcome::Rejected,
            });

            return Err(into_status_error(error));
        }
    };

    observe_checkout(CheckoutOutcome::Placed);

    tracing::info!(order_id = %order.id, cart_id = %cart, "checkout placed order");

    res.add_header(LOCATION, format!("/orders/{}", order.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED)
        .render(Json(OrderResponse::from(order)));

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        orders::models::OrderStatus, products::models::ProductId,
    };

    use crate::{
        cart::session,
        test_helpers::{TestServices, cart_cookie, make_order, new_cart_id},
    };

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(
            Router::with_path("cart/checkout")
                .hoop(session::handler)
                .post(handler),
        )
    }

    fn form() -> serde_json::Value {
        json!({
            "email": "jane1@example.com",
            "first_name": "Jane",
            "last_name": "Doe",
            "address": "1 Main Street"
        })
    }

    #[tokio::test]
    async fn test_place_order_from_session_cart() -> TestResult {
        let cart = new_cart_id();
        let mut services = TestServices::default();

        services
            .checkout
            .expect_place_order()
            .once()
            .withf(move |id, form| {
                *id == cart && form.email == "jane1@example.com" && form.address == "1 Main Street"
            })
            .return_once(|_, _| Ok(make_order(21, OrderStatus::Created)));

        let mut res = TestClient::post("http://example.com/cart/checkout")
            .add_header("cookie", cart_cookie(cart), true)
            .json(&form())
            .send(&make_service(services))
            .await;

        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/orders/21"));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.id, 21);
        assert_eq!(body.status, "created");

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_form_lists_every_field() -> TestResult {
        let mut services = TestServices::default();

        services
            .checkout
            .expect_place_order()
            .once()
            .return_once(|_, form| {
                Err(CheckoutError::Validation(
                    CheckoutForm::from(CheckoutRequest {
                        email: form.email,
                        ..CheckoutRequest::default()
                    })
                    .validate(),
                ))
            });

        let mut res = TestClient::post("http://example.com/cart/checkout")
            .json(&json!({ "email": "not-an-email" }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        let body: ValidationErrorResponse = res.take_json().await?;

        let fields: Vec<&str> = body.errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, ["email", "first_name", "last_name", "address"]);
        assert_eq!(
            body.errors.first().map(|e| e.message.as_str()),
            Some("\"email\" is empty or invalid.")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_short_stock_returns_409() -> TestResult {
        let mut services = TestServices::default();

        services
            .checkout
            .expect_place_order()
            .once()
            .return_once(|_, _| {
                Err(CheckoutError::InsufficientStock {
                    product_id: ProductId::new(2),
                    model: "Model 2".to_string(),
                    requested: 9,
                })
            });

        let mut res = TestClient::post("http://example.com/cart/checkout")
            .json(&form())
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        let body = res.take_string().await?;

        assert!(body.contains("Model 2"), "unexpected body: {body}");

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_409() -> TestResult {
        let mut services = TestServices::default();

        services
            .checkout
            .expect_place_order()
            .once()
            .return_once(|_, _| Err(CheckoutError::EmptyCart));

        let res = TestClient::post("http://example.com/cart/checkout")
            .json(&form())
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
