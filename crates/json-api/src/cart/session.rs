//! Cart session middleware.

use salvo::{
    http::cookie::{Cookie, time::Duration},
    prelude::*,
};
use uuid::Uuid;

use storefront_app::domain::carts::models::CartId;

use crate::extensions::*;

/// Cookie carrying the cart UUID.
pub(crate) const CART_COOKIE: &str = "cartId";

const CART_COOKIE_MAX_AGE: Duration = Duration::days(1);

/// Resolve the session cart and refresh its cookie.
///
/// A missing or malformed cookie gets a freshly minted id; the cart row itself is created
/// lazily by the first cart operation.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let cart = match req
        .cookie(CART_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    {
        Some(cart) => cart,
        None => {
            let cart = Uuid::new_v4();

            tracing::debug!(cart_id = %cart, "minted cart session");

            cart
        }
    };

    depot.insert_cart_id(CartId::new(cart));
    res.add_cookie(session_cookie(cart));

    ctrl.call_next(req, depot, res).await;
}

fn session_cookie(cart: Uuid) -> Cookie<'static> {
    Cookie::build((CART_COOKIE, cart.to_string()))
        .http_only(true)
        .path("/")
        .max_age(CART_COOKIE_MAX_AGE)
        .build()
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[salvo::handler]
    async fn echo_cart(depot: &mut Depot, res: &mut Response) {
        let cart = depot
            .cart_id_or_500()
            .map_or_else(|_| "missing".to_string(), |cart| cart.to_string());

        res.render(cart);
    }

    fn make_service() -> Service {
        Service::new(Router::new().hoop(handler).push(Router::with_path("cart").get(echo_cart)))
    }

    #[tokio::test]
    async fn test_existing_cookie_is_kept() -> TestResult {
        let cart = Uuid::new_v4();

        let mut res = TestClient::get("http://example.com/cart")
            .add_header("cookie", format!("{CART_COOKIE}={cart}"), true)
            .send(&make_service())
            .await;

        let cookie = res.cookie(CART_COOKIE).map(|cookie| cookie.value().to_owned());

        assert_eq!(cookie, Some(cart.to_string()));
        assert_eq!(res.take_string().await?, cart.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_cookie_mints_new_cart() -> TestResult {
        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service())
            .await;

        let cookie = res.cookie(CART_COOKIE).cloned();
        let body = res.take_string().await?;

        let Some(cookie) = cookie else {
            return Err("expected a cart cookie".into());
        };

        assert_eq!(cookie.value(), body);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(1)));
        assert!(Uuid::parse_str(&body).is_ok(), "expected a uuid, got {body:?}");

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_cookie_is_replaced() -> TestResult {
        let mut res = TestClient::get("http://example.com/cart")
            .add_header("cookie", format!("{CART_COOKIE}=not-a-uuid"), true)
            .send(&make_service())
            .await;

        let body = res.take_string().await?;

        assert_ne!(body, "not-a-uuid");
        assert!(Uuid::parse_str(&body).is_ok(), "expected a uuid, got {body:?}");

        Ok(())
    }
}
