//! App Router

use salvo::Router;

use crate::{
    analysis, cart, carts, catalog, categories, characteristics, customers, orders, products,
};

/// Every JSON route. Literal segments are pushed before `{id}` captures at the same level.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(categories_router())
        .push(characteristics_router())
        .push(products_router())
        .push(customers_router())
        .push(Router::with_path("catalog").get(catalog::search::handler))
        .push(cart_router())
        .push(carts_router())
        .push(orders_router())
        .push(analysis_router())
}

fn categories_router() -> Router {
    Router::with_path("categories")
        .get(categories::index::handler)
        .post(categories::create::handler)
        .push(Router::with_path("search").get(categories::search::handler))
        .push(
            Router::with_path("{category}")
                .get(categories::get::handler)
                .put(categories::update::handler)
                .delete(categories::delete::handler),
        )
}

fn characteristics_router() -> Router {
    Router::with_path("characteristics")
        .get(characteristics::index::handler)
        .post(characteristics::create::handler)
        .push(Router::with_path("search").get(characteristics::search::handler))
        .push(
            Router::with_path("{characteristic}")
                .get(characteristics::get::handler)
                .put(characteristics::update::handler)
                .delete(characteristics::delete::handler),
        )
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .post(products::create::handler)
        .push(Router::with_path("search").get(products::search::handler))
        .push(
            Router::with_path("{product}")
                .get(products::get::handler)
                .put(products::update::handler)
                .delete(products::delete::handler)
                .push(
                    Router::with_path("characteristics")
                        .get(products::characteristics::index::handler)
                        .post(products::characteristics::create::handler)
                        .push(
                            Router::with_path("{item}")
                                .get(products::characteristics::get::handler)
                                .put(products::characteristics::update::handler)
                                .delete(products::characteristics::delete::handler),
                        ),
                ),
        )
}

fn customers_router() -> Router {
    Router::with_path("customers")
        .get(customers::index::handler)
        .post(customers::create::handler)
        .push(Router::with_path("search").get(customers::search::handler))
        .push(Router::with_path("lookup").get(customers::lookup::handler))
        .push(
            Router::with_path("{customer}")
                .get(customers::get::handler)
                .put(customers::update::handler)
                .delete(customers::delete::handler),
        )
}

/// The shopper's own cart, resolved from the `cartId` cookie.
fn cart_router() -> Router {
    Router::with_path("cart")
        .hoop(cart::session::handler)
        .get(cart::show::handler)
        .push(Router::with_path("units").get(cart::units::handler))
        .push(
            Router::with_path("checkout")
                .get(cart::checkout::review::handler)
                .post(cart::checkout::place::handler),
        )
        .push(
            Router::with_path("items")
                .post(cart::items::create::handler)
                .push(
                    Router::with_path("{item}")
                        .put(cart::items::update::handler)
                        .delete(cart::items::delete::handler),
                ),
        )
}

fn carts_router() -> Router {
    Router::with_path("carts")
        .get(carts::index::handler)
        .push(Router::with_path("clean").post(carts::clean::handler))
        .push(
            Router::with_path("{cart}")
                .get(carts::get::handler)
                .delete(carts::delete::handler),
        )
}

fn orders_router() -> Router {
    Router::with_path("orders")
        .get(orders::index::handler)
        .post(orders::create::handler)
        .push(
            Router::with_path("{order}")
                .get(orders::get::handler)
                .put(orders::update::handler)
                .delete(orders::delete::handler)
                .push(Router::with_path("total").get(orders::total::handler))
                .push(Router::with_path("payment").post(orders::start_payment::handler))
                .push(Router::with_path("finish-payment").get(orders::finish_payment::handler))
                .push(
                    Router::with_path("items")
                        .get(orders::items::index::handler)
                        .post(orders::items::create::handler)
                        .push(
                            Router::with_path("{item}")
                                .get(orders::items::get::handler)
                                .put(orders::items::update::handler)
                                .delete(orders::items::delete::handler),
                        ),
                ),
        )
}

fn analysis_router() -> Router {
    Router::with_path("analysis")
        .get(analysis::report::handler)
        .push(Router::with_path("pairs").get(analysis::pairs::handler))
        .push(
            Router::with_path("products/{product}/bought-with")
                .get(analysis::bought_with::handler),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::{domain::customers::models::CustomerId, pagination::SearchLimit};

    use crate::{
        categories::get::CategoryResponse,
        test_helpers::{TestServices, make_category, make_customer},
    };

    use super::*;

    fn service(services: TestServices) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(services.into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn literal_segments_win_over_id_captures() -> TestResult {
        let mut services = TestServices::default();

        services
            .categories
            .expect_search_categories()
            .once()
            .withf(|name, limit| name == "lap" && *limit == SearchLimit::default())
            .return_once(|_, _| Ok(vec![make_category(1)]));

        services
            .customers
            .expect_get_customer_by_email()
            .once()
            .return_once(|_| Ok(make_customer(1)));

        services.customers.expect_get_customer().never();

        let service = service(services);

        let mut res = TestClient::get("http://example.com/categories/search?name=lap")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<CategoryResponse> = res.take_json().await?;

        assert_eq!(body.len(), 1);

        let res = TestClient::get("http://example.com/customers/lookup?email=jane1@example.com")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn cart_routes_set_the_session_cookie() -> TestResult {
        let mut services = TestServices::default();

        services
            .carts
            .expect_units_in_cart()
            .once()
            .return_once(|_| Ok(0));

        let res = TestClient::get("http://example.com/cart/units")
            .send(&service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(res.cookie("cartId").is_some(), "expected a cartId cookie");

        Ok(())
    }

    #[tokio::test]
    async fn id_routes_still_resolve() -> TestResult {
        let mut services = TestServices::default();

        services
            .customers
            .expect_get_customer()
            .once()
            .withf(|customer| *customer == CustomerId::new(3))
            .return_once(|_| Ok(make_customer(3)));

        let res = TestClient::get("http://example.com/customers/3")
            .send(&service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
