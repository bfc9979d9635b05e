//! Cart Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::Cart;

use crate::{
    carts::errors::into_status_error,
    extensions::*,
    pagination::{PaginationResponse, page_request},
    state::State,
};

/// Cart Summary Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartSummaryResponse {
    pub id: Uuid,

    /// Carts idle for more than a week are swept
    pub last_access_time: String,
}

impl From<Cart> for CartSummaryResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id.get(),
            last_access_time: cart.last_access_time.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartsResponse {
    pub items: Vec<CartSummaryResponse>,
    pub total: u64,
    pub pagination: PaginationResponse,
}

/// Cart Index Handler
///
/// Most recently used carts first.
#[endpoint(tags("carts"), summary = "List Carts")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_request(req);

    let carts = state
        .app
        .carts
        .list_carts(page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartsResponse {
        pagination: PaginationResponse::new(page, carts.total),
        total: carts.total,
        items: carts.items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::pagination::Page;

    use crate::test_helpers::{TestServices, make_cart, new_cart_id};

    use super::*;

    #[tokio::test]
    async fn test_index_lists_carts() -> TestResult {
        let cart = new_cart_id();
        let mut services = TestServices::default();

        services
            .carts
            .expect_list_carts()
            .once()
            .return_once(move |_| {
                Ok(Page {
                    items: vec![make_cart(cart)],
                    total: 1,
                })
            });

        let service = services.service(Router::with_path("carts").get(handler));

        let mut res = TestClient::get("http://example.com/carts")
            .send(&service)
            .await;

        let body: CartsResponse = res.take_json().await?;

        assert_eq!(body.total, 1);
        assert_eq!(body.items.first().map(|c| c.id), Some(cart.get()));
        assert_eq!(body.pagination.total_pages, 1);

        Ok(())
    }
}
