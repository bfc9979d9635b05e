//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    pagination::{PaginationResponse, page_request},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: u64,
    pub pagination: PaginationResponse,
}

/// Order Index Handler
///
/// Newest orders first.
#[endpoint(tags("orders"), summary = "List Orders")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_request(req);

    let orders = state
        .app
        .orders
        .list_orders(page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        pagination: PaginationResponse::new(page, orders.total),
        total: orders.total,
        items: orders.items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        domain::orders::models::OrderStatus,
        pagination::{Page, PageRequest},
    };

    use crate::test_helpers::{TestServices, make_order};

    use super::*;

    #[tokio::test]
    async fn test_index_reports_pagination_window() -> TestResult {
        let mut services = TestServices::default();

        services
            .orders
            .expect_list_orders()
            .once()
            .withf(|page| *page == PageRequest::new(Some(3), Some(2)))
            .return_once(|_| {
                Ok(Page {
                    items: vec![
                        make_order(6, OrderStatus::Created),
                        make_order(5, OrderStatus::Complete),
                    ],
                    total: 9,
                })
            });

        let service = services.service(Router::with_path("orders").get(handler));

        let mut res = TestClient::get("http://example.com/orders?page=3&pageSize=2")
            .send(&service)
            .await;

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(body.items.len(), 2);
        assert_eq!(body.total, 9);
        assert_eq!(body.pagination.total_pages, 5);
        assert_eq!(body.pagination.pages, vec![1, 2, 3, 4, 5]);
        assert!(body.pagination.has_previous);
        assert!(body.pagination.has_next);

        Ok(())
    }
}
