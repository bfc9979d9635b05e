//! Product Pairs Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    analysis::{
        errors::into_status_error,
        report::{ProductPairResponse, collect},
    },
    extensions::*,
    pagination::limit,
    state::State,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairOrder {
    Most,
    Least,
}

fn pair_order(order: Option<String>) -> Result<PairOrder, StatusError> {
    match order.as_deref().map(str::trim) {
        None | Some("" | "most") => Ok(PairOrder::Most),
        Some("least") => Ok(PairOrder::Least),
        Some(_) => Err(StatusError::bad_request().brief("\"order\" must be \"most\" or \"least\"")),
    }
}

/// Product Pairs Handler
///
/// Pairs of products bought in the same orders, ranked by how many orders they share.
#[endpoint(tags("analysis"), summary = "Products Bought Together")]
pub(crate) async fn handler(
    req: &mut Request,
    order: QueryParam<String, false>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductPairResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;
    let count = limit(req).get();

    let analytics = &state.app.analytics;

    let pairs = match pair_order(order.into_inner())? {
        PairOrder::Most => analytics.most_bought_pairs(count, point_in_time).await,
        PairOrder::Least => analytics.least_bought_pairs(count, point_in_time).await,
    }
    .map_err(into_status_error)?;

    Ok(Json(collect(pairs)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::analytics::models::ProductPair;

    use crate::test_helpers::{TestServices, make_product};

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("analysis/pairs").get(handler))
    }

    fn pair(first: i64, second: i64, orders: u64) -> ProductPair {
        ProductPair {
            first: make_product(first),
            second: make_product(second),
            orders,
        }
    }

    #[tokio::test]
    async fn test_most_bought_pairs_by_default() -> TestResult {
        let mut services = TestServices::default();

        services
            .analytics
            .expect_most_bought_pairs()
            .once()
            .withf(|limit, _| *limit == 10)
            .return_once(|_, _| Ok(vec![pair(1, 2, 2)]));

        let mut res = TestClient::get("http://example.com/analysis/pairs")
            .send(&make_service(services))
            .await;

        let body: Vec<ProductPairResponse> = res.take_json().await?;

        assert_eq!(body.len(), 1);
        assert_eq!(body.first().map(|p| p.orders), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn test_least_bought_pairs_with_limit() -> TestResult {
        let mut services = TestServices::default();

        services
            .analytics
            .expect_least_bought_pairs()
            .once()
            .withf(|limit, _| *limit == 3)
            .return_once(|_, _| Ok(vec![pair(1, 3, 1), pair(2, 3, 1)]));

        let mut res = TestClient::get("http://example.com/analysis/pairs?order=least&limit=3")
            .send(&make_service(services))
            .await;

        let body: Vec<ProductPairResponse> = res.take_json().await?;

        let ids: Vec<(i64, i64)> = body.iter().map(|p| (p.first.id, p.second.id)).collect();

        assert_eq!(ids, [(1, 3), (2, 3)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/analysis/pairs?order=sideways")
            .send(&make_service(TestServices::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
