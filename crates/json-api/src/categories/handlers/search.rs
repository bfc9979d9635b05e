//! Search Categories Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
    pagination::limit,
    state::State,
};

/// Search Categories Handler
///
/// Case-insensitive substring match on the name, for pickers and typeahead.
#[endpoint(tags("categories"), summary = "Search Categories")]
pub(crate) async fn handler(
    name: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .search_categories(name.into_inner().unwrap_or_default(), limit(req))
        .await
        .map_err(into_status_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TestServices, make_category};

    use super::*;

    #[tokio::test]
    async fn test_search_clamps_limit() -> TestResult {
        let mut services = TestServices::default();

        services
            .categories
            .expect_search_categories()
            .once()
            .withf(|name, limit| name == "lap" && limit.get() == 100)
            .return_once(|_, _| Ok(vec![make_category(1)]));

        let service = services.service(Router::with_path("categories/search").get(handler));

        let mut res = TestClient::get("http://example.com/categories/search?name=lap&limit=5000")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<CategoryResponse> = res.take_json().await?;

        assert_eq!(body.len(), 1);

        Ok(())
    }
}
