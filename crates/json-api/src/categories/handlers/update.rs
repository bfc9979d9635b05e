//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    categories::{create::CategoryRequest, errors::into_status_error, get::CategoryResponse},
    extensions::*,
    state::State,
};

/// Update Category Handler
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "categories.update", skip_all, err)]
pub(crate) async fn handler(
    category: PathParam<i64>,
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .save_category(json.into_inner().into_draft(Some(category.into_inner())))
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::categories::{CategoriesServiceError, models::CategoryId};

    use crate::test_helpers::{TestServices, make_category};

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("categories/{category}").put(handler))
    }

    #[tokio::test]
    async fn test_update_passes_path_id() -> TestResult {
        let mut services = TestServices::default();

        services
            .categories
            .expect_save_category()
            .once()
            .withf(|draft| draft.id == Some(CategoryId::new(4)) && draft.name == "Phones")
            .return_once(|_| Ok(make_category(4)));

        let res = TestClient::put("http://example.com/categories/4")
            .json(&json!({ "name": "Phones", "description": "Smart ones" }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_category_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .categories
            .expect_save_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        let res = TestClient::put("http://example.com/categories/4")
            .json(&json!({ "name": "Phones" }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
