//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
    pagination::{PaginationResponse, page_request},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    /// The requested page of categories
    pub items: Vec<CategoryResponse>,

    /// Number of categories across all pages
    pub total: u64,

    pub pagination: PaginationResponse,
}

/// Category Index Handler
///
/// Returns one page of categories; `page` and `pageSize` select the page.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_request(req);

    let categories = state
        .app
        .categories
        .list_categories(page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        pagination: PaginationResponse::new(page, categories.total),
        total: categories.total,
        items: categories.items.into_iter().map(Into::into).collect(),
    }))
}
