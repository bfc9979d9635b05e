//! Catalog Search Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{categories::models::CategoryId, products::models::CatalogFilter};

use crate::{
    extensions::*,
    pagination::{PaginationResponse, page_request},
    products::get::ProductResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogResponse {
    /// Matching products, ordered by id
    pub items: Vec<ProductResponse>,

    pub total: u64,

    pub pagination: PaginationResponse,

    /// The search text as applied
    pub query: String,

    /// The category filter as applied
    pub category_id: Option<i64>,
}

/// Catalog Search Handler
///
/// Storefront product listing: `query` matches the start of the model name, ignoring case,
/// and `category` restricts the listing to one category.
#[endpoint(tags("catalog"), summary = "Search Catalog")]
pub(crate) async fn handler(
    query: QueryParam<String, false>,
    category: QueryParam<i64, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CatalogResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_request(req);

    let filter = CatalogFilter {
        category_id: category.into_inner().and_then(CategoryId::from_positive),
        query: query.into_inner().unwrap_or_default().trim().to_owned(),
    };

    let query = filter.query.clone();
    let category_id = filter.category_id.map(CategoryId::get);

    let products = state
        .app
        .products
        .search_catalog(page, filter)
        .await
        .or_500("failed to search catalog")?;

    Ok(Json(CatalogResponse {
        pagination: PaginationResponse::new(page, products.total),
        total: products.total,
        items: products.items.into_iter().map(Into::into).collect(),
        query,
        category_id,
    }))
}
