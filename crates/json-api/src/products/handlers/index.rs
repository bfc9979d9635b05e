//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    pagination::{PaginationResponse, page_request},
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The requested page of products
    pub items: Vec<ProductResponse>,

    pub total: u64,

    pub pagination: PaginationResponse,
}

/// Product Index Handler
///
/// Returns one page of products with their categories.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_request(req);

    let products = state
        .app
        .products
        .list_products(page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        pagination: PaginationResponse::new(page, products.total),
        total: products.total,
        items: products.items.into_iter().map(Into::into).collect(),
    }))
}
