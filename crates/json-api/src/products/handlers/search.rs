//! Search Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    pagination::limit,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Search Products Handler
///
/// Case-insensitive substring match on the model, for order item pickers.
#[endpoint(tags("products"), summary = "Search Products")]
pub(crate) async fn handler(
    model: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .search_products(model.into_inner().unwrap_or_default(), limit(req))
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
