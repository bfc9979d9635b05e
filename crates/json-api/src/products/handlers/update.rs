//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    extensions::*,
    products::{create::ProductRequest, errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Handler
///
/// Replaces every field; order items keep the price they were sold at.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_id", product);

    let draft = json.into_inner().into_draft(Some(product))?;

    let product = state
        .app
        .products
        .save_product(draft)
        .await
        .map_err(into_status_error)?;

    tracing::info!(price = %product.price, quantity = product.quantity, "updated product");

    Ok(Json(product.into()))
}
