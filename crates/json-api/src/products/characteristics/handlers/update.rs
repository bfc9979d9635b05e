//! Update Product Characteristic Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use storefront_app::domain::products::models::ProductId;

use crate::{
    extensions::*,
    products::{
        characteristics::{
            create::ProductCharacteristicRequest, get::ProductCharacteristicResponse,
        },
        errors::into_status_error,
    },
    state::State,
};

/// Update Product Characteristic Handler
#[endpoint(tags("products"), summary = "Update Product Characteristic")]
#[tracing::instrument(name = "products.characteristics.update", skip_all, err)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    item: PathParam<i64>,
    json: JsonBody<ProductCharacteristicRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductCharacteristicResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .products
        .save_product_characteristic(
            ProductId::new(product.into_inner()),
            json.into_inner().into_draft(Some(item.into_inner())),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
