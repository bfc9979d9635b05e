//! Product Characteristic Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::products::models::ProductId;

use crate::{
    extensions::*,
    products::{characteristics::get::ProductCharacteristicResponse, errors::into_status_error},
    state::State,
};

/// Product Characteristic Index Handler
///
/// Every characteristic value recorded for the product.
#[endpoint(tags("products"), summary = "List Product Characteristics")]
pub(crate) async fn handler(
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductCharacteristicResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let items = state
        .app
        .products
        .list_product_characteristics(ProductId::new(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}
