//! Delete Product Characteristic Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::products::models::ProductId;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Delete Product Characteristic Handler
#[endpoint(tags("products"), summary = "Delete Product Characteristic")]
pub(crate) async fn handler(
    product: PathParam<i64>,
    item: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .products
        .delete_product_characteristic(
            ProductId::new(product.into_inner()),
            item.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
