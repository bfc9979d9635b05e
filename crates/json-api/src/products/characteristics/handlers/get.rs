//! Get Product Characteristic Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::models::{ProductCharacteristic, ProductId};

use crate::{
    characteristics::get::CharacteristicResponse, extensions::*,
    products::errors::into_status_error, state::State,
};

/// Product Characteristic Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCharacteristicResponse {
    pub id: i64,
    pub product_id: i64,
    pub characteristic: CharacteristicResponse,
    pub value: String,
}

impl From<ProductCharacteristic> for ProductCharacteristicResponse {
    fn from(item: ProductCharacteristic) -> Self {
        Self {
            id: item.id.get(),
            product_id: item.product_id.get(),
            characteristic: item.characteristic.into(),
            value: item.value,
        }
    }
}

/// Get Product Characteristic Handler
#[endpoint(tags("products"), summary = "Get Product Characteristic")]
pub(crate) async fn handler(
    product: PathParam<i64>,
    item: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ProductCharacteristicResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .products
        .get_product_characteristic(
            ProductId::new(product.into_inner()),
            item.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
