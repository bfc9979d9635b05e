//! Create Product Characteristic Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::models::{ProductCharacteristicDraft, ProductId};

use crate::{
    extensions::*,
    products::{characteristics::get::ProductCharacteristicResponse, errors::into_status_error},
    state::State,
};

/// Product characteristic create/update request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCharacteristicRequest {
    pub characteristic_id: i64,
    pub value: String,
}

impl ProductCharacteristicRequest {
    pub(crate) fn into_draft(self, id: Option<i64>) -> ProductCharacteristicDraft {
        ProductCharacteristicDraft {
            id: id.map(Into::into),
            characteristic_id: self.characteristic_id.into(),
            value: self.value,
        }
    }
}

/// Create Product Characteristic Handler
#[endpoint(
    tags("products"),
    summary = "Add Product Characteristic",
    responses(
        (status_code = StatusCode::CREATED, description = "Value recorded"),
        (status_code = StatusCode::CONFLICT, description = "Product already has this characteristic"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "products.characteristics.create", skip_all, err)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<ProductCharacteristicRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCharacteristicResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = ProductId::new(product.into_inner());

    let item = state
        .app
        .products
        .save_product_characteristic(product, json.into_inner().into_draft(None))
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/products/{product}/characteristics/{}", item.id),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
