//! Create Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{categories::models::CategoryId, products::models::ProductDraft};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Product create/update request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    /// Category to file the product under; omit for none
    #[serde(default)]
    pub category_id: Option<i64>,

    pub model: String,

    pub manufacturer: String,

    /// Unit price as a decimal string, e.g. "12.50"
    pub price: String,

    /// Units in stock
    pub quantity: u32,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub warranty_days: u32,
}

impl ProductRequest {
    pub(crate) fn into_draft(self, id: Option<i64>) -> Result<ProductDraft, StatusError> {
        let price = self
            .price
            .trim()
            .parse::<Decimal>()
            .or_400("price must be a decimal number")?;

        if price.is_sign_negative() {
            return Err(StatusError::bad_request().brief("price must not be negative"));
        }

        Ok(ProductDraft {
            id: id.map(Into::into),
            category_id: self.category_id.and_then(CategoryId::from_positive),
            model: self.model,
            manufacturer: self.manufacturer,
            price,
            quantity: self.quantity,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
            warranty_days: self.warranty_days,
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Category does not exist"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "products.create", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let draft = json.into_inner().into_draft(None)?;

    let product = state
        .app
        .products
        .save_product(draft)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_id = %product.id, price = %product.price, "created product");

    Ok(Json(product.into()))
}
