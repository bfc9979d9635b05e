//! Bought With Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use storefront_app::domain::products::models::ProductId;

use crate::{
    analysis::{errors::into_status_error, report::BoughtWithResponse},
    extensions::*,
    state::State,
};

/// Bought With Handler
///
/// The product that shares the most orders with the given one.
#[endpoint(
    tags("analysis"),
    summary = "Most Bought With",
    responses(
        (status_code = StatusCode::OK, description = "Companion product"),
        (status_code = StatusCode::NOT_FOUND, description = "Never bought with another product"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<BoughtWithResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let bought_with = state
        .app
        .analytics
        .most_bought_with(ProductId::new(product.into_inner()), point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(bought_with.into()))
}
