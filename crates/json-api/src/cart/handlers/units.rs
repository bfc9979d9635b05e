//! Cart Units Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{cart::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartUnitsResponse {
    pub units: u64,
}

/// Cart Units Handler
///
/// Number of units in the session cart, for the cart badge.
#[endpoint(tags("cart"), summary = "Count Cart Units")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartUnitsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let cart = depot.cart_id_or_500()?;

    let units = state
        .app
        .carts
        .units_in_cart(cart)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartUnitsResponse { units }))
}
