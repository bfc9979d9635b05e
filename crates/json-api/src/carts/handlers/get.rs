//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use storefront_app::domain::carts::models::CartId;

use crate::{
    cart::show::CartResponse, carts::errors::into_status_error, extensions::*, state::State,
};

/// Get Cart Handler
///
/// Reads a cart without touching its last access time.
#[endpoint(tags("carts"), summary = "Get Cart")]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let contents = state
        .app
        .carts
        .get_cart(CartId::new(cart.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(contents.into()))
}
