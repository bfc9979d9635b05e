//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use storefront_app::domain::carts::models::CartId;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_cart_id(&mut self, cart: CartId);

    /// The session cart resolved by the cart session middleware.
    fn cart_id_or_500(&self) -> Result<CartId, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_cart_id(&mut self, cart: CartId) {
        self.inject(cart);
    }

    fn cart_id_or_500(&self) -> Result<CartId, StatusError> {
        self.obtain::<CartId>().copied().map_err(|_ignored| {
            error!("cart session middleware did not run");

            StatusError::internal_server_error()
        })
    }
}
