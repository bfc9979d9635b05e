//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidQuantity {
            quantity,
            available,
        } => StatusError::bad_request().brief(format!(
            "Quantity {quantity} is not available, choose between 1 and {available}"
        )),
        CartsServiceError::InvalidReference => {
            StatusError::not_found().brief("Product not found")
        }
        CartsServiceError::AlreadyExists
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
