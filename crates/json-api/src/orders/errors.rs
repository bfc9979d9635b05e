//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Order references an unknown customer or product")
        }
        OrdersServiceError::MissingRequiredData | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::InvalidStatus { expected, actual } => StatusError::conflict()
            .brief(format!("Order is {actual}, this action needs it to be {expected}")),
        OrdersServiceError::InvalidQuantity {
            product_id,
            quantity,
        } => StatusError::bad_request().brief(format!(
            "Quantity {quantity} is not available for product {product_id}"
        )),
        OrdersServiceError::InsufficientStock {
            product_id,
            requested,
        } => StatusError::conflict().brief(format!(
            "Not enough stock of product {product_id} for {requested} units"
        )),
        OrdersServiceError::EmptyOrder => StatusError::conflict().brief("Order has no items"),
        OrdersServiceError::Payment(source) => {
            error!("payment provider error: {source}");

            StatusError::bad_gateway().brief("Payment provider unavailable")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
