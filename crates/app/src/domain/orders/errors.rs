//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{
    domain::{orders::models::OrderStatus, products::models::ProductId},
    payments::PaymentError,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    /// The operation needs the order in `expected`.
    #[error("order is {actual}, expected {expected}")]
    InvalidStatus {
        expected: OrderStatus,
        actual: OrderStatus,
    },

    /// Quantity is zero or exceeds the product's stock.
    #[error("invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: ProductId, quantity: u32 },

    /// The atomic stock decrement found fewer units than requested.
    #[error("insufficient stock for product {product_id}: {requested} requested")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
    },

    #[error("order has no items")]
    EmptyOrder,

    #[error("payment provider error")]
    Payment(#[source] PaymentError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PaymentError> for OrdersServiceError {
    fn from(error: PaymentError) -> Self {
        Self::Payment(error)
    }
}
