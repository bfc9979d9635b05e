//! Checkout errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{checkout::models::FieldError, products::models::ProductId};

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// One entry per rejected form field.
    #[error("invalid checkout form")]
    Validation(Vec<FieldError>),

    #[error("cart is empty")]
    EmptyCart,

    /// A line asked for more units than are left; nothing was written.
    #[error("not enough \"{model}\" in stock for {requested} units")]
    InsufficientStock {
        product_id: ProductId,
        model: String,
        requested: u32,
    },

    #[error("already exists")]
    AlreadyExists,

    #[error("not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutError {
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
