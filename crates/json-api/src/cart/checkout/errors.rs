//! Checkout Errors

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use tracing::error;

use storefront_app::domain::checkout::{CheckoutError, models::FieldError};

/// A rejected checkout form field.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FieldErrorResponse {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for FieldErrorResponse {
    fn from(error: FieldError) -> Self {
        Self {
            field: error.field.to_string(),
            message: error.message,
        }
    }
}

/// Body of a `422` checkout response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidationErrorResponse {
    pub errors: Vec<FieldErrorResponse>,
}

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::Validation(_) => {
            StatusError::unprocessable_entity().brief("Invalid checkout form")
        }
        CheckoutError::EmptyCart => StatusError::conflict().brief("Your cart is empty"),
        error @ CheckoutError::InsufficientStock { .. } => {
            StatusError::conflict().brief(capitalize(&error.to_string()))
        }
        CheckoutError::NotFound => StatusError::not_found().brief("Cart not found"),
        CheckoutError::AlreadyExists
        | CheckoutError::InvalidReference
        | CheckoutError::MissingRequiredData
        | CheckoutError::InvalidData => StatusError::bad_request().brief("Invalid checkout data"),
        CheckoutError::Sql(source) => {
            error!("checkout storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
