//! Update Customer Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    customers::{create::CustomerRequest, errors::into_status_error, get::CustomerResponse},
    extensions::*,
    state::State,
};

/// Update Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Update Customer",
    responses(
        (status_code = StatusCode::OK, description = "Customer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::CONFLICT, description = "Email belongs to another customer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "customers.update", skip_all, err)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    json: JsonBody<CustomerRequest>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .save_customer(json.into_inner().into_draft(Some(customer.into_inner())))
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}
