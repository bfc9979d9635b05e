//! Create Customer Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::customers::models::CustomerDraft;

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
    state::State,
};

/// Customer create/update request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl CustomerRequest {
    pub(crate) fn into_draft(self, id: Option<i64>) -> CustomerDraft {
        CustomerDraft {
            id: id.map(Into::into),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

/// Create Customer Handler
///
/// Saving an email that already exists updates that customer's name instead of failing.
#[endpoint(
    tags("customers"),
    summary = "Create Or Update Customer By Email",
    responses(
        (status_code = StatusCode::CREATED, description = "Customer saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "customers.create", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<CustomerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .save_customer(json.into_inner().into_draft(None))
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/customers/{}", customer.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(customer.into()))
}
