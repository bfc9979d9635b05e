//! Search Customers Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
    pagination::limit,
    state::State,
};

/// Search Customers Handler
///
/// Case-insensitive substring match on the email address.
#[endpoint(tags("customers"), summary = "Search Customers")]
pub(crate) async fn handler(
    email: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<CustomerResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customers = state
        .app
        .customers
        .search_customers(email.into_inner().unwrap_or_default(), limit(req))
        .await
        .map_err(into_status_error)?;

    Ok(Json(customers.into_iter().map(Into::into).collect()))
}
