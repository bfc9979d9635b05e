//! Customer Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
    pagination::{PaginationResponse, page_request},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomersResponse {
    pub items: Vec<CustomerResponse>,
    pub total: u64,
    pub pagination: PaginationResponse,
}

/// Customer Index Handler
#[endpoint(tags("customers"), summary = "List Customers")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CustomersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_request(req);

    let customers = state
        .app
        .customers
        .list_customers(page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CustomersResponse {
        pagination: PaginationResponse::new(page, customers.total),
        total: customers.total,
        items: customers.items.into_iter().map(Into::into).collect(),
    }))
}
