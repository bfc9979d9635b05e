//! Get Customer Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::customers::models::{Customer, CustomerId};

use crate::{customers::errors::into_status_error, extensions::*, state::State};

/// Customer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.get(),
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
        }
    }
}

/// Get Customer Handler
#[endpoint(tags("customers"), summary = "Get Customer")]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .get_customer(CustomerId::new(customer.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::customers::CustomersServiceError;

    use crate::test_helpers::{TestServices, make_customer};

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("customers/{customer}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_customer() -> TestResult {
        let mut services = TestServices::default();

        services
            .customers
            .expect_get_customer()
            .once()
            .withf(|id| *id == CustomerId::new(12))
            .return_once(|_| Ok(make_customer(12)));

        let mut res = TestClient::get("http://example.com/customers/12")
            .send(&make_service(services))
            .await;

        let body: CustomerResponse = res.take_json().await?;

        assert_eq!(body.email, "jane12@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_customer_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .customers
            .expect_get_customer()
            .once()
            .return_once(|_| Err(CustomersServiceError::NotFound));

        let res = TestClient::get("http://example.com/customers/12")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
