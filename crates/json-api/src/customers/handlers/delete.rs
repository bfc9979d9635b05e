//! Delete Customer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::customers::models::CustomerId;

use crate::{customers::errors::into_status_error, extensions::*, state::State};

/// Delete Customer Handler
///
/// The customer's orders are kept as guest orders.
#[endpoint(
    tags("customers"),
    summary = "Delete Customer",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Customer deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .customers
        .delete_customer(CustomerId::new(customer.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::TestServices;

    use super::*;

    #[tokio::test]
    async fn test_delete_customer_success() -> TestResult {
        let mut services = TestServices::default();

        services
            .customers
            .expect_delete_customer()
            .once()
            .withf(|id| *id == CustomerId::new(8))
            .return_once(|_| Ok(()));

        let service = services.service(Router::with_path("customers/{customer}").delete(handler));

        let res = TestClient::delete("http://example.com/customers/8")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }
}
