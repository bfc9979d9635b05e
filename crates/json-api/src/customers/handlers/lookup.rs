//! Customer Lookup Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
    state::State,
};

/// Customer Lookup Handler
///
/// Exact, case-insensitive match on the email address; used to prefill order forms.
#[endpoint(tags("customers"), summary = "Find Customer By Email")]
pub(crate) async fn handler(
    email: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .get_customer_by_email(email.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::customers::CustomersServiceError;

    use crate::test_helpers::{TestServices, make_customer};

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("customers/lookup").get(handler))
    }

    #[tokio::test]
    async fn test_lookup_finds_customer() -> TestResult {
        let mut services = TestServices::default();

        services
            .customers
            .expect_get_customer_by_email()
            .once()
            .withf(|email| email == "jane1@example.com")
            .return_once(|_| Ok(make_customer(1)));

        let res = TestClient::get("http://example.com/customers/lookup?email=jane1@example.com")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_unknown_email_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .customers
            .expect_get_customer_by_email()
            .once()
            .return_once(|_| Err(CustomersServiceError::NotFound));

        let res = TestClient::get("http://example.com/customers/lookup?email=nobody@example.com")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_without_email_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/customers/lookup")
            .send(&make_service(TestServices::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
