//! Clean Carts Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, state::State};

/// Clean Carts Handler
///
/// Asks the cart janitor to sweep idle carts now. The sweep runs in the background.
#[endpoint(
    tags("carts"),
    summary = "Sweep Idle Carts",
    responses(
        (status_code = StatusCode::ACCEPTED, description = "Sweep requested"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Janitor is not running"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if !state.janitor.trigger() {
        tracing::error!("cart janitor has stopped");

        return Err(StatusError::service_unavailable().brief("Cart janitor is not running"));
    }

    Ok(StatusCode::ACCEPTED)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use salvo::test::TestClient;
    use testresult::TestResult;
    use tokio::sync::Notify;

    use storefront_app::domain::carts::{MockCartsService, janitor::CartJanitor};

    use crate::test_helpers::TestServices;

    use super::*;

    #[tokio::test]
    async fn test_clean_triggers_a_sweep() -> TestResult {
        let swept = Arc::new(Notify::new());
        let notifier = Arc::clone(&swept);

        let mut carts = MockCartsService::new();

        carts.expect_clean_old_carts().times(1).returning(move || {
            notifier.notify_one();

            Ok(2)
        });

        let (janitor, handle) = CartJanitor::new(Arc::new(carts), Duration::from_secs(3600));
        let task = tokio::spawn(janitor.run());

        let services = TestServices {
            janitor: Some(handle),
            ..TestServices::default()
        };

        let service = services.service(Router::with_path("carts/clean").post(handler));

        let res = TestClient::post("http://example.com/carts/clean")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::ACCEPTED));

        swept.notified().await;

        task.abort();

        Ok(())
    }

    #[tokio::test]
    async fn test_clean_without_janitor_returns_503() -> TestResult {
        let service =
            TestServices::default().service(Router::with_path("carts/clean").post(handler));

        let res = TestClient::post("http://example.com/carts/clean")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }
}
