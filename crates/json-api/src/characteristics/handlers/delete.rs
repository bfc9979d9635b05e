//! Delete Characteristic Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::characteristics::models::CharacteristicId;

use crate::{characteristics::errors::into_status_error, extensions::*, state::State};

/// Delete Characteristic Handler
///
/// Values recorded against the characteristic on any product are removed with it.
#[endpoint(
    tags("characteristics"),
    summary = "Delete Characteristic",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Characteristic deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Characteristic not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    characteristic: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .characteristics
        .delete_characteristic(CharacteristicId::new(characteristic.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::characteristics::CharacteristicsServiceError;

    use crate::test_helpers::TestServices;

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("characteristics/{characteristic}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_characteristic_success() -> TestResult {
        let mut services = TestServices::default();

        services
            .characteristics
            .expect_delete_characteristic()
            .once()
            .withf(|id| *id == CharacteristicId::new(2))
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/characteristics/2")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_characteristic_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .characteristics
            .expect_delete_characteristic()
            .once()
            .return_once(|_| Err(CharacteristicsServiceError::NotFound));

        let res = TestClient::delete("http://example.com/characteristics/2")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
