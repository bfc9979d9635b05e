//! Get Characteristic Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::characteristics::models::{Characteristic, CharacteristicId};

use crate::{characteristics::errors::into_status_error, extensions::*, state::State};

/// Characteristic Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CharacteristicResponse {
    /// The characteristic identifier
    pub id: i64,

    /// Display name
    pub name: String,

    /// Unit the value is measured in, e.g. "kg"
    pub measurement_unit: Option<String>,
}

impl From<Characteristic> for CharacteristicResponse {
    fn from(characteristic: Characteristic) -> Self {
        Self {
            id: characteristic.id.get(),
            name: characteristic.name,
            measurement_unit: characteristic.measurement_unit,
        }
    }
}

/// Get Characteristic Handler
///
/// Returns a characteristic.
#[endpoint(tags("characteristics"), summary = "Get Characteristic")]
pub(crate) async fn handler(
    characteristic: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CharacteristicResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let characteristic = state
        .app
        .characteristics
        .get_characteristic(CharacteristicId::new(characteristic.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(characteristic.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::characteristics::CharacteristicsServiceError;

    use crate::test_helpers::{TestServices, make_characteristic};

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("characteristics/{characteristic}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let mut services = TestServices::default();

        services
            .characteristics
            .expect_get_characteristic()
            .once()
            .withf(|id| *id == CharacteristicId::new(3))
            .return_once(|_| Ok(make_characteristic(3)));

        let mut res = TestClient::get("http://example.com/characteristics/3")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CharacteristicResponse = res.take_json().await?;

        assert_eq!(body.id, 3);
        assert_eq!(body.name, "Characteristic 3");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_characteristic_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .characteristics
            .expect_get_characteristic()
            .once()
            .return_once(|_| Err(CharacteristicsServiceError::NotFound));

        let res = TestClient::get("http://example.com/characteristics/9")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/characteristics/abc")
            .send(&make_service(TestServices::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
