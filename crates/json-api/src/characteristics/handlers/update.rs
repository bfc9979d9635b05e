//! Update Characteristic Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    characteristics::{create::CharacteristicRequest, errors::into_status_error, get::CharacteristicResponse},
    extensions::*,
    state::State,
};

/// Update Characteristic Handler
#[endpoint(
    tags("characteristics"),
    summary = "Update Characteristic",
    responses(
        (status_code = StatusCode::OK, description = "Characteristic updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Characteristic not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "characteristics.update", skip_all, err)]
pub(crate) async fn handler(
    characteristic: PathParam<i64>,
    json: JsonBody<CharacteristicRequest>,
    depot: &mut Depot,
) -> Result<Json<CharacteristicResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let characteristic = state
        .app
        .characteristics
        .save_characteristic(json.into_inner().into_draft(Some(characteristic.into_inner())))
        .await
        .map_err(into_status_error)?;

    Ok(Json(characteristic.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::characteristics::{CharacteristicsServiceError, models::CharacteristicId};

    use crate::test_helpers::{TestServices, make_characteristic};

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("characteristics/{characteristic}").put(handler))
    }

    #[tokio::test]
    async fn test_update_passes_path_id() -> TestResult {
        let mut services = TestServices::default();

        services
            .characteristics
            .expect_save_characteristic()
            .once()
            .withf(|draft| {
                draft.id == Some(CharacteristicId::new(4))
                    && draft.measurement_unit.as_deref() == Some("in")
            })
            .return_once(|_| Ok(make_characteristic(4)));

        let res = TestClient::put("http://example.com/characteristics/4")
            .json(&json!({ "name": "Screen size", "measurement_unit": "in" }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_characteristic_returns_404() -> TestResult {
        let mut services = TestServices::default();

        services
            .characteristics
            .expect_save_characteristic()
            .once()
            .return_once(|_| Err(CharacteristicsServiceError::NotFound));

        let res = TestClient::put("http://example.com/characteristics/4")
            .json(&json!({ "name": "Screen size" }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
