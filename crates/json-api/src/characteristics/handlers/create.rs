//! Create Characteristic Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::characteristics::models::CharacteristicDraft;

use crate::{
    characteristics::{errors::into_status_error, get::CharacteristicResponse},
    extensions::*,
    state::State,
};

/// Characteristic create/update request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CharacteristicRequest {
    pub name: String,
    #[serde(default)]
    pub measurement_unit: Option<String>,
}

impl CharacteristicRequest {
    pub(crate) fn into_draft(self, id: Option<i64>) -> CharacteristicDraft {
        CharacteristicDraft {
            id: id.map(Into::into),
            name: self.name,
            measurement_unit: self.measurement_unit.filter(|text| !text.trim().is_empty()),
        }
    }
}

/// Create Characteristic Handler
#[endpoint(
    tags("characteristics"),
    summary = "Create Characteristic",
    responses(
        (status_code = StatusCode::CREATED, description = "Characteristic created"),
        (status_code = StatusCode::CONFLICT, description = "Characteristic already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "characteristics.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CharacteristicRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CharacteristicResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let characteristic = state
        .app
        .characteristics
        .save_characteristic(json.into_inner().into_draft(None))
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/characteristics/{}", characteristic.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(characteristic_id = %characteristic.id, "created characteristic");

    Ok(Json(characteristic.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::characteristics::{
        CharacteristicsServiceError,
        models::{Characteristic, CharacteristicId},
    };

    use crate::test_helpers::TestServices;

    use super::*;

    fn make_service(services: TestServices) -> Service {
        services.service(Router::with_path("characteristics").post(handler))
    }

    #[tokio::test]
    async fn test_create_characteristic_success() -> TestResult {
        let mut services = TestServices::default();

        services
            .characteristics
            .expect_save_characteristic()
            .once()
            .withf(|draft| {
                *draft
                    == CharacteristicDraft {
                        id: None,
                        name: "Weight".to_string(),
                        measurement_unit: None,
                    }
            })
            .return_once(|draft| {
                Ok(Characteristic {
                    id: CharacteristicId::new(7),
                    name: draft.name,
                    measurement_unit: draft.measurement_unit,
                })
            });

        let mut res = TestClient::post("http://example.com/characteristics")
            .json(&json!({ "name": "Weight", "measurement_unit": "" }))
            .send(&make_service(services))
            .await;

        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/characteristics/7"));

        let body: CharacteristicResponse = res.take_json().await?;

        assert_eq!(body.id, 7);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_characteristic_returns_409() -> TestResult {
        let mut services = TestServices::default();

        services
            .characteristics
            .expect_save_characteristic()
            .once()
            .return_once(|_| Err(CharacteristicsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/characteristics")
            .json(&json!({ "name": "Weight" }))
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_without_name_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/characteristics")
            .json(&json!({ "measurement_unit": "kg" }))
            .send(&make_service(TestServices::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
