//! Characteristic Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::characteristics::CharacteristicsServiceError;

pub(crate) fn into_status_error(error: CharacteristicsServiceError) -> StatusError {
    match error {
        CharacteristicsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Characteristic already exists")
        }
        CharacteristicsServiceError::InvalidReference
        | CharacteristicsServiceError::MissingRequiredData
        | CharacteristicsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid characteristic payload")
        }
        CharacteristicsServiceError::NotFound => StatusError::not_found().brief("Characteristic not found"),
        CharacteristicsServiceError::Sql(source) => {
            error!("characteristic storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
