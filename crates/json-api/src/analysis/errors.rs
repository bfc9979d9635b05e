//! Analysis Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::analytics::AnalyticsError;

pub(crate) fn into_status_error(error: AnalyticsError) -> StatusError {
    match error {
        AnalyticsError::NotFound => {
            StatusError::not_found().brief("No orders in the analysis window")
        }
        AnalyticsError::OutOfRange(source) => {
            tracing::debug!("analysis window out of range: {source}");

            StatusError::bad_request().brief("\"at\" is too far in the past")
        }
        AnalyticsError::Sql(source) => {
            error!("analytics storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
