//! Analytics errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The window holds no data for the requested aggregate.
    #[error("no data in the analysis window")]
    NotFound,

    #[error("point in time out of range")]
    OutOfRange(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for AnalyticsError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}

impl From<jiff::Error> for AnalyticsError {
    fn from(error: jiff::Error) -> Self {
        Self::OutOfRange(error)
    }
}
