//! Orders

pub mod errors;
pub mod models;
mod repositories;
pub mod service;

pub use errors::OrdersServiceError;
pub(crate) use repositories::{PgOrderItemsRepository, PgOrdersRepository};
pub use service::*;
