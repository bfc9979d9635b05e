//! Products

pub mod errors;
pub mod models;
mod repositories;
pub mod service;

pub use errors::ProductsServiceError;
pub(crate) use repositories::{PgProductsRepository, try_get_product};
pub use service::*;
