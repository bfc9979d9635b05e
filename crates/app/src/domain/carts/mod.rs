//! Carts

pub mod errors;
pub mod janitor;
pub mod models;
mod repositories;
pub mod service;

pub use errors::CartsServiceError;
pub(crate) use repositories::{PgCartProductsRepository, PgCartsRepository};
pub use service::*;
