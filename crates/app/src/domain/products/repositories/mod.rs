//! Product Repositories

mod characteristics;
mod products;

pub(crate) use characteristics::PgProductCharacteristicsRepository;
pub(crate) use products::{PgProductsRepository, try_get_product};
