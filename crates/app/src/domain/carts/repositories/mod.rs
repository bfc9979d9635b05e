//! Cart Repositories

mod carts;
mod products;

pub(crate) use carts::PgCartsRepository;
pub(crate) use products::PgCartProductsRepository;
