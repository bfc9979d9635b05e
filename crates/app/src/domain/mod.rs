//! Storefront Domain Concerns

pub mod analytics;
pub mod carts;
pub mod categories;
pub mod characteristics;
pub mod checkout;
pub mod customers;
pub mod orders;
pub mod products;
