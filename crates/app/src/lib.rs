//! Storefront domain, persistence and payment modules shared by the CLI and the JSON API.

pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod pagination;
pub mod payments;

#[cfg(test)]
mod test;
