//! Storefront Catalog

pub(crate) mod search;
