//! Cart Handlers

pub(crate) mod clean;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
