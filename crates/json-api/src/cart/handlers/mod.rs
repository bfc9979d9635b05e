//! Cart Handlers

pub(crate) mod items;
pub(crate) mod show;
pub(crate) mod units;
