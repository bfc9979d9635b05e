//! Order Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod finish_payment;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod start_payment;
pub(crate) mod total;
pub(crate) mod update;
