//! Analytics
//!
//! Read-only aggregates over the orders placed in the trailing window
//! `(point_in_time - 30 days, point_in_time]`. Daily figures are bucketed by UTC calendar day.

pub mod errors;
pub mod models;
mod repository;
pub mod series;
pub mod service;

pub use errors::AnalyticsError;
pub use service::*;
