//! Orders
//!
//! Admin order management and the payment round trip.

mod errors;
mod handlers;
pub(crate) mod items;

pub(crate) use handlers::*;
