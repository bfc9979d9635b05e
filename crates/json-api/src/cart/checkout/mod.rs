//! Checkout
//!
//! Reviewing the session cart and turning it into an order.

mod errors;
pub(crate) mod place;
pub(crate) mod review;
