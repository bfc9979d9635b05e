//! Shopping Cart
//!
//! The cart belongs to the browser session: [`session::handler`] resolves it from the
//! `cartId` cookie before any cart route runs.

pub(crate) mod checkout;
mod errors;
mod handlers;
pub(crate) mod session;

pub(crate) use handlers::*;
